use super::error::FrameError;
use super::layout;
use crate::protocols::common::reader::upper_hex;

pub struct FrameReader<'a> {
    raw: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self { raw }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FrameError> {
        if self.raw.len() < needed {
            return Err(FrameError::TooShort {
                needed,
                actual: self.raw.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.raw.get(offset).copied().ok_or(FrameError::TooShort {
            needed: offset + 1,
            actual: self.raw.len(),
        })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.raw.get(range.clone()).ok_or(FrameError::TooShort {
            needed: range.end,
            actual: self.raw.len(),
        })
    }

    /// Identifier bytes as upper-case hex, in wire order.
    pub fn read_identifier_hex(&self) -> Result<String, FrameError> {
        let bytes = self.read_slice(layout::IDENTIFIER_RANGE.clone())?;
        Ok(upper_hex(bytes))
    }

    pub fn payload(&self) -> Result<&'a [u8], FrameError> {
        self.require_len(layout::PAYLOAD_OFFSET)?;
        Ok(&self.raw[layout::PAYLOAD_OFFSET..])
    }
}
