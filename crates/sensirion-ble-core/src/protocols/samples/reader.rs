use super::error::SampleError;
use super::layout::FIELD_LEN;

pub struct SampleReader<'a> {
    payload: &'a [u8],
}

impl<'a> SampleReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), SampleError> {
        if self.payload.len() < needed {
            return Err(SampleError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u16_le(&self, offset: usize) -> Result<u16, SampleError> {
        let bytes = self.read_slice(offset..offset + FIELD_LEN)?;
        let word: [u8; 2] = bytes.try_into().map_err(|_| SampleError::TooShort {
            needed: offset + FIELD_LEN,
            actual: self.payload.len(),
        })?;
        Ok(u16::from_le_bytes(word))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], SampleError> {
        self.payload
            .get(range.clone())
            .ok_or(SampleError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }
}
