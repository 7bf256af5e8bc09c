//! Hex text input for frames captured outside the radio stack.
//!
//! Accepts the forms BLE tools print manufacturer data in: contiguous
//! (`0003abcd`), separated by spaces, `:` or `-`, and an optional `0x`
//! prefix.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex digit '{digit}' at position {position}")]
    InvalidDigit { digit: char, position: usize },
    #[error("odd number of hex digits: {count}")]
    OddLength { count: usize },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<HexError>,
    },
}

/// Parses one frame written as hex.
///
/// # Examples
/// ```
/// use sensirion_ble_core::hex::parse_frame;
///
/// assert_eq!(parse_frame("00 03 ab:cd")?, vec![0x00, 0x03, 0xAB, 0xCD]);
/// assert_eq!(parse_frame("0x0003")?, vec![0x00, 0x03]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_frame(text: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mut digits = Vec::with_capacity(body.len());
    for (position, ch) in body.chars().enumerate() {
        if ch.is_whitespace() || ch == ':' || ch == '-' {
            continue;
        }
        let nibble = ch
            .to_digit(16)
            .ok_or(HexError::InvalidDigit { digit: ch, position })?;
        digits.push(nibble as u8);
    }

    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength {
            count: digits.len(),
        });
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Parses one frame per line, skipping blank lines and `#` comments.
pub fn parse_frames(text: &str) -> Result<Vec<Vec<u8>>, HexError> {
    let mut frames = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let frame = parse_frame(content).map_err(|err| HexError::Line {
            line: index + 1,
            source: Box::new(err),
        })?;
        frames.push(frame);
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::{HexError, parse_frame, parse_frames};

    #[test]
    fn parse_frame_separators() {
        let expected = vec![0x00, 0x03, 0xAB, 0xCD];
        assert_eq!(parse_frame("0003ABCD").unwrap(), expected);
        assert_eq!(parse_frame("00 03 ab cd").unwrap(), expected);
        assert_eq!(parse_frame("00:03:AB:CD").unwrap(), expected);
        assert_eq!(parse_frame("00-03-ab-cd").unwrap(), expected);
        assert_eq!(parse_frame("  0x0003abcd \n").unwrap(), expected);
    }

    #[test]
    fn parse_frame_empty() {
        assert!(parse_frame("").unwrap().is_empty());
    }

    #[test]
    fn parse_frame_rejects_bad_digits() {
        assert_eq!(
            parse_frame("00zz").unwrap_err(),
            HexError::InvalidDigit {
                digit: 'z',
                position: 2
            }
        );
        assert_eq!(
            parse_frame("000").unwrap_err(),
            HexError::OddLength { count: 3 }
        );
    }

    #[test]
    fn parse_frames_skips_comments_and_blanks() {
        let text = "# scenario\n0003ABCD\n\n  01 02 # trailing comment\n";
        let frames = parse_frames(text).unwrap();
        assert_eq!(frames, vec![vec![0x00, 0x03, 0xAB, 0xCD], vec![0x01, 0x02]]);
    }

    #[test]
    fn parse_frames_reports_line_numbers() {
        let err = parse_frames("0003\nxyz\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2: invalid hex digit 'x'"));
    }
}
