use thiserror::Error;

use crate::protocols::samples::error::SampleError;

/// Errors returned by advertisement frame routing.
///
/// Every variant means the frame is malformed; frames that are merely not
/// supported are reported as `Ok(None)` by the router instead.
///
/// # Examples
/// ```
/// use sensirion_ble_core::FrameError;
///
/// let err = FrameError::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("frame too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("empty manufacturer data")]
    Empty,
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error(transparent)]
    Sample(#[from] SampleError),
}
