use thiserror::Error;

/// Errors returned by sample payload decoding.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use sensirion_ble_core::protocols::samples::error::SampleError;
///
/// let err = SampleError::TooShort { needed: 8, actual: 7 };
/// assert!(err.to_string().contains("sample payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("sample payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
