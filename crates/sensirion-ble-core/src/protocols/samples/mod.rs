//! Sample payload decoding.
//!
//! A one-byte sample type selects a fixed layout of 16-bit little-endian
//! fields; each field is converted to a physical value and rounded to two
//! decimals. Layouts live in `layout` (the wire format's source of truth),
//! the numeric formulas in `conversion`.
//!
//! Length checks are strict: a payload that stops before the last decoded
//! field is rejected as a whole. Unknown sample types are not errors, they
//! just produce no readings.
//!
//! Version française (résumé):
//! Le type d'échantillon choisit une disposition fixe de mots 16 bits
//! little-endian. Les conversions sont dans `conversion`, les dispositions
//! dans `layout`. Une charge utile trop courte est rejetée entièrement.

pub mod conversion;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{decode_layout, decode_samples, decode_samples_with_config};
