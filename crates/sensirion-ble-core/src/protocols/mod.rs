//! Advertisement decoding modules.
//!
//! Each layer follows the same structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe byte access
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! `frame` unwraps the manufacturer-data envelope and hands the payload to
//! `samples`. Both are pure and contain no I/O.

pub(crate) mod common;
pub mod frame;
pub mod samples;
