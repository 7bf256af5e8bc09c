//! Decoder options.
//!
//! The defaults reproduce the plain wire format: only fields with a
//! mainstream sensor class are reported and every sample type uses its table
//! layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::samples::layout::{self, SampleLayout};

/// Errors returned when validating a [`DecoderConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown layout '{name}' for sample type {sample_type}")]
    UnknownLayout { sample_type: u8, name: String },
}

/// Options shared by the router and the field decoder.
///
/// # Examples
/// ```
/// use sensirion_ble_core::DecoderConfig;
///
/// let config = DecoderConfig::default().with_layout_override(32, "pm1_pm2p5_pm4_pm10");
/// assert!(config.validate().is_ok());
/// assert!(!config.extended_fields);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Also decode firmware fields without a mainstream sensor class
    /// (formaldehyde, PM4).
    pub extended_fields: bool,
    /// Sample type to layout name, replacing the table entry for that tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub layout_overrides: BTreeMap<u8, String>,
}

impl DecoderConfig {
    pub fn with_extended_fields(mut self, extended: bool) -> Self {
        self.extended_fields = extended;
        self
    }

    pub fn with_layout_override(mut self, sample_type: u8, name: impl Into<String>) -> Self {
        self.layout_overrides.insert(sample_type, name.into());
        self
    }

    /// Checks that every override names a known layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (sample_type, name) in &self.layout_overrides {
            if layout::layout_by_name(name).is_none() {
                return Err(ConfigError::UnknownLayout {
                    sample_type: *sample_type,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Layout used for `sample_type`, honouring overrides.
    ///
    /// An override naming an unknown layout resolves to `None`; call
    /// [`DecoderConfig::validate`] up front to reject such configs.
    pub fn resolve_layout(&self, sample_type: u8) -> Option<&'static SampleLayout> {
        match self.layout_overrides.get(&sample_type) {
            Some(name) => layout::layout_by_name(name),
            None => layout::lookup(sample_type),
        }
    }
}
