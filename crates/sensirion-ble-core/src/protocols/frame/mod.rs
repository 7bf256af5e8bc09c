//! Manufacturer-data envelope routing.
//!
//! The router checks the one-byte envelope marker, reads the sample type and
//! the two identifier bytes, then hands the remaining payload to the sample
//! decoder. A foreign marker or an unknown sample type is "not supported"
//! (`Ok(None)`); only frames too short to hold what they declare are errors.
//!
//! Version française (résumé):
//! Le routeur vérifie le marqueur, lit le type d'échantillon et
//! l'identifiant, puis délègue la charge utile au décodeur de champs.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{route, route_manufacturer_data, route_with_config};
