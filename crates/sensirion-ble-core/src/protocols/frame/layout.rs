pub const MARKER_OFFSET: usize = 0;
pub const SAMPLE_TYPE_OFFSET: usize = 1;
pub const IDENTIFIER_RANGE: std::ops::Range<usize> = 2..4;
pub const PAYLOAD_OFFSET: usize = 4;

pub const ADVERTISEMENT_MARKER: u8 = 0x00;
pub const HEADER_LEN: usize = PAYLOAD_OFFSET;

/// Bluetooth SIG company identifier of Sensirion AG.
pub const COMPANY_IDENTIFIER: u16 = 0x06D5;
pub const MANUFACTURER: &str = "Sensirion AG";
