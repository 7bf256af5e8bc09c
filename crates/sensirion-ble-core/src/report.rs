use log::debug;

use crate::protocols::common::reader::upper_hex;
use crate::protocols::frame::layout::COMPANY_IDENTIFIER;
use crate::protocols::frame::route_manufacturer_data;
use crate::{DecodeReport, DecoderConfig, FrameResult, FrameStatus, make_stub_report};

/// Decodes every frame independently and collects a report.
///
/// A malformed frame never stops the batch; its error message is recorded in
/// the frame's entry.
pub fn decode_frames(frames: &[Vec<u8>], config: &DecoderConfig) -> DecodeReport {
    decode_company_frames(COMPANY_IDENTIFIER, frames, config)
}

/// Like [`decode_frames`], for frames published under `company_id`. Frames
/// from any other company are all reported as not supported.
pub fn decode_company_frames(
    company_id: u16,
    frames: &[Vec<u8>],
    config: &DecoderConfig,
) -> DecodeReport {
    let mut report = make_stub_report(config);

    for (index, raw) in frames.iter().enumerate() {
        let input_hex = upper_hex(raw);
        let result = match route_manufacturer_data(company_id, raw, config) {
            Ok(Some(advertisement)) => {
                report.summary.decoded += 1;
                FrameResult {
                    index,
                    input_hex,
                    status: FrameStatus::Decoded,
                    advertisement: Some(advertisement),
                    error: None,
                }
            }
            Ok(None) => {
                report.summary.not_supported += 1;
                FrameResult {
                    index,
                    input_hex,
                    status: FrameStatus::NotSupported,
                    advertisement: None,
                    error: None,
                }
            }
            Err(err) => {
                debug!("frame {} malformed: {}", index, err);
                report.summary.malformed += 1;
                FrameResult {
                    index,
                    input_hex,
                    status: FrameStatus::Malformed,
                    advertisement: None,
                    error: Some(err.to_string()),
                }
            }
        };
        report.frames.push(result);
    }

    report.summary.frames_total = report.frames.len() as u64;
    report
}
