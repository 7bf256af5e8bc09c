use std::fs;
use std::path::{Path, PathBuf};

use sensirion_ble_core::hex::parse_frames;
use sensirion_ble_core::{DecodeReport, DecoderConfig, decode_frames};

fn golden_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_report(dir: &str) -> DecodeReport {
    let expected_path = golden_dir(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn load_config(dir: &str) -> DecoderConfig {
    let path = golden_dir(dir).join("config.json");
    if !path.exists() {
        return DecoderConfig::default();
    }
    let json = fs::read_to_string(&path).expect("read config.json");
    serde_json::from_str(&json).expect("parse config")
}

fn run_golden(dir: &str) {
    let input = fs::read_to_string(golden_dir(dir).join("input.hex")).expect("read input.hex");
    let frames = parse_frames(&input).expect("parse input.hex");
    let config = load_config(dir);
    config.validate().expect("valid golden config");
    let expected = load_expected_report(dir);

    let mut actual = decode_frames(&frames, &config);
    actual.tool.version = expected.tool.version.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_climate() {
    run_golden("tests/golden/climate");
}

#[test]
fn golden_particulate() {
    run_golden("tests/golden/particulate");
}

#[test]
fn golden_rejected() {
    run_golden("tests/golden/rejected");
}

#[test]
fn golden_extended() {
    run_golden("tests/golden/extended");
}

#[test]
fn golden_rejected_has_expected_counts() {
    let report = load_expected_report("tests/golden/rejected");
    assert_eq!(report.summary.frames_total, 6);
    assert_eq!(report.summary.not_supported, 3);
    assert_eq!(report.summary.malformed, 2);
    assert_eq!(report.summary.decoded, 1);
}

#[test]
fn golden_particulate_decodes_every_frame() {
    let report = load_expected_report("tests/golden/particulate");
    assert_eq!(report.summary.decoded, report.summary.frames_total);
}
