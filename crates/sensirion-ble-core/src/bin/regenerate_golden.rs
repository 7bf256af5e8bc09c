use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sensirion_ble_core::hex::parse_frames;
use sensirion_ble_core::{DecoderConfig, decode_frames};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.hex");
        if !input.exists() {
            continue;
        }
        regenerate_one(&path, &input, &path.join("expected_report.json"))?;
    }

    Ok(())
}

fn load_config(case: &Path) -> Result<DecoderConfig, String> {
    let path = case.join("config.json");
    if !path.exists() {
        return Ok(DecoderConfig::default());
    }
    let json = fs::read_to_string(&path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let config: DecoderConfig = serde_json::from_str(&json)
        .map_err(|err| format!("invalid config {}: {}", path.display(), err))?;
    config
        .validate()
        .map_err(|err| format!("invalid config {}: {}", path.display(), err))?;
    Ok(config)
}

fn regenerate_one(case: &Path, input: &Path, output: &Path) -> Result<(), String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let frames =
        parse_frames(&text).map_err(|err| format!("invalid hex in {}: {}", input.display(), err))?;
    let report = decode_frames(&frames, &load_config(case)?);
    let mut json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
