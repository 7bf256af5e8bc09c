use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glob::glob;
use log::debug;
use sensirion_ble_core::hex::{parse_frame, parse_frames};
use sensirion_ble_core::{
    COMPANY_IDENTIFIER, DecodeReport, DecoderConfig, SAMPLE_TYPES, SampleLayout, UNBOUND_LAYOUTS,
    decode_company_frames,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("SENSIRION_BLE_BUILD_COMMIT"),
    ", ",
    env!("SENSIRION_BLE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "sensirion-ble")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for Sensirion BLE sensor advertisements (manufacturer data).",
    long_about = None,
    after_help = "Examples:\n  sensirion-ble decode 0003ABCD0080E8036400\n  sensirion-ble decode-file frames.hex -o report.json\n  sensirion-ble layouts"
)]
struct Cli {
    /// Increase log verbosity (RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode manufacturer-data frames given as hex arguments; prints a JSON report.
    Decode {
        /// Frames as hex (spaces, ':' or '-' separators and a 0x prefix are accepted)
        #[arg(required = true)]
        frames: Vec<String>,

        #[command(flatten)]
        options: DecodeOptions,
    },
    /// Decode a file with one hex frame per line and write a JSON report.
    #[command(
        after_help = "Examples:\n  sensirion-ble decode-file frames.hex -o report.json\n  sensirion-ble decode-file 'captures/*.hex' --stdout --pretty"
    )]
    DecodeFile {
        /// Path (or glob pattern matching one file) of the hex input
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        #[command(flatten)]
        options: DecodeOptions,
    },
    /// List sample types and their field layouts.
    Layouts {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct DecodeOptions {
    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Also decode formaldehyde and PM4 fields
    #[arg(long)]
    extended: bool,

    /// Decode a sample type with a named layout, as TAG=LAYOUT (repeatable)
    #[arg(long = "layout", value_name = "TAG=LAYOUT")]
    layouts: Vec<String>,

    /// Company identifier the frames were published under (hex with 0x, or decimal)
    #[arg(long, value_name = "ID")]
    company_id: Option<String>,

    /// Exit with a non-zero code if any frame is malformed
    #[arg(long)]
    strict: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode { frames, options } => cmd_decode(frames, options),
        Commands::DecodeFile {
            input,
            report,
            stdout,
            options,
        } => cmd_decode_file(input, report, stdout, options),
        Commands::Layouts { json } => cmd_layouts(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(frames: Vec<String>, options: DecodeOptions) -> Result<(), CliError> {
    let config = build_config(&options)?;
    let company_id = parse_company_id(options.company_id.as_deref())?;

    let mut raw_frames = Vec::with_capacity(frames.len());
    for (index, frame) in frames.iter().enumerate() {
        let raw = parse_frame(frame).map_err(|err| {
            CliError::new(
                format!("invalid frame #{} '{}': {}", index + 1, frame, err),
                Some("frames are hex bytes, e.g. 0003ABCD0080E8036400".to_string()),
            )
        })?;
        raw_frames.push(raw);
    }

    let rep = decode_company_frames(company_id, &raw_frames, &config);
    let json = serialize_report(&rep, options.pretty, options.compact)?;
    println!("{}", json);

    if !options.quiet {
        print_summary(&rep);
    }
    check_strict(&rep, options.strict)
}

fn cmd_decode_file(
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    options: DecodeOptions,
) -> Result<(), CliError> {
    let config = build_config(&options)?;
    let company_id = parse_company_id(options.company_id.as_deref())?;
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let text = fs::read_to_string(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let frames = parse_frames(&text).map_err(|err| {
        CliError::new(
            format!("invalid hex in {}: {}", resolved_input.display(), err),
            Some("use one hex frame per line; '#' starts a comment".to_string()),
        )
    })?;
    debug!(
        "read {} frames from {}",
        frames.len(),
        resolved_input.display()
    );

    let rep = decode_company_frames(company_id, &frames, &config);
    let json = serialize_report(&rep, options.pretty, options.compact)?;

    let report = match (stdout, report) {
        (true, _) => {
            println!("{}", json);
            if !options.quiet {
                print_summary(&rep);
            }
            return check_strict(&rep, options.strict);
        }
        (false, Some(report)) => report,
        (false, None) => {
            return Err(CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            ));
        }
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !options.quiet {
        print_summary(&rep);
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(&rep, options.strict)
}

fn cmd_layouts(json: bool) -> Result<(), CliError> {
    let rows: Vec<(Option<u8>, &SampleLayout)> = SAMPLE_TYPES
        .iter()
        .map(|(tag, layout)| (Some(*tag), *layout))
        .chain(UNBOUND_LAYOUTS.iter().map(|layout| (None, *layout)))
        .collect();

    if json {
        let value: Vec<serde_json::Value> = rows
            .iter()
            .map(|(tag, layout)| {
                let fields: Vec<serde_json::Value> = layout
                    .fields
                    .iter()
                    .map(|field| {
                        serde_json::json!({
                            "quantity": field.quantity,
                            "unit": field.quantity.unit(),
                            "offset": field.offset,
                            "conversion": field.conversion,
                            "extended": field.extended,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "sample_type": tag,
                    "layout": layout.name,
                    "fields": fields,
                })
            })
            .collect();
        let out = serde_json::to_string_pretty(&value).context("JSON serialization failed")?;
        println!("{}", out);
        return Ok(());
    }

    for (tag, layout) in rows {
        let tag = tag.map_or_else(|| "-".to_string(), |tag| tag.to_string());
        let fields = layout
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{}{}@{} [{}, {}]",
                    if field.extended { "*" } else { "" },
                    field.quantity,
                    field.offset,
                    field.quantity.unit(),
                    field.conversion.name()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:>3}  {:<28} {}", tag, layout.name, fields);
    }
    println!("(* extended field, decoded with --extended; '-' has no sample type)");
    Ok(())
}

fn build_config(options: &DecodeOptions) -> Result<DecoderConfig, CliError> {
    let mut config = DecoderConfig::default().with_extended_fields(options.extended);
    for entry in &options.layouts {
        let (tag, name) = entry.split_once('=').ok_or_else(|| {
            CliError::new(
                format!("invalid layout override '{}'", entry),
                Some("use TAG=LAYOUT, e.g. 32=pm1_pm2p5_pm4_pm10".to_string()),
            )
        })?;
        let tag: u8 = tag.trim().parse().map_err(|_| {
            CliError::new(
                format!("invalid sample type '{}' in '{}'", tag, entry),
                Some("sample types are 0..=255".to_string()),
            )
        })?;
        config = config.with_layout_override(tag, name.trim());
    }
    config.validate().map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("run `sensirion-ble layouts` to list layout names".to_string()),
        )
    })?;
    Ok(config)
}

fn parse_company_id(value: Option<&str>) -> Result<u16, CliError> {
    let Some(value) = value else {
        return Ok(COMPANY_IDENTIFIER);
    };
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => trimmed.parse::<u16>(),
    };
    parsed.map_err(|_| {
        CliError::new(
            format!("invalid company id '{}'", value),
            Some(format!(
                "use hex with 0x or decimal, e.g. {:#06x}",
                COMPANY_IDENTIFIER
            )),
        )
    })
}

fn serialize_report(rep: &DecodeReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_summary(rep: &DecodeReport) {
    let summary = &rep.summary;
    eprintln!(
        "frames: {} decoded, {} not supported, {} malformed ({} total)",
        summary.decoded, summary.not_supported, summary.malformed, summary.frames_total
    );
}

fn check_strict(rep: &DecodeReport, strict: bool) -> Result<(), CliError> {
    if strict && rep.summary.malformed > 0 {
        return Err(CliError::new(
            format!("{} malformed frame(s) detected", rep.summary.malformed),
            Some("inspect the \"error\" field of malformed frames in the report".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a text file with one hex frame per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a text file with one hex frame per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single input file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use super::{is_glob_pattern, parse_company_id};
    use sensirion_ble_core::COMPANY_IDENTIFIER;

    #[test]
    fn company_id_defaults_to_sensirion() {
        assert_eq!(parse_company_id(None).unwrap(), COMPANY_IDENTIFIER);
    }

    #[test]
    fn company_id_accepts_hex_and_decimal() {
        assert_eq!(parse_company_id(Some("0x06D5")).unwrap(), 0x06D5);
        assert_eq!(parse_company_id(Some("1749")).unwrap(), 0x06D5);
        assert!(parse_company_id(Some("0xZZ")).is_err());
        assert!(parse_company_id(Some("70000")).is_err());
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("captures/*.hex"));
        assert!(!is_glob_pattern("captures/frames.hex"));
    }
}
