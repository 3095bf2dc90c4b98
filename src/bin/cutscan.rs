//! Command-line front-end for scene-change detection.

use std::error::Error;
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use cutscan::{
    detect, render, set_decoder_log_level, DecoderLogLevel, DetectOptions, OutputFormat,
    ProgressCallback, ProgressInfo, Sensitivity,
};

#[derive(Parser)]
#[command(name = "cutscan")]
#[command(about = "Detect scene changes in a video file")]
#[command(version)]
struct Args {
    /// Input video file
    input: PathBuf,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: json, csv, aegisub, or timecode
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Detection sensitivity: low, medium, or high
    #[arg(short, long, default_value = "medium")]
    sensitivity: String,

    /// Suppress progress reporting and non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose diagnostic logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_sensitivity(value: &str) -> Option<Sensitivity> {
    match value.to_ascii_lowercase().as_str() {
        "low" => Some(Sensitivity::Low),
        "medium" => Some(Sensitivity::Medium),
        "high" => Some(Sensitivity::High),
        _ => None,
    }
}

/// Prints a single self-overwriting progress line to stderr.
struct StderrProgress;

impl ProgressCallback for StderrProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match (info.total_frames, info.percentage) {
            (Some(total), Some(pct)) => {
                let eta = info
                    .estimated_remaining
                    .map(|eta| format!(", ~{}s left", eta.as_secs()))
                    .unwrap_or_default();
                eprint!(
                    "\rScanning frame {}/{} ({pct:.1}%{eta})    ",
                    info.current_frame + 1,
                    total,
                );
            }
            _ => eprint!("\rScanning frame {}    ", info.current_frame + 1),
        }
        let _ = std::io::stderr().flush();
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let format = OutputFormat::from_name(&args.format)
        .ok_or_else(|| format!("Unknown output format: {}", args.format))?;
    let sensitivity = parse_sensitivity(&args.sensitivity)
        .ok_or_else(|| format!("Unknown sensitivity: {}", args.sensitivity))?;

    set_decoder_log_level(if args.quiet {
        DecoderLogLevel::Fatal
    } else {
        DecoderLogLevel::Error
    });

    let mut options = DetectOptions::new().with_sensitivity(sensitivity);
    if !args.quiet {
        options = options
            .with_progress(Arc::new(StderrProgress))
            .with_batch_size(16);
    }

    let result = detect(&args.input, &options)?;
    if !args.quiet {
        eprintln!(
            "\rDetected {} scene(s) across {} frame(s)           ",
            result.scenes.len(),
            result.metadata.frame_count,
        );
    }

    let rendered = render(&result, format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            if !args.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn main() {
    // Map argument errors to exit code 1; --help and --version exit 0.
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    let filter = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();

    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::parse_sensitivity;
    use cutscan::OutputFormat;

    #[test]
    fn parse_sensitivity_aliases() {
        assert!(parse_sensitivity("low").is_some());
        assert!(parse_sensitivity("MEDIUM").is_some());
        assert!(parse_sensitivity("high").is_some());
        assert!(parse_sensitivity("extreme").is_none());
    }

    #[test]
    fn parse_format_aliases() {
        assert!(OutputFormat::from_name("json").is_some());
        assert!(OutputFormat::from_name("CSV").is_some());
        assert!(OutputFormat::from_name("aegisub").is_some());
        assert!(OutputFormat::from_name("timecodes").is_some());
        assert!(OutputFormat::from_name("xml").is_none());
    }
}
