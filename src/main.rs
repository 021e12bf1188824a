//! speechmatics-batch CLI: submit an audio file and print the transcript.
//!
//! Usage:
//!   speechmatics-batch <AUDIO_FILE> [--config <path>]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use speechmatics_batch::{Transcriber, TranscriptionConfig, DEFAULT_CONFIG_PATH};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut audio: Option<PathBuf> = None;
    let mut config_flag: Option<PathBuf> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "version" | "--version" | "-V" => {
                println!("speechmatics-batch {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_flag = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config requires a path");
                        eprintln!();
                        print_usage();
                        std::process::exit(1);
                    }
                }
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
            other => {
                if audio.is_some() {
                    eprintln!("Unexpected extra argument: {other}");
                    eprintln!();
                    print_usage();
                    std::process::exit(1);
                }
                audio = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    let audio = match audio {
        Some(audio) => audio,
        None => {
            print_usage();
            std::process::exit(1);
        }
    };

    let config_path = resolve_config_path(config_flag);
    let config = TranscriptionConfig::from_file(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    debug!(
        user_id = %config.user_id,
        language = %config.language,
        format = %config.format,
        "configuration loaded"
    );

    let transcriber = Transcriber::from_config(config)?;
    let output = transcriber.transcribe_audio(&audio)?;

    std::io::stdout().write_all(&output)?;
    Ok(())
}

fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    // Check --config flag
    if let Some(path) = flag {
        return path;
    }
    // Check environment variable
    if let Ok(path) = std::env::var("SPEECHMATICS_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn print_usage() {
    println!(
        r#"speechmatics-batch - submit an audio file for transcription

USAGE:
    speechmatics-batch <AUDIO_FILE> [OPTIONS]

OPTIONS:
    --config <path>             Configuration record (JSON)
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    SPEECHMATICS_CONFIG         Configuration record path (used when --config is absent)

The transcript is written to stdout; progress is logged to stderr."#
    );
}
