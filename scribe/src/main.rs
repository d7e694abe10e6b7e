#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod agent;
mod args;

use std::path::Path;

use agent::Agent;
use args::{Args, Command};
use clap::Parser;
use scribe_config::Config;
use serde_json::Value;
use stt::{AudioFile, Domain, TranscriptionCandidate};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    scribe_telemetry::init(config.telemetry.as_ref(), "info")?;

    if let Some(path) = &args.config {
        tracing::debug!(config_path = %path.display(), "configuration loaded");
    }

    match args.command {
        Command::Validate { request, audio } => validate(&config, &request, &audio),
        Command::Members { domain } => {
            for member in stt::members(domain) {
                println!("{member}");
            }
            Ok(())
        }
        Command::Check { domain, value } => {
            println!("{}", check(domain, &value));
            Ok(())
        }
    }
}

/// Validate the request at `request_path` with the audio at `audio_path`
fn validate(config: &Config, request_path: &Path, audio_path: &Path) -> anyhow::Result<()> {
    let candidate = read_candidate(request_path, audio_path)?;
    let agent = Agent::from_config(config);

    let request = agent
        .run(candidate)
        .map_err(|e| anyhow::anyhow!("request rejected ({}): {e}", e.error_type()))?;

    let rendered = serde_json::to_string_pretty(&request)?;
    println!("{rendered}");

    Ok(())
}

fn read_candidate(request_path: &Path, audio_path: &Path) -> anyhow::Result<TranscriptionCandidate> {
    let raw = std::fs::read_to_string(request_path)
        .map_err(|e| anyhow::anyhow!("failed to read request file {}: {e}", request_path.display()))?;

    let body: Value = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse request file {}: {e}", request_path.display()))?;

    let bytes = std::fs::read(audio_path)
        .map_err(|e| anyhow::anyhow!("failed to read audio file {}: {e}", audio_path.display()))?;

    let filename = audio_path
        .file_name()
        .map_or_else(|| "audio".to_string(), |name| name.to_string_lossy().into_owned());

    tracing::debug!(file = %filename, bytes = bytes.len(), "audio loaded");

    let candidate = TranscriptionCandidate::from_json(body)
        .map_err(|e| anyhow::anyhow!("request rejected ({}): {e}", e.error_type()))?;

    Ok(candidate.with_file(AudioFile::new(bytes, filename)))
}

/// Membership of a command-line value, read as JSON when it parses
fn check(domain: Domain, raw: &str) -> bool {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    stt::is_member(domain, &value)
}
