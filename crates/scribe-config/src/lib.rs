#![allow(clippy::must_use_candidate)]

pub mod agent;
mod loader;
pub mod stt;
pub mod telemetry;

use serde::Deserialize;

pub use agent::*;
pub use self::stt::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Scribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Agent that drives transcription requests
    #[serde(default)]
    pub agent: AgentConfig,
    /// Transcription request validation
    #[serde(default)]
    pub stt: SttConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
