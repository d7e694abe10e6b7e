//! Programmatic configuration builder for integration tests

use std::path::{Path, PathBuf};

use scribe_config::{AgentConfig, Config, LogFormat, SttConfig, TelemetryConfig};
use stt::{AudioResponseFormat, ValidationPolicy, Validator};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with the default policy
    pub fn new() -> Self {
        Self {
            config: Config {
                agent: AgentConfig::default(),
                stt: SttConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Rename the agent
    pub fn with_agent_name(mut self, name: &str) -> Self {
        self.config.agent.name = name.to_owned();
        self
    }

    /// Replace the formats that reject log probabilities
    pub fn with_logprobs_incompatible_formats(
        mut self,
        formats: impl IntoIterator<Item = AudioResponseFormat>,
    ) -> Self {
        self.config.stt.validation = ValidationPolicy {
            logprobs_incompatible_formats: formats.into_iter().collect(),
        };
        self
    }

    /// Set telemetry configuration
    pub fn with_telemetry(mut self, log_filter: &str, format: LogFormat) -> Self {
        self.config.telemetry = Some(TelemetryConfig {
            log_filter: log_filter.to_owned(),
            format,
        });
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }

    /// Build a validator from the configured policy
    pub fn validator(self) -> Validator {
        Validator::new(self.config.stt.validation)
    }
}

/// Write `contents` as `scribe.toml` under `dir`
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("scribe.toml");
    std::fs::write(&path, contents).expect("config file written");
    path
}
