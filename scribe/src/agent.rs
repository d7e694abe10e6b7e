use scribe_config::Config;
use stt::{TranscriptionCandidate, TranscriptionRequest, ValidationError, Validator};

/// A named worker that prepares transcription requests
pub struct Agent {
    name: String,
    validator: Validator,
}

impl Agent {
    pub fn new(name: impl Into<String>, validator: Validator) -> Self {
        Self {
            name: name.into(),
            validator,
        }
    }

    /// Build the agent described by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.agent.name.clone(),
            Validator::new(config.stt.validation.clone()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate a candidate, returning the request a transport would send
    pub fn run(&self, candidate: TranscriptionCandidate) -> Result<TranscriptionRequest, ValidationError> {
        tracing::info!(agent = %self.name, "agent running");

        match self.validator.validate(candidate) {
            Ok(request) => {
                tracing::info!(
                    agent = %self.name,
                    model = %request.model(),
                    audio_bytes = request.file().len(),
                    "transcription request accepted"
                );
                Ok(request)
            }
            Err(err) => {
                tracing::warn!(
                    agent = %self.name,
                    field = err.field(),
                    error_type = err.error_type(),
                    "transcription request rejected: {err}"
                );
                Err(err)
            }
        }
    }
}
