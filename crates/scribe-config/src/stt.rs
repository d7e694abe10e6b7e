use serde::Deserialize;
use stt::ValidationPolicy;

/// Top-level STT configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Cross-field rules applied to every transcription request
    #[serde(default)]
    pub validation: ValidationPolicy,
}
