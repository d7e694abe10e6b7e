use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{Result, ValidationError},
    language::Language,
    options::{AudioResponseFormat, TimestampGranularity, TranscriptionInclude, TranscriptionModel},
    validate::Validator,
};

/// Audio payload supplied by the caller
///
/// The bytes are carried through untouched; nothing in this crate decodes them.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioFile {
    bytes: Vec<u8>,
    filename: String,
    content_type: String,
}

impl AudioFile {
    /// Wrap raw audio, deriving the content type from the file extension
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_owned();

        Self {
            bytes: bytes.into(),
            filename,
            content_type,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AudioFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type for the upload formats the service accepts
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "flac" => "audio/flac",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "mp4" | "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// A "create transcription" request as received, before validation
///
/// Everything except the audio is untrusted JSON.
#[derive(Debug, Clone, Default)]
pub struct TranscriptionCandidate {
    pub file: Option<AudioFile>,
    pub model: Option<Value>,
    pub language: Option<Value>,
    pub prompt: Option<Value>,
    pub response_format: Option<Value>,
    pub temperature: Option<Value>,
    pub include: Option<Value>,
    pub timestamp_granularities: Option<Value>,
    pub stream: Option<Value>,
}

impl TranscriptionCandidate {
    /// Split a parsed JSON body into candidate fields
    ///
    /// `null` is treated as absent. The audio travels separately, see
    /// [`TranscriptionCandidate::with_file`].
    pub fn from_json(body: Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(ValidationError::InvalidFieldType {
                field: "request",
                expected: "a JSON object",
            });
        };

        let mut candidate = Self::default();

        for (name, value) in fields {
            let slot = match name.as_str() {
                "model" => &mut candidate.model,
                "language" => &mut candidate.language,
                "prompt" => &mut candidate.prompt,
                "response_format" => &mut candidate.response_format,
                "temperature" => &mut candidate.temperature,
                "include" => &mut candidate.include,
                "timestamp_granularities" => &mut candidate.timestamp_granularities,
                "stream" => &mut candidate.stream,
                "file" => {
                    return Err(ValidationError::InvalidFieldType {
                        field: "file",
                        expected: "supplied separately from the JSON body",
                    });
                }
                _ => return Err(ValidationError::UnknownField(name.clone())),
            };

            if !value.is_null() {
                *slot = Some(value);
            }
        }

        Ok(candidate)
    }

    #[must_use]
    pub fn with_file(mut self, file: AudioFile) -> Self {
        self.file = Some(file);
        self
    }
}

/// An accepted transcription request, ready to hand to a transport
///
/// Only produced by validation, so every field is known to be consistent.
/// Serializes (without the audio) using the service's parameter names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionRequest {
    #[serde(skip)]
    pub(crate) file: AudioFile,
    pub(crate) model: TranscriptionModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) response_format: Option<AudioResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) include: Option<Vec<TranscriptionInclude>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) timestamp_granularities: Option<Vec<TimestampGranularity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) stream: Option<bool>,
}

impl TranscriptionRequest {
    /// Start a typed request; `build` runs the same checks as untrusted input
    pub fn builder(file: AudioFile, model: TranscriptionModel) -> TranscriptionRequestBuilder {
        TranscriptionRequestBuilder {
            request: Self {
                file,
                model,
                language: None,
                prompt: None,
                response_format: None,
                temperature: None,
                include: None,
                timestamp_granularities: None,
                stream: None,
            },
        }
    }

    pub fn file(&self) -> &AudioFile {
        &self.file
    }

    pub fn model(&self) -> TranscriptionModel {
        self.model
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn response_format(&self) -> Option<AudioResponseFormat> {
        self.response_format
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn include(&self) -> Option<&[TranscriptionInclude]> {
        self.include.as_deref()
    }

    pub fn timestamp_granularities(&self) -> Option<&[TimestampGranularity]> {
        self.timestamp_granularities.as_deref()
    }

    pub fn stream(&self) -> Option<bool> {
        self.stream
    }

    /// Release the audio payload, e.g. to move it into a multipart body
    pub fn into_file(self) -> AudioFile {
        self.file
    }

    /// Text parts of the multipart form, in the service's field spelling
    ///
    /// List fields repeat with a `[]` suffix, one part per element.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("model", self.model.to_string())];

        if let Some(language) = self.language {
            fields.push(("language", language.to_string()));
        }
        if let Some(prompt) = &self.prompt {
            fields.push(("prompt", prompt.clone()));
        }
        if let Some(response_format) = self.response_format {
            fields.push(("response_format", response_format.to_string()));
        }
        if let Some(temperature) = self.temperature {
            fields.push(("temperature", temperature.to_string()));
        }
        for include in self.include.iter().flatten() {
            fields.push(("include[]", include.to_string()));
        }
        for granularity in self.timestamp_granularities.iter().flatten() {
            fields.push(("timestamp_granularities[]", granularity.to_string()));
        }
        if let Some(stream) = self.stream {
            fields.push(("stream", stream.to_string()));
        }

        fields
    }
}

/// Typed construction of a [`TranscriptionRequest`]
#[derive(Debug, Clone)]
#[must_use]
pub struct TranscriptionRequestBuilder {
    request: TranscriptionRequest,
}

impl TranscriptionRequestBuilder {
    pub fn language(mut self, language: Language) -> Self {
        self.request.language = Some(language);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.request.prompt = Some(prompt.into());
        self
    }

    pub fn response_format(mut self, response_format: AudioResponseFormat) -> Self {
        self.request.response_format = Some(response_format);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.request.temperature = Some(temperature);
        self
    }

    pub fn include(mut self, include: impl IntoIterator<Item = TranscriptionInclude>) -> Self {
        self.request.include = Some(include.into_iter().collect());
        self
    }

    pub fn timestamp_granularities(
        mut self,
        granularities: impl IntoIterator<Item = TimestampGranularity>,
    ) -> Self {
        self.request.timestamp_granularities = Some(granularities.into_iter().collect());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.request.stream = Some(stream);
        self
    }

    /// Validate with the default policy
    pub fn build(self) -> Result<TranscriptionRequest> {
        self.build_with(&Validator::default())
    }

    pub fn build_with(self, validator: &Validator) -> Result<TranscriptionRequest> {
        validator.accept(self.request)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use insta::assert_debug_snapshot;
    use serde_json::json;

    use super::*;

    fn audio() -> AudioFile {
        AudioFile::new(vec![0_u8; 16], "clip.mp3")
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(audio().content_type(), "audio/mpeg");
        assert_eq!(AudioFile::new(Vec::new(), "a.WAV").content_type(), "audio/wav");
        assert_eq!(AudioFile::new(Vec::new(), "voice.m4a").content_type(), "audio/mp4");
        assert_eq!(AudioFile::new(Vec::new(), "noext").content_type(), "application/octet-stream");
        assert_eq!(
            AudioFile::new(Vec::new(), "x.bin").with_content_type("audio/ogg").content_type(),
            "audio/ogg"
        );
    }

    #[test]
    fn audio_debug_hides_bytes() {
        assert_debug_snapshot!(audio(), @r#"
        AudioFile {
            filename: "clip.mp3",
            content_type: "audio/mpeg",
            len: 16,
        }
        "#);
    }

    #[test]
    fn candidate_from_json_body() {
        let body: Value = serde_json::from_str(indoc! {r#"
            {
                "model": "gpt-4o-transcribe",
                "language": "de",
                "temperature": 0.2,
                "stream": null
            }
        "#})
        .unwrap();

        let candidate = TranscriptionCandidate::from_json(body).unwrap();
        assert_eq!(candidate.model, Some(json!("gpt-4o-transcribe")));
        assert_eq!(candidate.language, Some(json!("de")));
        assert_eq!(candidate.temperature, Some(json!(0.2)));
        assert_eq!(candidate.stream, None);
        assert!(candidate.file.is_none());
    }

    #[test]
    fn candidate_rejects_unknown_fields() {
        let err = TranscriptionCandidate::from_json(json!({ "model": "whisper-1", "speed": 2 })).unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("speed".to_owned()));
    }

    #[test]
    fn candidate_rejects_inline_file_and_non_objects() {
        let err = TranscriptionCandidate::from_json(json!({ "file": "AAAA" })).unwrap_err();
        assert_eq!(err.field(), "file");

        let err = TranscriptionCandidate::from_json(json!(["whisper-1"])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFieldType {
                field: "request",
                expected: "a JSON object",
            }
        );
    }

    #[test]
    fn builder_produces_accepted_request() {
        let request = TranscriptionRequest::builder(audio(), TranscriptionModel::Gpt4oTranscribe)
            .language("en".parse().unwrap())
            .prompt("Meeting notes")
            .response_format(AudioResponseFormat::Json)
            .temperature(0.0)
            .include([TranscriptionInclude::Logprobs, TranscriptionInclude::Logprobs])
            .stream(true)
            .build()
            .unwrap();

        assert_eq!(request.model(), TranscriptionModel::Gpt4oTranscribe);
        assert_eq!(request.language().map(Language::code), Some("en"));
        assert_eq!(request.prompt(), Some("Meeting notes"));
        assert_eq!(request.include(), Some(&[TranscriptionInclude::Logprobs][..]));
        assert_eq!(request.stream(), Some(true));
        assert_eq!(request.file().len(), 16);
    }

    #[test]
    fn builder_enforces_temperature_range() {
        let err = TranscriptionRequest::builder(audio(), TranscriptionModel::Whisper1)
            .temperature(f64::NAN)
            .build()
            .unwrap_err();
        assert_eq!(err.error_type(), "out_of_range_value");

        let err = TranscriptionRequest::builder(audio(), TranscriptionModel::Whisper1)
            .temperature(f64::INFINITY)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "temperature");
    }

    #[test]
    fn builder_enforces_combinations() {
        let err = TranscriptionRequest::builder(audio(), TranscriptionModel::Whisper1)
            .stream(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InconsistentFieldCombination { .. }));
    }

    #[test]
    fn serializes_without_audio() {
        let request = TranscriptionRequest::builder(audio(), TranscriptionModel::Gpt4oMiniTranscribe)
            .response_format(AudioResponseFormat::VerboseJson)
            .timestamp_granularities([TimestampGranularity::Segment, TimestampGranularity::Word])
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o-mini-transcribe",
                "response_format": "verbose_json",
                "timestamp_granularities": ["segment", "word"],
            })
        );
    }

    #[test]
    fn form_fields_follow_service_spelling() {
        let request = TranscriptionRequest::builder(audio(), TranscriptionModel::Whisper1)
            .language("fr".parse().unwrap())
            .response_format(AudioResponseFormat::VerboseJson)
            .temperature(0.5)
            .timestamp_granularities([TimestampGranularity::Word, TimestampGranularity::Segment])
            .stream(false)
            .build()
            .unwrap();

        assert_debug_snapshot!(request.form_fields(), @r#"
        [
            (
                "model",
                "whisper-1",
            ),
            (
                "language",
                "fr",
            ),
            (
                "response_format",
                "verbose_json",
            ),
            (
                "temperature",
                "0.5",
            ),
            (
                "timestamp_granularities[]",
                "word",
            ),
            (
                "timestamp_granularities[]",
                "segment",
            ),
            (
                "stream",
                "false",
            ),
        ]
        "#);
    }

    #[test]
    fn into_file_releases_audio() {
        let request = TranscriptionRequest::builder(audio(), TranscriptionModel::Whisper1)
            .build()
            .unwrap();
        assert_eq!(request.into_file(), audio());
    }
}
