use itertools::Itertools;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    closed_set::Enumerated,
    error::{Result, ValidationError},
    options::{AudioResponseFormat, TranscriptionInclude},
    types::{TranscriptionCandidate, TranscriptionRequest},
};

const TEMPERATURE_RANGE: &str = "[0, 1]";

/// Tunable cross-field rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Response formats that cannot carry log probabilities
    #[serde(default = "default_logprobs_incompatible_formats")]
    pub logprobs_incompatible_formats: Vec<AudioResponseFormat>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            logprobs_incompatible_formats: default_logprobs_incompatible_formats(),
        }
    }
}

impl ValidationPolicy {
    /// Whether `format` may be combined with the `logprobs` include option
    pub fn permits_logprobs(&self, format: AudioResponseFormat) -> bool {
        !self.logprobs_incompatible_formats.contains(&format)
    }
}

fn default_logprobs_incompatible_formats() -> Vec<AudioResponseFormat> {
    vec![AudioResponseFormat::Text, AudioResponseFormat::Srt, AudioResponseFormat::Vtt]
}

/// Validate `candidate` with the default policy
pub fn validate(candidate: TranscriptionCandidate) -> Result<TranscriptionRequest> {
    Validator::default().validate(candidate)
}

/// Turns untrusted candidates into accepted requests
///
/// Pure and stateless apart from its policy; share one across threads freely.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Accept or reject a candidate request
    ///
    /// Checks run in a fixed order and stop at the first failure: required
    /// fields, then each field in declaration order, then the cross-field rules.
    pub fn validate(&self, candidate: TranscriptionCandidate) -> Result<TranscriptionRequest> {
        let TranscriptionCandidate {
            file,
            model,
            language,
            prompt,
            response_format,
            temperature,
            include,
            timestamp_granularities,
            stream,
        } = candidate;

        let file = file.ok_or(ValidationError::MissingRequiredField("file"))?;
        let model = model.ok_or(ValidationError::MissingRequiredField("model"))?;

        let request = TranscriptionRequest {
            file,
            model: member("model", &model)?,
            language: language.map(|value| member("language", &value)).transpose()?,
            prompt: prompt.map(|value| string("prompt", value)).transpose()?,
            response_format: response_format
                .map(|value| member("response_format", &value))
                .transpose()?,
            temperature: temperature.map(|value| number_in_range("temperature", &value)).transpose()?,
            include: include.map(|value| member_list("include", &value)).transpose()?,
            timestamp_granularities: timestamp_granularities
                .map(|value| member_list("timestamp_granularities", &value))
                .transpose()?,
            stream: stream.map(|value| boolean("stream", &value)).transpose()?,
        };

        self.accept(request)
    }

    /// Final checks shared by untrusted and typed construction
    pub(crate) fn accept(&self, mut request: TranscriptionRequest) -> Result<TranscriptionRequest> {
        if let Some(temperature) = request.temperature {
            check_range("temperature", temperature)?;
        }

        self.check_combinations(&request)?;

        request.include = request.include.map(|items| items.into_iter().unique().collect());
        request.timestamp_granularities = request
            .timestamp_granularities
            .map(|items| items.into_iter().unique().collect());

        Ok(request)
    }

    fn check_combinations(&self, request: &TranscriptionRequest) -> Result<()> {
        let has_granularities = request
            .timestamp_granularities
            .as_ref()
            .is_some_and(|granularities| !granularities.is_empty());

        if has_granularities && request.response_format != Some(AudioResponseFormat::VerboseJson) {
            return Err(ValidationError::InconsistentFieldCombination {
                fields: ["timestamp_granularities", "response_format"],
                rule: "timestamp granularities require response_format \"verbose_json\"",
            });
        }

        if request.stream == Some(true) && !request.model.supports_streaming() {
            return Err(ValidationError::InconsistentFieldCombination {
                fields: ["stream", "model"],
                rule: "streaming is not supported for whisper-1",
            });
        }

        let wants_logprobs = request
            .include
            .as_ref()
            .is_some_and(|include| include.contains(&TranscriptionInclude::Logprobs));

        if wants_logprobs
            && let Some(format) = request.response_format
            && !self.policy.permits_logprobs(format)
        {
            return Err(ValidationError::InconsistentFieldCombination {
                fields: ["include", "response_format"],
                rule: "log probabilities require a structured response format",
            });
        }

        Ok(())
    }
}

fn member<T: Enumerated>(field: &'static str, value: &Value) -> Result<T> {
    let set = T::closed_set();

    let invalid = || ValidationError::InvalidEnumMember {
        field,
        value: value.clone(),
        domain: set.domain(),
    };

    if !set.is_member(value) {
        return Err(invalid());
    }

    value.as_str().and_then(T::from_token).ok_or_else(invalid)
}

fn member_list<T: Enumerated>(field: &'static str, value: &Value) -> Result<Vec<T>> {
    let items = value.as_array().ok_or(ValidationError::InvalidFieldType {
        field,
        expected: "an array of strings",
    })?;

    items.iter().map(|item| member(field, item)).collect()
}

fn string(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        _ => Err(ValidationError::InvalidFieldType {
            field,
            expected: "a string",
        }),
    }
}

fn boolean(field: &'static str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or(ValidationError::InvalidFieldType {
        field,
        expected: "a boolean",
    })
}

fn number_in_range(field: &'static str, value: &Value) -> Result<f64> {
    let number = value.as_f64().ok_or(ValidationError::InvalidFieldType {
        field,
        expected: "a number",
    })?;

    check_range(field, number)
}

fn check_range(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRangeValue {
            field,
            value,
            range: TEMPERATURE_RANGE,
        })
    }
}
