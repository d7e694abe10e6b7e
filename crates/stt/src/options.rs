//! Option sets of the "create transcription" operation
//!
//! Each enum spells its members exactly as the service does, and its
//! registry is generated from those spellings so the two cannot drift.

use serde_json::Value;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display, EnumString, IntoStaticStr, VariantArray, VariantNames};

use crate::{
    closed_set::{ClosedSet, Enumerated},
    language::LANGUAGES,
};

/// Transcription model identifiers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    VariantArray,
    SerializeDisplay,
    DeserializeFromStr,
)]
pub enum TranscriptionModel {
    #[strum(serialize = "whisper-1")]
    Whisper1,
    #[strum(serialize = "gpt-4o-transcribe")]
    Gpt4oTranscribe,
    #[strum(serialize = "gpt-4o-mini-transcribe")]
    Gpt4oMiniTranscribe,
    #[strum(serialize = "gpt-4o-transcribe-diarize")]
    Gpt4oTranscribeDiarize,
}

pub static TRANSCRIPTION_MODELS: ClosedSet =
    ClosedSet::new("transcription model", <TranscriptionModel as VariantNames>::VARIANTS);

impl TranscriptionModel {
    /// Whether the service can stream results for this model
    pub const fn supports_streaming(self) -> bool {
        !matches!(self, Self::Whisper1)
    }
}

/// Output formats of a transcription
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    VariantArray,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum AudioResponseFormat {
    Json,
    Text,
    Srt,
    VerboseJson,
    Vtt,
    DiarizedJson,
}

pub static AUDIO_RESPONSE_FORMATS: ClosedSet =
    ClosedSet::new("audio response format", <AudioResponseFormat as VariantNames>::VARIANTS);

impl AudioResponseFormat {
    /// JSON formats that can carry per-token metadata
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::VerboseJson | Self::DiarizedJson)
    }

    /// Subtitle formats (SubRip, WebVTT)
    pub const fn is_subtitle(self) -> bool {
        matches!(self, Self::Srt | Self::Vtt)
    }
}

/// Additional information the service can include in a response
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    VariantArray,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum TranscriptionInclude {
    /// Log probabilities of the output tokens
    Logprobs,
}

pub static TRANSCRIPTION_INCLUDES: ClosedSet =
    ClosedSet::new("transcription include option", <TranscriptionInclude as VariantNames>::VARIANTS);

/// Timestamp granularities for `verbose_json` output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantNames,
    VariantArray,
    SerializeDisplay,
    DeserializeFromStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum TimestampGranularity {
    Word,
    Segment,
}

pub static TIMESTAMP_GRANULARITIES: ClosedSet =
    ClosedSet::new("timestamp granularity", <TimestampGranularity as VariantNames>::VARIANTS);

macro_rules! impl_enumerated {
    ($ty:ty => $set:ident) => {
        impl Enumerated for $ty {
            fn closed_set() -> &'static ClosedSet {
                &$set
            }

            fn token(self) -> &'static str {
                self.into()
            }

            fn from_token(token: &str) -> Option<Self> {
                token.parse().ok()
            }
        }
    };
}

impl_enumerated!(TranscriptionModel => TRANSCRIPTION_MODELS);
impl_enumerated!(AudioResponseFormat => AUDIO_RESPONSE_FORMATS);
impl_enumerated!(TranscriptionInclude => TRANSCRIPTION_INCLUDES);
impl_enumerated!(TimestampGranularity => TIMESTAMP_GRANULARITIES);

/// The closed domains known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantArray)]
#[strum(serialize_all = "snake_case")]
pub enum Domain {
    Language,
    Model,
    ResponseFormat,
    Include,
    TimestampGranularity,
}

impl Domain {
    pub fn closed_set(self) -> &'static ClosedSet {
        match self {
            Self::Language => &LANGUAGES,
            Self::Model => &TRANSCRIPTION_MODELS,
            Self::ResponseFormat => &AUDIO_RESPONSE_FORMATS,
            Self::Include => &TRANSCRIPTION_INCLUDES,
            Self::TimestampGranularity => &TIMESTAMP_GRANULARITIES,
        }
    }
}

/// Canonical members of `domain`, in declaration order
pub fn members(domain: Domain) -> &'static [&'static str] {
    domain.closed_set().members()
}

/// Whether an untrusted `value` is a string member of `domain`
pub fn is_member(domain: Domain, value: &Value) -> bool {
    domain.closed_set().is_member(value)
}
