//! Closed-set registries and the request schema for speech-to-text transcription
//!
//! Every option of the "create transcription" operation is drawn from a
//! [`ClosedSet`] that can test untrusted input at runtime. [`Validator`]
//! composes them into an accepted [`TranscriptionRequest`], checking field
//! types, ranges, and cross-field rules before anything reaches the wire.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod closed_set;
mod error;
mod language;
mod options;
mod types;
mod validate;

pub use closed_set::{ClosedSet, Enumerated, Members};
pub use error::{Result, ValidationError};
pub use language::{LANGUAGES, Language};
pub use options::{
    AUDIO_RESPONSE_FORMATS, AudioResponseFormat, Domain, TIMESTAMP_GRANULARITIES, TRANSCRIPTION_INCLUDES,
    TRANSCRIPTION_MODELS, TimestampGranularity, TranscriptionInclude, TranscriptionModel, is_member, members,
};
pub use types::{AudioFile, TranscriptionCandidate, TranscriptionRequest, TranscriptionRequestBuilder};
pub use validate::{ValidationPolicy, Validator, validate};
