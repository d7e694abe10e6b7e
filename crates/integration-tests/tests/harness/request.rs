//! Candidate fixtures

use serde_json::Value;
use stt::{AudioFile, TranscriptionCandidate};

/// A short WAV-named payload; validation never looks inside it
pub fn audio() -> AudioFile {
    AudioFile::new(vec![0x52, 0x49, 0x46, 0x46], "meeting.wav")
}

/// Parse `body` as a request and attach [`audio`]
pub fn candidate(body: Value) -> TranscriptionCandidate {
    TranscriptionCandidate::from_json(body)
        .expect("request body is an object of known fields")
        .with_file(audio())
}
