use serde::{Deserialize, Serialize};

/// A contiguous span of transcribed speech as emitted by the transcription
/// engine. `speaker` stays empty until the merge step attaches one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl TranscriptSegment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text: text.into(),
            speaker: None,
        }
    }

    /// Temporal midpoint, the instant used to look the segment up in the
    /// diarization timeline.
    pub fn midpoint(&self) -> f64 {
        (self.start_seconds + self.end_seconds) / 2.0
    }
}
