use crate::shared::whisper_model::WhisperModel;

/// Immutable description of one transcription request, created at job start.
///
/// `duration_seconds == 0.0` means the audio duration is unknown; ETA
/// display degrades to elapsed-only in that case.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioJobSpec {
    pub duration_seconds: f64,
    pub model: WhisperModel,
    pub diarization_enabled: bool,
    pub diarization_token_present: bool,
}

impl AudioJobSpec {
    /// Negative or non-finite durations are clamped to zero (unknown).
    pub fn new(
        duration_seconds: f64,
        model: WhisperModel,
        diarization_enabled: bool,
        diarization_token_present: bool,
    ) -> Self {
        let duration_seconds = if duration_seconds.is_finite() {
            duration_seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            duration_seconds,
            model,
            diarization_enabled,
            diarization_token_present,
        }
    }

    /// Diarization only actually runs when both the flag and a credential
    /// are present.
    pub fn diarization_active(&self) -> bool {
        self.diarization_enabled && self.diarization_token_present
    }
}
