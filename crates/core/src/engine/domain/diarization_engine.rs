use std::path::Path;

use crate::timeline::diarization_turn::DiarizationTurn;

/// Domain interface for speaker diarization.
///
/// Failures here (bad credential, unreachable model) are not fatal: the
/// orchestration layer catches them and degrades to speaker-less output.
pub trait DiarizationEngine: Send {
    fn diarize(&self, audio_path: &Path)
        -> Result<Vec<DiarizationTurn>, Box<dyn std::error::Error>>;
}
