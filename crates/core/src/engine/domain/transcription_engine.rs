use std::path::Path;

use crate::timeline::transcript_segment::TranscriptSegment;

/// Everything a transcription engine produces for one audio file.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
    pub language: String,
}

/// Domain interface for speech-to-text transcription.
///
/// Implementations wrap an external engine; failures (missing binary,
/// engine crash) surface as errors and are fatal for the job.
pub trait TranscriptionEngine: Send {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<TranscriptionResult, Box<dyn std::error::Error>>;
}
