use std::path::Path;

/// Audio container formats the transcription engines accept.
pub const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "m4a", "flac", "ogg", "wma", "aac", "opus", "webm", "mp4",
];

/// Flat warm-up cost charged to every job regardless of model size.
pub const MODEL_LOAD_OVERHEAD_SECONDS: f64 = 5.0;

/// Fraction of audio duration added when speaker diarization runs.
/// Empirical guess carried over from field observation, not calibrated.
pub const DIARIZATION_OVERHEAD_FACTOR: f64 = 0.3;

/// Throughput factor used when a model is missing from the speed table.
pub const DEFAULT_SPEED_FACTOR: f64 = 16.0;

/// Speaker label assigned to segments no diarization turn covers.
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Progress-sampling cadence of the interval poller.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

pub fn is_supported_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_lowercase();
            SUPPORTED_AUDIO_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}
