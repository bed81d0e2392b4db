use std::path::Path;

/// Domain interface for audio duration lookup.
///
/// Infallible by contract: any failure yields `0.0` (unknown duration),
/// which downstream consumers treat as "no ETA available".
pub trait DurationProbe: Send {
    fn duration_seconds(&self, audio_path: &Path) -> f64;
}
