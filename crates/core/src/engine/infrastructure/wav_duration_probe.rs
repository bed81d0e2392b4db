use std::path::Path;

use crate::engine::domain::duration_probe::DurationProbe;

/// Duration probe that reads WAV headers via `hound`.
///
/// Anything that isn't a readable WAV file (other containers, missing file,
/// truncated header) yields `0.0` per the probe contract; callers already
/// treat unknown duration as "no ETA".
pub struct WavDurationProbe;

impl DurationProbe for WavDurationProbe {
    fn duration_seconds(&self, audio_path: &Path) -> f64 {
        match hound::WavReader::open(audio_path) {
            Ok(reader) => {
                let spec = reader.spec();
                if spec.sample_rate == 0 {
                    return 0.0;
                }
                f64::from(reader.duration()) / f64::from(spec.sample_rate)
            }
            Err(err) => {
                log::debug!(
                    "duration probe failed for {}: {err}",
                    audio_path.display()
                );
                0.0
            }
        }
    }
}
