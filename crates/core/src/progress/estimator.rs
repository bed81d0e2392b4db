use crate::progress::job_spec::AudioJobSpec;
use crate::progress::speed_table::SpeedTable;
use crate::shared::constants::{DIARIZATION_OVERHEAD_FACTOR, MODEL_LOAD_OVERHEAD_SECONDS};

/// Percent cap while a job is still running. 100% is reserved for the
/// completion event so a slower-than-estimated run never shows as finished.
pub const RUNNING_PERCENT_CAP: f64 = 99.0;

/// Raw percent a sample must exceed before its remaining-time estimate is
/// considered confident.
pub const CONFIDENCE_PERCENT_THRESHOLD: f64 = 5.0;

/// One time-based progress reading. Transient, recomputed on each poll.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSample {
    pub elapsed_seconds: f64,
    /// `None` when the predicted total is unknown and percent is not
    /// computable; callers then display elapsed time only.
    pub percent: Option<f64>,
    /// `None` when no prediction exists.
    pub remaining_seconds: Option<f64>,
    /// Whether enough of the job has run for `remaining_seconds` to be
    /// worth displaying. Exposed as a flag so display policy stays with
    /// the caller.
    pub confident: bool,
}

impl ProgressSample {
    /// Terminal 100% sample. Only the job-completion event produces this;
    /// [`sample_progress`] never does.
    pub fn completed(elapsed_seconds: f64) -> Self {
        Self {
            elapsed_seconds: elapsed_seconds.max(0.0),
            percent: Some(100.0),
            remaining_seconds: Some(0.0),
            confident: true,
        }
    }
}

/// Predict total job duration from the job spec and a throughput table.
///
/// Returns `0.0` for unknown-duration audio. Otherwise the prediction is
/// transcription time (`duration / factor`) plus a flat 30% surcharge when
/// diarization will run, plus a fixed model warm-up overhead. The result is
/// always finite and non-negative.
pub fn predict_total_seconds(spec: &AudioJobSpec, table: &SpeedTable) -> f64 {
    if spec.duration_seconds <= 0.0 {
        return 0.0;
    }

    let mut total = spec.duration_seconds / table.factor_for(spec.model);
    if spec.diarization_active() {
        total += DIARIZATION_OVERHEAD_FACTOR * spec.duration_seconds;
    }
    total += MODEL_LOAD_OVERHEAD_SECONDS;

    if total.is_finite() {
        total.max(0.0)
    } else {
        0.0
    }
}

/// Sample time-based progress against a prediction.
///
/// Pure and idempotent; the caller owns the clock and the polling cadence.
/// Percent is clamped to `[0, 99]` while running and a job that overruns its
/// prediction simply pins at 99 with zero remaining, never an error.
pub fn sample_progress(elapsed_seconds: f64, predicted_total_seconds: f64) -> ProgressSample {
    let elapsed = if elapsed_seconds.is_finite() {
        elapsed_seconds.max(0.0)
    } else {
        0.0
    };

    if !(predicted_total_seconds > 0.0) || !predicted_total_seconds.is_finite() {
        return ProgressSample {
            elapsed_seconds: elapsed,
            percent: None,
            remaining_seconds: None,
            confident: false,
        };
    }

    let raw_percent = elapsed / predicted_total_seconds * 100.0;
    ProgressSample {
        elapsed_seconds: elapsed,
        percent: Some(raw_percent.clamp(0.0, RUNNING_PERCENT_CAP)),
        remaining_seconds: Some((predicted_total_seconds - elapsed).max(0.0)),
        confident: raw_percent > CONFIDENCE_PERCENT_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::DEFAULT_SPEED_FACTOR;
    use crate::shared::whisper_model::WhisperModel;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn spec(duration: f64, model: WhisperModel, diarize: bool) -> AudioJobSpec {
        AudioJobSpec::new(duration, model, diarize, diarize)
    }

    // ── predict ─────────────────────────────────────────────────────

    #[test]
    fn test_predict_zero_duration_is_zero() {
        let table = SpeedTable::cpu();
        for model in WhisperModel::ALL {
            assert_eq!(predict_total_seconds(&spec(0.0, model, false), &table), 0.0);
            assert_eq!(predict_total_seconds(&spec(0.0, model, true), &table), 0.0);
        }
    }

    #[test]
    fn test_predict_base_model_cpu() {
        // 160s audio at 16x realtime = 10s, plus 5s warm-up.
        let table = SpeedTable::cpu();
        let predicted = predict_total_seconds(&spec(160.0, WhisperModel::Base, false), &table);
        assert_relative_eq!(predicted, 15.0);
    }

    #[test]
    fn test_predict_adds_diarization_surcharge() {
        let table = SpeedTable::cpu();
        let plain = predict_total_seconds(&spec(100.0, WhisperModel::Base, false), &table);
        let diarized = predict_total_seconds(&spec(100.0, WhisperModel::Base, true), &table);
        assert_relative_eq!(diarized - plain, 30.0);
    }

    #[test]
    fn test_predict_no_surcharge_without_token() {
        let table = SpeedTable::cpu();
        let without_token =
            AudioJobSpec::new(100.0, WhisperModel::Base, true, false);
        let plain = predict_total_seconds(&spec(100.0, WhisperModel::Base, false), &table);
        assert_relative_eq!(predict_total_seconds(&without_token, &table), plain);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_predict_monotonic_in_duration(#[case] diarize: bool) {
        let table = SpeedTable::cpu();
        for model in WhisperModel::ALL {
            let mut prev = 0.0;
            for duration in [1.0, 10.0, 60.0, 600.0, 7200.0] {
                let predicted = predict_total_seconds(&spec(duration, model, diarize), &table);
                assert!(predicted >= prev);
                prev = predicted;
            }
        }
    }

    #[test]
    fn test_predict_uncalibrated_model_uses_default_factor() {
        let table = SpeedTable::new("empty");
        let predicted = predict_total_seconds(&spec(320.0, WhisperModel::Large, false), &table);
        assert_relative_eq!(predicted, 320.0 / DEFAULT_SPEED_FACTOR + 5.0);
    }

    #[test]
    fn test_predict_never_negative_or_nan() {
        let table = SpeedTable::cpu();
        for duration in [-10.0, 0.0, f64::NAN, 1e12] {
            let predicted = predict_total_seconds(&spec(duration, WhisperModel::Large, true), &table);
            assert!(predicted.is_finite());
            assert!(predicted >= 0.0);
        }
    }

    // ── sample ──────────────────────────────────────────────────────

    #[test]
    fn test_sample_unknown_total_has_no_percent() {
        let sample = sample_progress(12.0, 0.0);
        assert_eq!(sample.percent, None);
        assert_eq!(sample.remaining_seconds, None);
        assert!(!sample.confident);
        assert_relative_eq!(sample.elapsed_seconds, 12.0);
    }

    #[test]
    fn test_sample_midway() {
        let sample = sample_progress(50.0, 100.0);
        assert_relative_eq!(sample.percent.unwrap(), 50.0);
        assert_relative_eq!(sample.remaining_seconds.unwrap(), 50.0);
        assert!(sample.confident);
    }

    #[rstest]
    #[case(100.0, 100.0)]
    #[case(150.0, 100.0)]
    #[case(1e9, 100.0)]
    fn test_sample_caps_at_99_on_overrun(#[case] elapsed: f64, #[case] total: f64) {
        let sample = sample_progress(elapsed, total);
        assert_relative_eq!(sample.percent.unwrap(), 99.0);
        assert_relative_eq!(sample.remaining_seconds.unwrap(), 0.0);
    }

    #[test]
    fn test_sample_never_reaches_100_before_completion() {
        for elapsed in 0..2000 {
            let sample = sample_progress(f64::from(elapsed) / 10.0, 100.0);
            assert!(sample.percent.unwrap() <= 99.0);
        }
    }

    #[test]
    fn test_sample_low_elapsed_not_confident() {
        let sample = sample_progress(4.0, 100.0);
        assert!(!sample.confident);
        // Remaining is still exposed; suppression is the caller's choice.
        assert_relative_eq!(sample.remaining_seconds.unwrap(), 96.0);
    }

    #[test]
    fn test_sample_confidence_boundary_is_exclusive() {
        assert!(!sample_progress(5.0, 100.0).confident);
        assert!(sample_progress(5.01, 100.0).confident);
    }

    #[test]
    fn test_sample_negative_elapsed_clamped() {
        let sample = sample_progress(-1.0, 100.0);
        assert_relative_eq!(sample.elapsed_seconds, 0.0);
        assert_relative_eq!(sample.percent.unwrap(), 0.0);
    }

    #[test]
    fn test_sample_is_idempotent() {
        assert_eq!(sample_progress(33.3, 90.0), sample_progress(33.3, 90.0));
    }

    #[test]
    fn test_completed_sample_is_exactly_100() {
        let done = ProgressSample::completed(42.0);
        assert_eq!(done.percent, Some(100.0));
        assert_eq!(done.remaining_seconds, Some(0.0));
        assert!(done.confident);
    }
}
