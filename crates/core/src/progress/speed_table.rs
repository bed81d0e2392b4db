use std::collections::HashMap;

use crate::shared::constants::DEFAULT_SPEED_FACTOR;
use crate::shared::whisper_model::WhisperModel;

/// Per-model transcription throughput calibration.
///
/// A factor of `N` means the engine transcribes roughly `N` seconds of audio
/// per wall-clock second, so larger models carry smaller factors. Actual
/// throughput is hardware- and backend-dependent; these tables are
/// heuristics for ETA display, not measurements, which is why the table is
/// injected into the estimator instead of hardcoded there.
#[derive(Clone, Debug)]
pub struct SpeedTable {
    backend_name: String,
    factors: HashMap<WhisperModel, f64>,
}

impl SpeedTable {
    pub fn new(backend_name: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
            factors: HashMap::new(),
        }
    }

    /// Calibration for a CPU-only whisper backend.
    pub fn cpu() -> Self {
        Self::new("cpu").with_factors([
            (WhisperModel::Tiny, 32.0),
            (WhisperModel::Base, 16.0),
            (WhisperModel::Small, 8.0),
            (WhisperModel::Medium, 4.0),
            (WhisperModel::Large, 2.0),
        ])
    }

    /// Calibration for a GPU/Metal-accelerated backend.
    pub fn accelerated() -> Self {
        Self::new("accelerated").with_factors([
            (WhisperModel::Tiny, 64.0),
            (WhisperModel::Base, 32.0),
            (WhisperModel::Small, 16.0),
            (WhisperModel::Medium, 8.0),
            (WhisperModel::Large, 4.0),
        ])
    }

    pub fn with_factor(mut self, model: WhisperModel, factor: f64) -> Self {
        self.factors.insert(model, factor);
        self
    }

    fn with_factors<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (WhisperModel, f64)>,
    {
        self.factors.extend(entries);
        self
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// Throughput factor for `model`, falling back to
    /// [`DEFAULT_SPEED_FACTOR`] when the model isn't calibrated. Zero,
    /// negative, or non-finite entries also fall back so the estimator can
    /// never divide by zero.
    pub fn factor_for(&self, model: WhisperModel) -> f64 {
        match self.factors.get(&model) {
            Some(&f) if f.is_finite() && f > 0.0 => f,
            _ => DEFAULT_SPEED_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cpu_table_orders_models_by_speed() {
        let table = SpeedTable::cpu();
        let mut prev = f64::INFINITY;
        for model in WhisperModel::ALL {
            let factor = table.factor_for(model);
            assert!(
                factor < prev,
                "{model} should be slower than the previous size"
            );
            prev = factor;
        }
    }

    #[test]
    fn test_accelerated_is_faster_than_cpu() {
        let cpu = SpeedTable::cpu();
        let gpu = SpeedTable::accelerated();
        for model in WhisperModel::ALL {
            assert!(gpu.factor_for(model) > cpu.factor_for(model));
        }
    }

    #[test]
    fn test_missing_model_falls_back_to_default() {
        let table = SpeedTable::new("custom");
        assert_relative_eq!(
            table.factor_for(WhisperModel::Large),
            DEFAULT_SPEED_FACTOR
        );
    }

    #[test]
    fn test_invalid_factor_falls_back_to_default() {
        let table = SpeedTable::new("custom")
            .with_factor(WhisperModel::Base, 0.0)
            .with_factor(WhisperModel::Small, -4.0)
            .with_factor(WhisperModel::Tiny, f64::NAN);
        assert_relative_eq!(table.factor_for(WhisperModel::Base), DEFAULT_SPEED_FACTOR);
        assert_relative_eq!(table.factor_for(WhisperModel::Small), DEFAULT_SPEED_FACTOR);
        assert_relative_eq!(table.factor_for(WhisperModel::Tiny), DEFAULT_SPEED_FACTOR);
    }

    #[test]
    fn test_override_takes_effect() {
        let table = SpeedTable::cpu().with_factor(WhisperModel::Base, 20.0);
        assert_relative_eq!(table.factor_for(WhisperModel::Base), 20.0);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(SpeedTable::cpu().backend_name(), "cpu");
        assert_eq!(SpeedTable::accelerated().backend_name(), "accelerated");
    }
}
