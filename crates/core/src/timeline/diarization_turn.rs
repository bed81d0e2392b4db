use serde::{Deserialize, Serialize};

/// A contiguous interval the diarization engine attributed to one speaker.
///
/// Turns from a single run are not guaranteed non-overlapping across
/// speakers; overlap is resolved downstream by a deterministic
/// first-match rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiarizationTurn {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub speaker_id: String,
}

impl DiarizationTurn {
    pub fn new(start_seconds: f64, end_seconds: f64, speaker_id: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            speaker_id: speaker_id.into(),
        }
    }

    /// Inclusive on both ends: a midpoint landing exactly on a boundary
    /// belongs to this turn.
    pub fn contains(&self, instant: f64) -> bool {
        self.start_seconds <= instant && instant <= self.end_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_interior() {
        let turn = DiarizationTurn::new(1.0, 3.0, "SPEAKER_00");
        assert!(turn.contains(2.0));
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let turn = DiarizationTurn::new(1.0, 3.0, "SPEAKER_00");
        assert!(turn.contains(1.0));
        assert!(turn.contains(3.0));
    }

    #[test]
    fn test_outside_bounds() {
        let turn = DiarizationTurn::new(1.0, 3.0, "SPEAKER_00");
        assert!(!turn.contains(0.999));
        assert!(!turn.contains(3.001));
    }

    #[test]
    fn test_point_turn_contains_its_instant() {
        let turn = DiarizationTurn::new(2.0, 2.0, "SPEAKER_01");
        assert!(turn.contains(2.0));
        assert!(!turn.contains(2.1));
    }
}
