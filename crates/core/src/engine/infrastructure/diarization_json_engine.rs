use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::domain::diarization_engine::DiarizationEngine;
use crate::timeline::diarization_turn::DiarizationTurn;

#[derive(Error, Debug)]
pub enum DiarizationPayloadError {
    #[error("failed to read diarization payload {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed diarization payload {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("turn {index} in {path} has non-finite timing")]
    NonFiniteTiming { path: PathBuf, index: usize },
}

/// One turn in a diarization JSON export. `label` is accepted as an alias
/// for `speaker` since exporters disagree on the field name.
#[derive(Deserialize)]
struct RawTurn {
    start: f64,
    end: f64,
    #[serde(alias = "label")]
    speaker: String,
}

/// Parse and normalize a diarization JSON export (an array of
/// `{start, end, speaker}` objects, in the engine's emission order).
///
/// Input order is preserved exactly: the downstream overlap tie-break
/// depends on it. Reversed spans are swapped, non-finite timings rejected.
pub fn parse_payload(path: &Path) -> Result<Vec<DiarizationTurn>, DiarizationPayloadError> {
    let data = fs::read_to_string(path).map_err(|source| DiarizationPayloadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<RawTurn> =
        serde_json::from_str(&data).map_err(|source| DiarizationPayloadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut turns = Vec::with_capacity(raw.len());
    for (index, raw_turn) in raw.into_iter().enumerate() {
        if !raw_turn.start.is_finite() || !raw_turn.end.is_finite() {
            return Err(DiarizationPayloadError::NonFiniteTiming {
                path: path.to_path_buf(),
                index,
            });
        }
        let (start, end) = if raw_turn.end >= raw_turn.start {
            (raw_turn.start, raw_turn.end)
        } else {
            (raw_turn.end, raw_turn.start)
        };
        turns.push(DiarizationTurn::new(start, end, raw_turn.speaker));
    }

    Ok(turns)
}

/// Diarization "engine" backed by a pre-computed JSON export.
pub struct DiarizationJsonEngine {
    payload_path: PathBuf,
}

impl DiarizationJsonEngine {
    pub fn new(payload_path: impl Into<PathBuf>) -> Self {
        Self {
            payload_path: payload_path.into(),
        }
    }
}

impl DiarizationEngine for DiarizationJsonEngine {
    fn diarize(
        &self,
        _audio_path: &Path,
    ) -> Result<Vec<DiarizationTurn>, Box<dyn std::error::Error>> {
        Ok(parse_payload(&self.payload_path)?)
    }
}
