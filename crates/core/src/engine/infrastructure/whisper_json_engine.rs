use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::domain::transcription_engine::{TranscriptionEngine, TranscriptionResult};
use crate::timeline::transcript_segment::TranscriptSegment;

#[derive(Error, Debug)]
pub enum TranscriptPayloadError {
    #[error("failed to read transcript payload {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed transcript payload {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("segment {index} in {path} has non-finite timing")]
    NonFiniteTiming { path: PathBuf, index: usize },
}

/// Raw whisper result as the engine emits it: a loosely-structured payload
/// we normalize into typed records at this boundary.
#[derive(Deserialize)]
struct RawWhisperResult {
    #[serde(default)]
    text: String,
    #[serde(default)]
    segments: Vec<RawSegment>,
    language: Option<String>,
}

#[derive(Deserialize)]
struct RawSegment {
    start: f64,
    end: f64,
    #[serde(default)]
    text: String,
}

/// Parse and normalize a whisper JSON payload file.
///
/// Normalization: reversed `start`/`end` pairs are swapped so the
/// `end >= start` invariant holds, non-finite timings are rejected, and a
/// missing language defaults to `"unknown"`.
pub fn parse_payload(path: &Path) -> Result<TranscriptionResult, TranscriptPayloadError> {
    let data = fs::read_to_string(path).map_err(|source| TranscriptPayloadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawWhisperResult =
        serde_json::from_str(&data).map_err(|source| TranscriptPayloadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut segments = Vec::with_capacity(raw.segments.len());
    for (index, raw_segment) in raw.segments.into_iter().enumerate() {
        if !raw_segment.start.is_finite() || !raw_segment.end.is_finite() {
            return Err(TranscriptPayloadError::NonFiniteTiming {
                path: path.to_path_buf(),
                index,
            });
        }
        let (start, end) = if raw_segment.end >= raw_segment.start {
            (raw_segment.start, raw_segment.end)
        } else {
            (raw_segment.end, raw_segment.start)
        };
        segments.push(TranscriptSegment::new(start, end, raw_segment.text));
    }

    Ok(TranscriptionResult {
        text: raw.text,
        segments,
        language: raw.language.unwrap_or_else(|| "unknown".to_string()),
    })
}

/// Transcription "engine" backed by a pre-computed whisper JSON payload.
///
/// Used when transcription already ran elsewhere and only alignment and
/// report generation remain; the audio path argument is ignored.
pub struct WhisperJsonEngine {
    payload_path: PathBuf,
}

impl WhisperJsonEngine {
    pub fn new(payload_path: impl Into<PathBuf>) -> Self {
        Self {
            payload_path: payload_path.into(),
        }
    }
}

impl TranscriptionEngine for WhisperJsonEngine {
    fn transcribe(
        &self,
        _audio_path: &Path,
    ) -> Result<TranscriptionResult, Box<dyn std::error::Error>> {
        Ok(parse_payload(&self.payload_path)?)
    }
}
