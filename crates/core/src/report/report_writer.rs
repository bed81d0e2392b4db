use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportWriteError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output file path for a report:
/// `<audio stem>_transcription_<YYYYMMDD_HHMMSS>.txt`, placed next to the
/// source audio unless an explicit output directory is given.
pub fn report_path(
    audio_path: &Path,
    output_dir: Option<&Path>,
    generated_at: NaiveDateTime,
) -> PathBuf {
    let stem = audio_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| audio_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let timestamp = generated_at.format("%Y%m%d_%H%M%S");
    dir.join(format!("{stem}_transcription_{timestamp}.txt"))
}

pub fn write_report(path: &Path, report: &str) -> Result<(), ReportWriteError> {
    fs::write(path, report).map_err(|source| ReportWriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
