use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::engine::domain::transcription_engine::{TranscriptionEngine, TranscriptionResult};
use crate::engine::infrastructure::whisper_json_engine;
use crate::shared::whisper_model::WhisperModel;

#[derive(Error, Debug)]
pub enum WhisperCommandError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{binary} exited with {status}: {stderr}")]
    Failed {
        binary: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("expected engine output at {path} after a successful run")]
    MissingOutput { path: PathBuf },
    #[error(transparent)]
    Payload(#[from] whisper_json_engine::TranscriptPayloadError),
}

/// Transcription engine that shells out to the `whisper` executable and
/// reads back its JSON result file.
pub struct WhisperCommandEngine {
    binary: String,
    model: WhisperModel,
    language: Option<String>,
    output_dir: PathBuf,
}

impl WhisperCommandEngine {
    pub fn new(model: WhisperModel, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: "whisper".to_string(),
            model,
            language: None,
            output_dir: output_dir.into(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Force a source language instead of letting the engine detect one.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The engine writes `<audio stem>.json` into the output directory.
    fn payload_path_for(&self, audio_path: &Path) -> PathBuf {
        let stem = audio_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.output_dir.join(format!("{stem}.json"))
    }

    fn run(&self, audio_path: &Path) -> Result<TranscriptionResult, WhisperCommandError> {
        let mut command = Command::new(&self.binary);
        command
            .arg(audio_path)
            .arg("--model")
            .arg(self.model.as_str())
            .arg("--output_format")
            .arg("json")
            .arg("--output_dir")
            .arg(&self.output_dir)
            .arg("--verbose")
            .arg("False");
        if let Some(ref language) = self.language {
            command.arg("--language").arg(language);
        }

        log::debug!("running {} on {}", self.binary, audio_path.display());
        let output = command.output().map_err(|source| WhisperCommandError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(WhisperCommandError::Failed {
                binary: self.binary.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let payload_path = self.payload_path_for(audio_path);
        if !payload_path.exists() {
            return Err(WhisperCommandError::MissingOutput { path: payload_path });
        }
        Ok(whisper_json_engine::parse_payload(&payload_path)?)
    }
}

impl TranscriptionEngine for WhisperCommandEngine {
    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> Result<TranscriptionResult, Box<dyn std::error::Error>> {
        Ok(self.run(audio_path)?)
    }
}
