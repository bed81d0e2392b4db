use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Local;
use thiserror::Error;

use crate::engine::domain::diarization_engine::DiarizationEngine;
use crate::engine::domain::duration_probe::DurationProbe;
use crate::engine::domain::transcription_engine::TranscriptionEngine;
use crate::progress::estimator::{predict_total_seconds, ProgressSample};
use crate::progress::infrastructure::interval_poller::IntervalPoller;
use crate::progress::job_spec::AudioJobSpec;
use crate::progress::progress_sink::ProgressSink;
use crate::progress::speed_table::SpeedTable;
use crate::report::report_writer::{report_path, write_report};
use crate::report::transcript_report::{render_report, ReportContext};
use crate::shared::constants::{is_supported_audio, DEFAULT_POLL_INTERVAL_MS, UNKNOWN_SPEAKER};
use crate::shared::whisper_model::WhisperModel;
use crate::timeline::merger::assign_speakers;

#[derive(Error, Debug)]
pub enum TranscribeJobError {
    #[error("audio file not found: {0}")]
    AudioNotFound(PathBuf),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Summary of a finished job.
#[derive(Clone, Debug)]
pub struct TranscriptionOutcome {
    pub output_path: PathBuf,
    pub language: String,
    pub text: String,
    pub segment_count: usize,
    pub speaker_count: usize,
    pub elapsed_seconds: f64,
}

/// End-to-end transcription job: probe duration, predict total time, poll
/// progress on a worker thread while the engine runs, align diarization
/// turns with transcript segments, render and write the report.
pub struct TranscribeAudioUseCase {
    engine: Box<dyn TranscriptionEngine>,
    diarizer: Option<Box<dyn DiarizationEngine>>,
    probe: Box<dyn DurationProbe>,
    speed_table: SpeedTable,
    model: WhisperModel,
    include_timestamps: bool,
    poll_interval: Duration,
}

impl TranscribeAudioUseCase {
    pub fn new(
        engine: Box<dyn TranscriptionEngine>,
        diarizer: Option<Box<dyn DiarizationEngine>>,
        probe: Box<dyn DurationProbe>,
        speed_table: SpeedTable,
        model: WhisperModel,
        include_timestamps: bool,
    ) -> Self {
        Self {
            engine,
            diarizer,
            probe,
            speed_table,
            model,
            include_timestamps,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn run(
        &self,
        audio_path: &Path,
        output_dir: Option<&Path>,
        sink: Box<dyn ProgressSink>,
    ) -> Result<TranscriptionOutcome, Box<dyn std::error::Error>> {
        if !audio_path.exists() {
            return Err(TranscribeJobError::AudioNotFound(audio_path.to_path_buf()).into());
        }
        if !is_supported_audio(audio_path) {
            return Err(TranscribeJobError::UnsupportedFormat(audio_path.to_path_buf()).into());
        }

        let duration = self.probe.duration_seconds(audio_path);
        if duration <= 0.0 {
            log::warn!(
                "unknown duration for {}; progress degrades to elapsed-only",
                audio_path.display()
            );
        }
        let diarization_requested = self.diarizer.is_some();
        let spec = AudioJobSpec::new(
            duration,
            self.model,
            diarization_requested,
            diarization_requested,
        );
        let predicted = predict_total_seconds(&spec, &self.speed_table);
        log::info!(
            "starting transcription of {} ({} model, predicted {:.0}s)",
            audio_path.display(),
            self.model,
            predicted
        );

        // The poller thread is the concurrent track; the engine blocks here.
        let started = Instant::now();
        let handle = IntervalPoller::new(self.poll_interval).start(predicted, sink);

        let result = self.engine.transcribe(audio_path)?;

        // Diarization failure degrades to speaker-less output, never fatal.
        let turns = match &self.diarizer {
            Some(diarizer) => match diarizer.diarize(audio_path) {
                Ok(turns) => turns,
                Err(err) => {
                    log::warn!("diarization unavailable, skipping speakers: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut segments = result.segments;
        if !turns.is_empty() {
            assign_speakers(&mut segments, &turns);
        }

        let elapsed = started.elapsed().as_secs_f64();
        let mut sink = handle.stop();
        sink.finished(&ProgressSample::completed(elapsed));

        let generated_at = Local::now().naive_local();
        let ctx = ReportContext {
            source_path: audio_path.to_path_buf(),
            language: result.language.clone(),
            model: self.model,
            backend_name: self.speed_table.backend_name().to_string(),
            diarization_ran: !turns.is_empty(),
            generated_at,
        };
        let report = render_report(&ctx, &segments, &result.text, self.include_timestamps);
        let output_path = report_path(audio_path, output_dir, generated_at);
        write_report(&output_path, &report)?;
        log::info!("report written to {}", output_path.display());

        let speakers: HashSet<&str> = segments
            .iter()
            .filter_map(|s| s.speaker.as_deref())
            .filter(|s| *s != UNKNOWN_SPEAKER)
            .collect();

        Ok(TranscriptionOutcome {
            output_path,
            language: result.language,
            text: result.text,
            segment_count: segments.len(),
            speaker_count: speakers.len(),
            elapsed_seconds: elapsed,
        })
    }
}
