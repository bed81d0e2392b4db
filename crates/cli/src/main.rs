use std::path::PathBuf;
use std::process;

use clap::Parser;

use scriba_core::engine::domain::diarization_engine::DiarizationEngine;
use scriba_core::engine::domain::transcription_engine::TranscriptionEngine;
use scriba_core::engine::infrastructure::diarization_json_engine::DiarizationJsonEngine;
use scriba_core::engine::infrastructure::wav_duration_probe::WavDurationProbe;
use scriba_core::engine::infrastructure::whisper_command_engine::WhisperCommandEngine;
use scriba_core::engine::infrastructure::whisper_json_engine::WhisperJsonEngine;
use scriba_core::pipeline::transcribe_audio_use_case::TranscribeAudioUseCase;
use scriba_core::progress::progress_sink::LogProgressSink;
use scriba_core::progress::speed_table::SpeedTable;
use scriba_core::shared::time_format::format_human;
use scriba_core::shared::whisper_model::WhisperModel;

/// Audio transcription reports with speaker attribution.
#[derive(Parser)]
#[command(name = "scriba")]
struct Cli {
    /// Input audio file.
    input: PathBuf,

    /// Whisper model size: tiny, base, small, medium or large.
    #[arg(long, default_value = "base")]
    model: String,

    /// Throughput calibration for ETA display: cpu or accelerated.
    #[arg(long, default_value = "cpu")]
    backend: String,

    /// Omit timestamps from the report body.
    #[arg(long)]
    no_timestamps: bool,

    /// Pre-computed whisper JSON payload (skips running the engine).
    #[arg(long)]
    transcript_json: Option<PathBuf>,

    /// Diarization JSON export; enables speaker attribution.
    #[arg(long)]
    diarization_json: Option<PathBuf>,

    /// Directory for the report (defaults to beside the audio file).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Whisper executable to invoke.
    #[arg(long, default_value = "whisper")]
    whisper_bin: String,

    /// Force a source language instead of auto-detecting.
    #[arg(long)]
    language: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let model = WhisperModel::parse(&cli.model).ok_or_else(|| {
        format!(
            "unknown model '{}'; expected one of tiny/base/small/medium/large",
            cli.model
        )
    })?;
    let speed_table = parse_backend(&cli.backend)?;
    log::debug!(
        "model={model}, backend={}, diarization={}",
        speed_table.backend_name(),
        cli.diarization_json.is_some()
    );
    let engine = build_engine(&cli, model);
    let diarizer: Option<Box<dyn DiarizationEngine>> = cli
        .diarization_json
        .as_ref()
        .map(|path| Box::new(DiarizationJsonEngine::new(path)) as Box<dyn DiarizationEngine>);

    let use_case = TranscribeAudioUseCase::new(
        engine,
        diarizer,
        Box::new(WavDurationProbe),
        speed_table,
        model,
        !cli.no_timestamps,
    );

    let outcome = use_case.run(
        &cli.input,
        cli.output_dir.as_deref(),
        Box::new(LogProgressSink::default()),
    )?;

    println!(
        "Transcribed {} ({} segments, {} identified speakers, language {}) in {}",
        cli.input.display(),
        outcome.segment_count,
        outcome.speaker_count,
        outcome.language,
        format_human(outcome.elapsed_seconds)
    );
    println!("Report: {}", outcome.output_path.display());

    Ok(())
}

fn parse_backend(name: &str) -> Result<SpeedTable, String> {
    match name {
        "cpu" => Ok(SpeedTable::cpu()),
        "accelerated" => Ok(SpeedTable::accelerated()),
        other => Err(format!(
            "unknown backend '{other}'; expected cpu or accelerated"
        )),
    }
}

fn build_engine(cli: &Cli, model: WhisperModel) -> Box<dyn TranscriptionEngine> {
    if let Some(ref payload) = cli.transcript_json {
        return Box::new(WhisperJsonEngine::new(payload));
    }
    let mut engine =
        WhisperCommandEngine::new(model, std::env::temp_dir()).with_binary(&cli.whisper_bin);
    if let Some(ref language) = cli.language {
        engine = engine.with_language(language);
    }
    Box::new(engine)
}
