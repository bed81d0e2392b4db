pub mod diarization_engine;
pub mod duration_probe;
pub mod transcription_engine;
