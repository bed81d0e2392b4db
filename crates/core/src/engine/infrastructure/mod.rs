pub mod diarization_json_engine;
pub mod wav_duration_probe;
pub mod whisper_command_engine;
pub mod whisper_json_engine;
