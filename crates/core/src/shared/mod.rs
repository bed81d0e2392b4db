pub mod constants;
pub mod time_format;
pub mod whisper_model;
