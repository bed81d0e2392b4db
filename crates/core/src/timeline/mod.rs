pub mod conversation;
pub mod diarization_turn;
pub mod merger;
pub mod transcript_segment;
