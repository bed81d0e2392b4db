use std::fmt;

/// Whisper model sizes selectable for a transcription job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    pub const ALL: [WhisperModel; 5] = [
        WhisperModel::Tiny,
        WhisperModel::Base,
        WhisperModel::Small,
        WhisperModel::Medium,
        WhisperModel::Large,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }

    /// Human-readable trade-off summary shown in model pickers.
    pub fn description(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "Fastest, least accurate (~1GB RAM)",
            WhisperModel::Base => "Fast, good accuracy (~1.5GB RAM)",
            WhisperModel::Small => "Balanced speed/accuracy (~2.5GB RAM)",
            WhisperModel::Medium => "High accuracy, slower (~5GB RAM)",
            WhisperModel::Large => "Best accuracy, slowest (~10GB RAM)",
        }
    }

    pub fn parse(name: &str) -> Option<WhisperModel> {
        match name.trim().to_lowercase().as_str() {
            "tiny" => Some(WhisperModel::Tiny),
            "base" => Some(WhisperModel::Base),
            "small" => Some(WhisperModel::Small),
            "medium" => Some(WhisperModel::Medium),
            "large" => Some(WhisperModel::Large),
            _ => None,
        }
    }
}

impl fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
