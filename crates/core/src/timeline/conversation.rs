use crate::shared::constants::UNKNOWN_SPEAKER;
use crate::shared::time_format::format_clock;
use crate::timeline::merger::format_speaker_label;
use crate::timeline::transcript_segment::TranscriptSegment;

/// One display block of consecutive same-speaker segments.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversationTurn {
    pub speaker_label: String,
    pub start_seconds: f64,
    pub lines: Vec<String>,
}

/// Fold consecutive same-speaker segments into conversation turns.
///
/// Grouping is adjacency-based: a speaker returning after someone else
/// starts a fresh turn, so `[A, A, B, A]` yields three turns, not two.
/// Segments without an assigned speaker group under [`UNKNOWN_SPEAKER`].
pub fn group_into_conversation(segments: &[TranscriptSegment]) -> Vec<ConversationTurn> {
    let mut turns: Vec<ConversationTurn> = Vec::new();
    let mut previous_speaker: Option<&str> = None;

    for segment in segments {
        let speaker = segment.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER);
        if previous_speaker != Some(speaker) {
            turns.push(ConversationTurn {
                speaker_label: format_speaker_label(speaker),
                start_seconds: segment.start_seconds,
                lines: Vec::new(),
            });
            previous_speaker = Some(speaker);
        }
        if let Some(turn) = turns.last_mut() {
            turn.lines.push(segment.text.trim().to_string());
        }
    }

    turns
}

/// Render conversation turns as text: a header line per turn
/// (`[MM:SS] Speaker 1:` with timestamps, `Speaker 1:` without), each
/// segment's text indented by two spaces, turns separated by a blank line.
pub fn render_conversation(turns: &[ConversationTurn], include_timestamps: bool) -> String {
    let mut blocks = Vec::with_capacity(turns.len());

    for turn in turns {
        let mut lines = Vec::with_capacity(turn.lines.len() + 1);
        if include_timestamps {
            lines.push(format!(
                "[{}] {}:",
                format_clock(turn.start_seconds),
                turn.speaker_label
            ));
        } else {
            lines.push(format!("{}:", turn.speaker_label));
        }
        for text in &turn.lines {
            lines.push(format!("  {text}"));
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}
