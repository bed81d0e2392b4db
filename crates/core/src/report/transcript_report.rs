use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::shared::time_format::format_timestamp;
use crate::shared::whisper_model::WhisperModel;
use crate::timeline::conversation::{group_into_conversation, render_conversation};
use crate::timeline::transcript_segment::TranscriptSegment;

const RULE_HEAVY: &str =
    "============================================================";
const RULE_LIGHT: &str =
    "------------------------------------------------------------";

/// Everything the report header needs.
///
/// `generated_at` is injected rather than read from the clock here, so the
/// whole render is reproducible: identical inputs give byte-identical text.
#[derive(Clone, Debug)]
pub struct ReportContext {
    pub source_path: PathBuf,
    pub language: String,
    pub model: WhisperModel,
    pub backend_name: String,
    pub diarization_ran: bool,
    pub generated_at: NaiveDateTime,
}

/// Render the full transcription report.
///
/// Body selection is a fixed priority order: if any segment carries a
/// speaker the conversation view wins; otherwise a timestamped segment list
/// if requested and available; otherwise just the full text.
pub fn render_report(
    ctx: &ReportContext,
    segments: &[TranscriptSegment],
    full_text: &str,
    include_timestamps: bool,
) -> String {
    let mut out = String::new();

    out.push_str(RULE_HEAVY);
    out.push('\n');
    out.push_str("AUDIO TRANSCRIPTION\n");
    out.push_str(RULE_HEAVY);
    out.push_str("\n\n");

    let basename = ctx
        .source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    out.push_str(&format!("Source File: {basename}\n"));
    out.push_str(&format!("Detected Language: {}\n", ctx.language));
    out.push_str(&format!("Model Used: {}\n", ctx.model));
    out.push_str(&format!("Backend: {}\n", ctx.backend_name));
    out.push_str(&format!(
        "Speaker Identification: {}\n",
        if ctx.diarization_ran { "Yes" } else { "No" }
    ));
    out.push_str(&format!(
        "Transcribed: {}\n",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push('\n');
    out.push_str(RULE_LIGHT);
    out.push_str("\n\n");

    let has_speakers = segments.iter().any(|s| s.speaker.is_some());
    if has_speakers {
        out.push_str("CONVERSATION:\n\n");
        let turns = group_into_conversation(segments);
        out.push_str(&render_conversation(&turns, include_timestamps));
        out.push_str("\n\n");
        out.push_str(RULE_LIGHT);
        out.push_str("\n\n");
    } else if include_timestamps && !segments.is_empty() {
        out.push_str("TIMESTAMPED TRANSCRIPTION:\n\n");
        for segment in segments {
            out.push_str(&format!(
                "[{} --> {}]\n{}\n\n",
                format_timestamp(segment.start_seconds),
                format_timestamp(segment.end_seconds),
                segment.text.trim()
            ));
        }
        out.push_str(RULE_LIGHT);
        out.push_str("\n\n");
    }

    out.push_str("FULL TRANSCRIPTION:\n\n");
    out.push_str(full_text.trim());
    out.push_str("\n\n");
    out.push_str(RULE_HEAVY);
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx(diarization_ran: bool) -> ReportContext {
        ReportContext {
            source_path: PathBuf::from("/audio/standup.wav"),
            language: "en".to_string(),
            model: WhisperModel::Base,
            backend_name: "cpu".to_string(),
            diarization_ran,
            generated_at: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    fn seg(start: f64, end: f64, text: &str, speaker: Option<&str>) -> TranscriptSegment {
        let mut segment = TranscriptSegment::new(start, end, text);
        segment.speaker = speaker.map(String::from);
        segment
    }

    #[test]
    fn test_header_fields() {
        let report = render_report(&ctx(true), &[], "hello", false);
        assert!(report.starts_with(RULE_HEAVY));
        assert!(report.contains("AUDIO TRANSCRIPTION\n"));
        assert!(report.contains("Source File: standup.wav\n"));
        assert!(report.contains("Detected Language: en\n"));
        assert!(report.contains("Model Used: base\n"));
        assert!(report.contains("Backend: cpu\n"));
        assert!(report.contains("Speaker Identification: Yes\n"));
        assert!(report.contains("Transcribed: 2024-03-15 10:30:00\n"));
    }

    #[test]
    fn test_speaker_identification_no() {
        let report = render_report(&ctx(false), &[], "hello", false);
        assert!(report.contains("Speaker Identification: No\n"));
    }

    #[test]
    fn test_conversation_takes_priority_over_timestamps() {
        let segments = vec![
            seg(0.0, 2.0, " hi ", Some("SPEAKER_00")),
            seg(2.0, 4.0, "hello", Some("SPEAKER_01")),
        ];
        let report = render_report(&ctx(true), &segments, "hi hello", true);
        assert!(report.contains("CONVERSATION:\n\n"));
        assert!(!report.contains("TIMESTAMPED TRANSCRIPTION:"));
        assert!(report.contains("[00:00] Speaker 1:\n  hi\n"));
        assert!(report.contains("[00:02] Speaker 2:\n  hello\n"));
    }

    #[test]
    fn test_timestamped_body_without_speakers() {
        let segments = vec![seg(0.0, 1.25, " first ", None), seg(1.25, 3.0, "second", None)];
        let report = render_report(&ctx(false), &segments, "first second", true);
        assert!(report.contains("TIMESTAMPED TRANSCRIPTION:\n\n"));
        assert!(report.contains("[00:00:00.000 --> 00:00:01.250]\nfirst\n\n"));
        assert!(report.contains("[00:00:01.250 --> 00:00:03.000]\nsecond\n\n"));
    }

    #[test]
    fn test_plain_body_when_timestamps_disabled() {
        let segments = vec![seg(0.0, 1.0, "only", None)];
        let report = render_report(&ctx(false), &segments, "  only  ", false);
        assert!(!report.contains("CONVERSATION:"));
        assert!(!report.contains("TIMESTAMPED TRANSCRIPTION:"));
        assert!(report.contains("FULL TRANSCRIPTION:\n\nonly\n\n"));
    }

    #[test]
    fn test_plain_body_when_no_segments() {
        // Timestamps requested but the engine produced no segments.
        let report = render_report(&ctx(false), &[], "text", true);
        assert!(!report.contains("TIMESTAMPED TRANSCRIPTION:"));
    }

    #[test]
    fn test_full_text_is_trimmed_and_footer_closes() {
        let report = render_report(&ctx(false), &[], "  padded text \n", false);
        assert!(report.contains("FULL TRANSCRIPTION:\n\npadded text\n\n"));
        assert!(report.ends_with(&format!("{RULE_HEAVY}\n")));
    }

    #[test]
    fn test_render_is_byte_stable() {
        let segments = vec![seg(0.0, 2.0, "a", Some("SPEAKER_00"))];
        let a = render_report(&ctx(true), &segments, "a", true);
        let b = render_report(&ctx(true), &segments, "a", true);
        assert_eq!(a, b);
    }
}
