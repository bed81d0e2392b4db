use crate::shared::constants::UNKNOWN_SPEAKER;
use crate::timeline::diarization_turn::DiarizationTurn;
use crate::timeline::transcript_segment::TranscriptSegment;

/// Attach a speaker to every segment by locating which diarization turn
/// contains the segment's temporal midpoint.
///
/// When several turns overlap the midpoint, the first match in input order
/// wins. That tie-break is a compatibility guarantee: downstream output must
/// be reproducible run-to-run, so no "most overlapping" heuristics here.
/// Segments no turn covers get the [`UNKNOWN_SPEAKER`] sentinel.
pub fn assign_speakers(segments: &mut [TranscriptSegment], turns: &[DiarizationTurn]) {
    for segment in segments.iter_mut() {
        let midpoint = segment.midpoint();
        let speaker = turns
            .iter()
            .find(|turn| turn.contains(midpoint))
            .map(|turn| turn.speaker_id.clone())
            .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
        segment.speaker = Some(speaker);
    }
}

/// Human-friendly, 1-indexed speaker label.
///
/// `SPEAKER_00` → `Speaker 1`, `SPEAKER_11` → `Speaker 12`. Anything that
/// doesn't match the `SPEAKER_<digits>` shape (including the `Unknown`
/// sentinel) passes through unchanged.
pub fn format_speaker_label(raw_id: &str) -> String {
    if let Some(digits) = raw_id.strip_prefix("SPEAKER_") {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = digits.parse::<u64>() {
                return format!("Speaker {}", index + 1);
            }
        }
    }
    raw_id.to_string()
}
