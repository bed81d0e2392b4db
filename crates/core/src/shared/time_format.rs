/// Timestamp formatting for transcript output.
///
/// Two distinct formats are used in different places and are not
/// interchangeable: `HH:MM:SS.mmm` for segment-level timestamp ranges and
/// `MM:SS` for conversation-turn headers.

/// Format seconds as `HH:MM:SS.mmm` (zero-padded, millisecond precision).
///
/// Negative or non-finite input is clamped to zero.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = seconds % 60.0;
    format!("{hours:02}:{minutes:02}:{secs:06.3}")
}

/// Format seconds as `MM:SS` (zero-padded, no hour component).
///
/// Minutes grow past 59 for inputs over an hour.
pub fn format_clock(seconds: f64) -> String {
    let total = sanitize(seconds).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Human-readable duration for status lines: `42.0s`, `3m 5s`, `1h 2m`.
pub fn format_human(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else if seconds < 3600.0 {
        let mins = (seconds / 60.0).floor() as u64;
        let secs = (seconds % 60.0).floor() as u64;
        format!("{mins}m {secs}s")
    } else {
        let hours = (seconds / 3600.0).floor() as u64;
        let mins = ((seconds % 3600.0) / 60.0).floor() as u64;
        format!("{hours}h {mins}m")
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}
