use crate::progress::estimator::ProgressSample;
use crate::shared::time_format::format_human;

/// Where progress samples go.
///
/// The estimator is thread-agnostic and owns no clock; the polling loop
/// pushes each reading into a sink so callers decide how samples reach
/// their display (log line, channel to a UI, nothing).
pub trait ProgressSink: Send {
    /// A periodic reading while the job runs.
    fn push(&mut self, sample: &ProgressSample);

    /// The terminal reading after the job finishes. Default: same as push.
    fn finished(&mut self, sample: &ProgressSample) {
        self.push(sample);
    }
}

/// Silent sink that discards all samples.
///
/// Used by tests and by callers that track completion some other way.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn push(&mut self, _sample: &ProgressSample) {}
}

/// Sink that logs each reading, throttled to every `every_nth` sample to
/// avoid flooding the log at a 500ms cadence.
pub struct LogProgressSink {
    every_nth: usize,
    seen: usize,
}

impl LogProgressSink {
    pub fn new(every_nth: usize) -> Self {
        Self {
            every_nth: every_nth.max(1),
            seen: 0,
        }
    }
}

impl Default for LogProgressSink {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ProgressSink for LogProgressSink {
    fn push(&mut self, sample: &ProgressSample) {
        self.seen += 1;
        if self.seen % self.every_nth != 0 {
            return;
        }
        match (sample.percent, sample.remaining_seconds) {
            (Some(pct), Some(remaining)) if sample.confident => {
                log::info!(
                    "Transcribing: {pct:.0}% (elapsed {}, ~{} remaining)",
                    format_human(sample.elapsed_seconds),
                    format_human(remaining)
                );
            }
            (Some(pct), _) => {
                log::info!(
                    "Transcribing: {pct:.0}% (elapsed {}, calculating remaining...)",
                    format_human(sample.elapsed_seconds)
                );
            }
            _ => {
                log::info!(
                    "Transcribing: elapsed {} (duration unknown)",
                    format_human(sample.elapsed_seconds)
                );
            }
        }
    }

    fn finished(&mut self, sample: &ProgressSample) {
        log::info!(
            "Transcription finished in {}",
            format_human(sample.elapsed_seconds)
        );
    }
}

/// Sink that forwards samples over a crossbeam channel, for callers that
/// consume progress on another thread.
pub struct ChannelProgressSink {
    tx: crossbeam_channel::Sender<ProgressSample>,
}

impl ChannelProgressSink {
    pub fn new(tx: crossbeam_channel::Sender<ProgressSample>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn push(&mut self, sample: &ProgressSample) {
        // Receiver gone means nobody is watching anymore; drop silently.
        let _ = self.tx.send(sample.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::estimator::sample_progress;

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullProgressSink;
        sink.push(&sample_progress(1.0, 10.0));
        sink.finished(&ProgressSample::completed(10.0));
    }

    #[test]
    fn test_channel_sink_forwards_samples() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut sink = ChannelProgressSink::new(tx);
        let sample = sample_progress(5.0, 10.0);
        sink.push(&sample);
        assert_eq!(rx.recv().unwrap(), sample);
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut sink = ChannelProgressSink::new(tx);
        sink.push(&sample_progress(5.0, 10.0));
    }

    #[test]
    fn test_log_sink_throttle_floor() {
        // every_nth of 0 must not panic with a modulo-by-zero.
        let mut sink = LogProgressSink::new(0);
        sink.push(&sample_progress(1.0, 10.0));
    }
}
