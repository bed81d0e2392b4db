use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::progress::estimator::sample_progress;
use crate::progress::progress_sink::ProgressSink;
use crate::shared::constants::DEFAULT_POLL_INTERVAL_MS;

/// Timer-driven progress polling on a dedicated thread.
///
/// The job itself runs on the caller's execution track; the poller samples
/// elapsed time against the predicted total on a fixed cadence and pushes
/// each reading into the sink. Cancellation stops the loop before the next
/// tick, so no samples are scheduled after `stop()` returns.
pub struct IntervalPoller {
    interval: Duration,
}

impl IntervalPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Start polling against `predicted_total_seconds`, returning ownership
    /// of the sink to the handle so the caller can keep using it after the
    /// job completes.
    pub fn start(
        &self,
        predicted_total_seconds: f64,
        mut sink: Box<dyn ProgressSink>,
    ) -> PollerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let interval = self.interval;
        let flag = cancelled.clone();

        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            loop {
                // A stop message or a dropped sender both end the loop;
                // only a timeout means "take another sample".
                match stop_rx.recv_timeout(interval) {
                    Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
                    _ => break,
                }
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                let elapsed = started.elapsed().as_secs_f64();
                sink.push(&sample_progress(elapsed, predicted_total_seconds));
            }
            sink
        });

        PollerHandle {
            cancelled,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Default for IntervalPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }
}

/// Handle to a running poller thread.
pub struct PollerHandle {
    cancelled: Arc<AtomicBool>,
    stop_tx: Option<crossbeam_channel::Sender<()>>,
    handle: Option<JoinHandle<Box<dyn ProgressSink>>>,
}

impl PollerHandle {
    /// Stop polling and wait for the thread, returning the sink.
    pub fn stop(mut self) -> Box<dyn ProgressSink> {
        self.cancelled.store(true, Ordering::Relaxed);
        self.stop_tx.take();
        self.handle
            .take()
            .expect("poller thread already joined")
            .join()
            .expect("poller thread panicked")
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
