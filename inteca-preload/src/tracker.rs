//! The preload progress tracker.

use crate::probe::DecodeProbe;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;

/// A snapshot of preload completion.
///
/// `succeeded` and `failed` only ever grow, so the percentage is
/// monotonically non-decreasing and tops out at exactly 100 once every
/// URL has settled one way or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadProgress {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl PreloadProgress {
    fn start(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
        }
    }

    /// URLs accounted for so far, success or failure.
    #[must_use]
    pub fn settled(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Completion percentage in `0..=100`. An empty URL set is complete
    /// from the start.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.settled() * 100 / self.total) as u8
    }

    /// True once every URL has settled exactly once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.settled() >= self.total
    }
}

/// Runs decode probes for a set of URLs and broadcasts progress.
pub struct PreloadTracker;

impl PreloadTracker {
    /// Starts one probe task per URL and returns a progress receiver.
    ///
    /// Probes run in parallel with no ordering requirement and no retries.
    /// Dropping the receiver abandons observation only; the probes still
    /// run to completion and their updates are discarded.
    pub fn start<P>(urls: Vec<String>, probe: Arc<P>) -> watch::Receiver<PreloadProgress>
    where
        P: DecodeProbe + 'static,
    {
        let total = urls.len();
        let (tx, rx) = watch::channel(PreloadProgress::start(total));
        let tx = Arc::new(tx);
        let progress = Arc::new(Mutex::new(PreloadProgress::start(total)));

        for url in urls {
            let probe = probe.clone();
            let progress = progress.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = probe.probe(&url).await;
                let snapshot = {
                    let mut progress = progress.lock().unwrap();
                    match &outcome {
                        Ok(()) => progress.succeeded += 1,
                        Err(err) => {
                            debug!(%url, error = %err, "image probe failed");
                            progress.failed += 1;
                        }
                    }
                    *progress
                };
                // Nobody may be listening anymore; that is fine.
                let _ = tx.send(snapshot);
            });
        }

        rx
    }
}
