//! Waiting at the edges of the pipeline.
//!
//! The extraction and forecast functions never wait. The two places that do
//! live here: polling until the chart markup shows up, and the single-shot
//! handoff that carries an extraction result across an execution-context
//! boundary. Both are bounded; neither retries the handoff itself.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::extract::ChartExtraction;

pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed-interval retry budget for markup readiness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_millis(500),
        }
    }
}

/// Calls `probe` until it yields a value or the attempts run out.
///
/// Sleeps `policy.interval` between attempts, never after the last one.
/// Returns whatever the last attempt observed.
pub fn poll_until_ready<T>(policy: PollPolicy, mut probe: impl FnMut() -> Option<T>) -> Option<T> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(found) = probe() {
            debug!(attempt, "poll target ready");
            return Some(found);
        }
        trace!(attempt, attempts, "poll target not ready");
        if attempt < attempts {
            thread::sleep(policy.interval);
        }
    }
    debug!(attempts, "poll budget exhausted; proceeding without target");
    None
}

/// Creates a single-shot response channel for one extraction request.
#[must_use]
pub fn response_channel() -> (ResponseSender, PendingResponse) {
    let (tx, rx) = bounded(1);
    (ResponseSender { tx }, PendingResponse { rx })
}

/// Responding half. Consumed on use, so at most one response is delivered.
#[derive(Debug)]
pub struct ResponseSender {
    tx: Sender<Option<ChartExtraction>>,
}

impl ResponseSender {
    pub fn respond(self, extraction: Option<ChartExtraction>) -> ChartResult<()> {
        self.tx
            .send(extraction)
            .map_err(|_| ChartError::Disconnected)
    }
}

/// Requesting half: waits for exactly one response or the timeout.
#[derive(Debug)]
pub struct PendingResponse {
    rx: Receiver<Option<ChartExtraction>>,
}

impl PendingResponse {
    /// Waits up to `timeout`, distinguishing timeout and disconnection.
    pub fn wait_strict(self, timeout: Duration) -> ChartResult<Option<ChartExtraction>> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => ChartError::Timeout {
                millis: timeout.as_millis(),
            },
            RecvTimeoutError::Disconnected => ChartError::Disconnected,
        })
    }

    /// Waits up to `timeout`; a timeout or a dropped sender reads as "no data".
    #[must_use]
    pub fn wait(self, timeout: Duration) -> Option<ChartExtraction> {
        match self.wait_strict(timeout) {
            Ok(extraction) => extraction,
            Err(err) => {
                warn!(error = %err, "extraction response unavailable");
                None
            }
        }
    }
}
