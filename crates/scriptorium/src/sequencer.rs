#![forbid(unsafe_code)]

//! The single shared queue serialized loads attach to.

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tracing::trace;

pub(crate) type Job = BoxFuture<'static, ()>;

/// FIFO queue of deferred jobs, drained by one worker task.
///
/// Jobs run strictly in attachment order; a later-attached job never
/// begins before the previous one has settled. Each load job settles
/// its own completion channel internally, so the worker advances to the
/// next job whether the load succeeded or failed; failure of one
/// script must not stall the scripts queued behind it.
#[derive(Clone)]
pub(crate) struct Sequencer {
    tx: mpsc::UnboundedSender<Job>,
}

impl Sequencer {
    /// Spawn the worker task. Must be called within a Tokio runtime.
    pub(crate) fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run(rx));
        Self { tx }
    }

    async fn run(mut rx: mpsc::UnboundedReceiver<Job>) {
        trace!("sequencer worker started");
        while let Some(job) = rx.recv().await {
            job.await;
            trace!("sequencer job settled");
        }
        trace!("sequencer channel closed, worker exiting");
    }

    /// Attach a job to the tail of the queue.
    ///
    /// Attachment happens synchronously, so attachment order equals call
    /// order. Returns `false` when the worker is gone, in which case the
    /// job is dropped and its completion channel settles as shutdown.
    pub(crate) fn attach(&self, job: Job) -> bool {
        self.tx.send(job).is_ok()
    }
}
