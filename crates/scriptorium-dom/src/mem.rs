#![forbid(unsafe_code)]

//! In-memory host for headless embedders and tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::trace;

use crate::{
    element::ScriptElement,
    host::{Host, InjectError, InjectResult, InjectTarget},
};

/// One recorded append.
#[derive(Debug, Clone)]
pub struct Appended {
    pub target: InjectTarget,
    pub element: ScriptElement,
    /// Position in the host's append log, starting at 0.
    pub seq: usize,
    /// When the element went live.
    pub at: Instant,
}

#[derive(Default)]
struct MemHostInner {
    log: Mutex<Vec<Appended>>,
    failing: Mutex<HashSet<String>>,
    latency: Mutex<HashMap<String, Duration>>,
}

/// [`Host`] that appends into an in-memory log.
///
/// The element is recorded the moment `inject` is called (that is when
/// it would go live in a real document); settlement can be delayed per
/// identifier with [`settle_after`], and forced to fail with
/// [`fail_src`]. Clones share state.
///
/// [`settle_after`]: MemHost::settle_after
/// [`fail_src`]: MemHost::fail_src
#[derive(Clone, Default)]
pub struct MemHost {
    inner: Arc<MemHostInner>,
}

impl MemHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every inject for `src` settle with an error.
    pub fn fail_src<S: Into<String>>(&self, src: S) {
        self.inner.failing.lock().insert(src.into());
    }

    /// Delay settlement for `src` by `latency` after the append.
    pub fn settle_after<S: Into<String>>(&self, src: S, latency: Duration) {
        self.inner.latency.lock().insert(src.into(), latency);
    }

    /// Snapshot of everything appended so far, in append order.
    #[must_use]
    pub fn appended(&self) -> Vec<Appended> {
        self.inner.log.lock().clone()
    }

    #[must_use]
    pub fn append_count(&self) -> usize {
        self.inner.log.lock().len()
    }

    /// `src` values of appended elements, in append order. Inline
    /// elements contribute an empty string.
    #[must_use]
    pub fn appended_srcs(&self) -> Vec<String> {
        self.inner
            .log
            .lock()
            .iter()
            .map(|a| a.element.src.clone().unwrap_or_default())
            .collect()
    }
}

#[async_trait]
impl Host for MemHost {
    async fn inject(&self, target: &InjectTarget, element: ScriptElement) -> InjectResult {
        let src = element.src.clone().unwrap_or_default();
        {
            let mut log = self.inner.log.lock();
            let seq = log.len();
            trace!(%src, seq, "mem host append");
            log.push(Appended {
                target: target.clone(),
                element,
                seq,
                at: Instant::now(),
            });
        }

        let latency = self.inner.latency.lock().get(&src).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.inner.failing.lock().contains(&src) {
            return Err(InjectError::new(format!("fetch failed for `{src}`")));
        }
        Ok(())
    }
}
