#![forbid(unsafe_code)]

//! The loading engine: cache check, element construction, delayed
//! append, settlement.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use dashmap::DashMap;
use scriptorium_dom::Host;
use tokio::sync::oneshot;
use tracing::{debug, trace};

use crate::{
    error::{LoadError, LoadResult},
    options::LoadOptions,
    sequencer::{Job, Sequencer},
};

/// Loads script resources into a host document with deduplication,
/// reload support, and serialized execution ordering.
///
/// A `Loader` owns its load-state cache and its queue; independent
/// instances are fully isolated. Clones share both (handle style). The
/// queue worker is spawned at construction, so a Tokio runtime must be
/// current.
///
/// Serialized loads (the default) run strictly in the order `load` was
/// called, across every caller of this instance. Loads marked
/// [`immediate`](LoadOptions::immediate) skip the queue entirely.
#[derive(Clone)]
pub struct Loader {
    host: Arc<dyn Host>,
    loaded: Arc<DashMap<String, ()>>,
    sequencer: Sequencer,
}

impl Loader {
    /// Create a loader driving the given host.
    pub fn new(host: impl Host) -> Self {
        Self::with_host(Arc::new(host))
    }

    /// Create a loader from an already-shared host.
    pub fn with_host(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            loaded: Arc::new(DashMap::new()),
            sequencer: Sequencer::spawn(),
        }
    }

    /// Request a load of `src`.
    ///
    /// The request is attached to the queue (or spawned, when
    /// `options.immediate` is set) before this returns, so call order is
    /// attachment order. The returned handle settles exactly once:
    /// `Ok` with the identifier once the script has loaded (or was
    /// already cached), `Err` if the host reports failure.
    ///
    /// An identifier that is already cached settles successfully without
    /// touching the host; pass [`reload`](LoadOptions::reload) to force
    /// a fresh append.
    pub fn load<S: Into<String>>(&self, src: S, options: LoadOptions) -> LoadHandle<String> {
        let src = src.into();
        let (settle, handle) = LoadHandle::channel();
        let immediate = options.immediate;
        if immediate {
            trace!(%src, "immediate load, bypassing the queue");
        }
        let this = self.clone();
        let job: Job = Box::pin(async move {
            let _ = settle.send(this.perform(src, options).await);
        });
        if immediate {
            tokio::spawn(job);
        } else if !self.sequencer.attach(job) {
            debug!("queue worker gone, request settles as shutdown");
        }
        handle
    }

    /// Inject inline content as a fresh script element.
    ///
    /// Always serialized: inline chunks have no cache identity and no
    /// immediate path. Only the injection-shape options (`parent`,
    /// `script_type`, `delay`) apply.
    pub fn load_inline<S: Into<String>>(&self, text: S, options: LoadOptions) -> LoadHandle<()> {
        let text = text.into();
        let (settle, handle) = LoadHandle::channel();
        let host = Arc::clone(&self.host);
        let job: Job = Box::pin(async move {
            let element = options.inline_element(&text);
            if !options.delay.is_zero() {
                tokio::time::sleep(options.delay).await;
            }
            let outcome = host
                .inject(&options.parent, element)
                .await
                .map_err(|err| LoadError::failed("<inline>", err));
            let _ = settle.send(outcome);
        });
        if !self.sequencer.attach(job) {
            debug!("queue worker gone, inline request settles as shutdown");
        }
        handle
    }

    /// Drop the cache entry for `src`, so the next load appends fresh.
    ///
    /// Returns whether an entry was present. Pairs with the binding
    /// adapter's destroy path.
    pub fn unload(&self, src: &str) -> bool {
        let removed = self.loaded.remove(src).is_some();
        if removed {
            debug!(%src, "unloaded, next load is fresh");
        }
        removed
    }

    /// Whether `src` has loaded successfully and was not unloaded since.
    #[must_use]
    pub fn is_loaded(&self, src: &str) -> bool {
        self.loaded.contains_key(src)
    }

    /// One load request, cache check through settlement.
    async fn perform(self, src: String, options: LoadOptions) -> LoadResult<String> {
        // A reload only forces this call: drop the entry, then fall
        // through to the normal fresh-load path.
        if options.reload && self.loaded.remove(&src).is_some() {
            debug!(%src, "reload requested, cache entry dropped");
        }
        if self.loaded.contains_key(&src) {
            trace!(%src, "already loaded, settling without append");
            return Ok(src);
        }

        let element = options.element_for(&src);
        if !options.delay.is_zero() {
            trace!(%src, delay_ms = options.delay.as_millis() as u64, "delaying append");
            tokio::time::sleep(options.delay).await;
        }
        // The element goes live here and nowhere else.
        match self.host.inject(&options.parent, element).await {
            Ok(()) => {
                self.loaded.insert(src.clone(), ());
                debug!(%src, "script loaded");
                Ok(src)
            }
            Err(err) => Err(LoadError::failed(src, err)),
        }
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("loaded", &self.loaded.len())
            .finish_non_exhaustive()
    }
}

/// Pending outcome of a single load request.
///
/// Settles exactly once. Dropping the handle does not cancel the load;
/// once attached or spawned, a request always runs to settlement.
pub struct LoadHandle<T = String> {
    rx: oneshot::Receiver<LoadResult<T>>,
}

impl<T> LoadHandle<T> {
    pub(crate) fn channel() -> (oneshot::Sender<LoadResult<T>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }
}

impl<T> Future for LoadHandle<T> {
    type Output = LoadResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|settled| match settled {
            Ok(outcome) => outcome,
            // Sender dropped without settling: the job never ran.
            Err(_) => Err(LoadError::Shutdown),
        })
    }
}
