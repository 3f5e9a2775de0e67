#![forbid(unsafe_code)]

//! # scriptorium
//!
//! Ordered dynamic loading of script resources into a live document:
//! a load-state cache keyed by resource identifier prevents duplicate
//! loads, a single shared queue makes scripts load and execute in
//! declaration order, and an options bag covers reload, delayed append,
//! dataset attributes, and immediate (unordered) injection.
//!
//! The document itself is a seam: embedders implement
//! [`Host`](scriptorium_dom::Host) (or use the in-memory
//! [`MemHost`](scriptorium_dom::MemHost)) and the engine hands it
//! fully-built elements.
//!
//! ## Quick start
//!
//! ```ignore
//! use scriptorium::{LoadOptions, Loader};
//! use scriptorium_dom::MemHost;
//!
//! let loader = Loader::new(MemHost::new());
//! // Serialized: b.js never starts before a.js settles.
//! let a = loader.load("https://cdn.example.com/a.js", LoadOptions::default());
//! let b = loader.load("https://cdn.example.com/b.js", LoadOptions::default());
//! a.await?;
//! b.await?;
//! ```

mod error;
mod loader;
mod options;
mod sequencer;
mod tag;

pub use error::{LoadError, LoadResult};
pub use loader::{LoadHandle, Loader};
pub use options::{DEFAULT_SCRIPT_TYPE, LoadOptions};
pub use tag::{Mounted, ScriptTag, UnloadFn};

/// Document-seam types, re-exported for convenience.
pub mod dom {
    pub use scriptorium_dom::*;
}

use std::sync::OnceLock;

use scriptorium_dom::Host;

static SHARED: OnceLock<Loader> = OnceLock::new();

/// Install the process-wide default loader.
///
/// The first call creates the instance and wins; later calls return the
/// existing loader and drop the offered host. Like [`Loader::new`], the
/// first call must happen inside a Tokio runtime.
///
/// Independent [`Loader`] instances remain the primary API; this is a
/// convenience for hosts that want one queue for the whole process.
pub fn install(host: impl Host) -> &'static Loader {
    SHARED.get_or_init(|| Loader::new(host))
}

/// The installed default loader, if [`install`] has been called.
#[must_use]
pub fn shared() -> Option<&'static Loader> {
    SHARED.get()
}
