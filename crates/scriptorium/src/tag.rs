//! Declarative binding surface: a script tag driven at lifecycle
//! points.

use std::{collections::HashMap, sync::Arc, time::Duration};

use scriptorium_dom::InjectTarget;
use tracing::debug;

use crate::{
    loader::{LoadHandle, Loader},
    options::LoadOptions,
};

/// Cleanup hook run when the owning tag is destroyed.
///
/// A typed callback supplied by the caller; the engine never evaluates
/// strings as code. Panics inside the hook are not contained.
pub type UnloadFn = Arc<dyn Fn() + Send + Sync>;

/// A declarative script tag.
///
/// Mirrors the attribute surface `{ src, type, async, integrity, text,
/// crossorigin, unload, data, reload, delay }` of a markup-level script
/// binding. The host framework calls [`mount`](ScriptTag::mount) when
/// the tag enters the document and [`unmount`](ScriptTag::unmount) when
/// it is destroyed; everything else is driven by the [`Loader`].
#[derive(Clone, Default)]
pub struct ScriptTag {
    /// Resource identifier. Absent means the tag carries inline text.
    pub src: Option<String>,
    /// `type` attribute passthrough.
    pub script_type: Option<String>,
    /// Maps to the `async` attribute: inject immediately, skipping the
    /// ordering queue.
    pub immediate: bool,
    /// `integrity` attribute passthrough.
    pub integrity: Option<String>,
    /// Inline text content.
    pub text: Option<String>,
    /// `crossorigin` attribute passthrough.
    pub cross_origin: Option<String>,
    /// Dataset entries, camelCase key to value.
    pub data: Option<HashMap<String, String>>,
    /// Force a fresh load even if the identifier is cached.
    pub reload: bool,
    /// Wait before the element is appended.
    pub delay: Duration,
    /// Where the tag sits; inline content and loaded elements are
    /// appended here.
    pub parent: InjectTarget,
    /// Cleanup hook for the destroy path.
    pub unload: Option<UnloadFn>,
}

/// What `mount` started.
pub enum Mounted {
    /// An external load; the handle settles with the identifier.
    External(LoadHandle<String>),
    /// Inline content enqueued for ordered execution.
    Inline(LoadHandle<()>),
}

impl ScriptTag {
    /// Tag for an external resource.
    #[must_use]
    pub fn external<S: Into<String>>(src: S) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    /// Tag carrying inline text.
    #[must_use]
    pub fn inline<S: Into<String>>(text: S) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_script_type<S: Into<String>>(mut self, script_type: S) -> Self {
        self.script_type = Some(script_type.into());
        self
    }

    #[must_use]
    pub fn with_immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    #[must_use]
    pub fn with_integrity<S: Into<String>>(mut self, integrity: S) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    #[must_use]
    pub fn with_cross_origin<S: Into<String>>(mut self, cross_origin: S) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    #[must_use]
    pub fn with_data_entry<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_reload(mut self) -> Self {
        self.reload = true;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: InjectTarget) -> Self {
        self.parent = parent;
        self
    }

    #[must_use]
    pub fn with_unload<F: Fn() + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.unload = Some(Arc::new(hook));
        self
    }

    /// Collect the defined, recognized attributes into load options.
    fn options(&self) -> LoadOptions {
        LoadOptions {
            reload: self.reload,
            immediate: self.immediate,
            delay: self.delay,
            data: self.data.clone(),
            script_type: self.script_type.clone(),
            text: self.text.clone(),
            integrity: self.integrity.clone(),
            cross_origin: self.cross_origin.clone(),
            parent: self.parent.clone(),
        }
    }

    /// Mount: drive the engine.
    ///
    /// Without `src`, the inline text is wrapped in a fresh element and
    /// enqueued (always serialized). With `src`, the load is serialized
    /// unless [`immediate`](Self::immediate) is set.
    pub fn mount(&self, loader: &Loader) -> Mounted {
        match &self.src {
            Some(src) => Mounted::External(loader.load(src.clone(), self.options())),
            None => {
                let text = self.text.clone().unwrap_or_default();
                Mounted::Inline(loader.load_inline(text, self.options()))
            }
        }
    }

    /// Unmount: run cleanup.
    ///
    /// Cleanup only happens when an unload hook was declared: the hook
    /// runs, then the identifier's cache entry is dropped so a
    /// subsequent load is treated as fresh.
    pub fn unmount(&self, loader: &Loader) {
        let Some(hook) = &self.unload else {
            return;
        };
        debug!(src = self.src.as_deref().unwrap_or_default(), "running unload hook");
        hook();
        if let Some(src) = &self.src {
            loader.unload(src);
        }
    }
}
