#![forbid(unsafe_code)]

use std::{collections::HashMap, time::Duration};

use scriptorium_dom::{InjectTarget, ScriptElement};

/// Script type applied when the caller supplies none.
pub const DEFAULT_SCRIPT_TYPE: &str = "text/javascript";

/// Configuration for a single load request.
///
/// Used with [`Loader::load`](crate::Loader::load). `reload` and
/// `immediate` are presence flags; everything else passes through to
/// the created element.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    /// Force a fresh load even if the identifier is cached. Applies to
    /// this call only.
    pub reload: bool,
    /// Bypass the shared queue and inject right away, giving up the
    /// ordering guarantee. Maps to the declarative `async` attribute.
    pub immediate: bool,
    /// Wait this long before the element is appended. Zero by default.
    pub delay: Duration,
    /// Dataset entries, camelCase key to value (`feedId` becomes
    /// `data-feed-id` on the element).
    pub data: Option<HashMap<String, String>>,
    /// `type` attribute. Defaults to [`DEFAULT_SCRIPT_TYPE`] when unset
    /// or empty.
    pub script_type: Option<String>,
    /// Inline text content placed on the element alongside `src`.
    pub text: Option<String>,
    /// Subresource integrity hash, passed through untouched.
    pub integrity: Option<String>,
    /// Cross-origin mode. Copied onto the element verbatim: `None`
    /// clears explicitly rather than leaving a document default.
    pub cross_origin: Option<String>,
    /// Container that receives the element. Defaults to the head.
    pub parent: InjectTarget,
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a fresh load even if cached.
    #[must_use]
    pub fn with_reload(mut self) -> Self {
        self.reload = true;
        self
    }

    /// Skip the queue and inject immediately.
    #[must_use]
    pub fn with_immediate(mut self) -> Self {
        self.immediate = true;
        self
    }

    /// Wait before appending the element.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replace the dataset map.
    #[must_use]
    pub fn with_data(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(data);
        self
    }

    /// Add one dataset entry (camelCase key).
    #[must_use]
    pub fn with_data_entry<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set the `type` attribute.
    #[must_use]
    pub fn with_script_type<S: Into<String>>(mut self, script_type: S) -> Self {
        self.script_type = Some(script_type.into());
        self
    }

    /// Set inline text content.
    #[must_use]
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the integrity hash.
    #[must_use]
    pub fn with_integrity<S: Into<String>>(mut self, integrity: S) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    /// Set the cross-origin mode.
    #[must_use]
    pub fn with_cross_origin<S: Into<String>>(mut self, cross_origin: S) -> Self {
        self.cross_origin = Some(cross_origin.into());
        self
    }

    /// Set the container node.
    #[must_use]
    pub fn with_parent(mut self, parent: InjectTarget) -> Self {
        self.parent = parent;
        self
    }

    /// Build the element for a fresh load of `src`.
    ///
    /// Passthrough attributes are merged so that a caller-supplied value
    /// wins over the implicit `type` default; a field is only filled
    /// when it is unset or empty. The asynchronous-execution flag is
    /// forced off: ordered execution is the whole point, and
    /// document-mutating scripts misbehave when run out of order.
    pub(crate) fn element_for(&self, src: &str) -> ScriptElement {
        let mut el = ScriptElement::new();
        el.script_type = self.script_type.clone();
        el.text = self.text.clone();
        el.integrity = self.integrity.clone();
        fill_if_unset(&mut el.script_type, DEFAULT_SCRIPT_TYPE);
        el.async_exec = false;
        el.src = Some(src.to_owned());
        if let Some(data) = &self.data {
            for (key, value) in data {
                el.set_data(key.clone(), value.clone());
            }
        }
        el.cross_origin = self.cross_origin.clone();
        el
    }

    /// Build the element for inline content (no `src`, no cache
    /// identity).
    pub(crate) fn inline_element(&self, text: &str) -> ScriptElement {
        let mut el = ScriptElement::new();
        el.script_type = self.script_type.clone();
        fill_if_unset(&mut el.script_type, DEFAULT_SCRIPT_TYPE);
        el.async_exec = false;
        el.text = Some(text.to_owned());
        el
    }
}

/// Fill `slot` only when it holds nothing or an empty string; an
/// explicitly different value is never overwritten.
fn fill_if_unset(slot: &mut Option<String>, value: &str) {
    match slot {
        Some(current) if !current.is_empty() => {}
        _ => *slot = Some(value.to_owned()),
    }
}
