#![forbid(unsafe_code)]

use std::collections::BTreeMap;

/// A script element as handed to the host document.
///
/// Plain data: the engine fills it from the caller's options, the host
/// turns it into whatever its document calls an element. Dataset entries
/// are keyed by their camelCase name (the way a DOM `dataset` is); the
/// dashed attribute view is available through [`data_attributes`].
///
/// [`data_attributes`]: ScriptElement::data_attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptElement {
    /// Resource identifier to fetch, absent for inline content.
    pub src: Option<String>,
    /// MIME type of the script (`type` attribute).
    pub script_type: Option<String>,
    /// Inline text content.
    pub text: Option<String>,
    /// Subresource integrity hash, passed through untouched.
    pub integrity: Option<String>,
    /// Cross-origin mode. `None` clears any inherited value: unset
    /// means "clear explicitly", not "leave the document default".
    pub cross_origin: Option<String>,
    /// The element's asynchronous-execution flag. The engine forces this
    /// to `false` so scripts execute in document order.
    pub async_exec: bool,
    dataset: BTreeMap<String, String>,
}

impl ScriptElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a dataset entry under its camelCase key.
    pub fn set_data<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.dataset.insert(key.into(), value.into());
    }

    /// Look up a dataset entry by its camelCase key.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// Dataset entries as stored (camelCase keys).
    pub fn dataset(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dataset.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Dataset entries in attribute form: `feedId` becomes
    /// `data-feed-id`, per the platform's camelCase-to-dash convention.
    pub fn data_attributes(&self) -> impl Iterator<Item = (String, &str)> {
        self.dataset
            .iter()
            .map(|(k, v)| (data_attribute_name(k), v.as_str()))
    }

    /// Whether this element carries inline content instead of a `src`.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.src.is_none()
    }
}

/// Convert a camelCase dataset key to its `data-*` attribute name.
#[must_use]
pub fn data_attribute_name(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 6);
    out.push_str("data-");
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
