use async_trait::async_trait;
use thiserror::Error;

use crate::element::ScriptElement;

/// Container node that receives an injected element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum InjectTarget {
    /// The document head. Default when the caller names no parent.
    #[default]
    Head,
    /// A host-defined container, addressed by whatever id scheme the
    /// host document uses.
    Node(String),
}

impl InjectTarget {
    pub fn node<S: Into<String>>(id: S) -> Self {
        Self::Node(id.into())
    }
}

/// Error reported by a [`Host`] when an element fails to load.
///
/// Deliberately unclassified: timeout, not-found, and blocked are
/// indistinguishable to the engine. The message is host-specific.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InjectError {
    message: String,
}

impl InjectError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type InjectResult = Result<(), InjectError>;

/// The document collaborator.
///
/// `inject` appends `element` under `target` and drives it to
/// settlement: the returned future resolves once the element has loaded
/// and executed (or failed). Appending is the point the element goes
/// live; hosts must not start fetching before they are called.
#[async_trait]
pub trait Host: Send + Sync + 'static {
    async fn inject(&self, target: &InjectTarget, element: ScriptElement) -> InjectResult;
}
