use scriptorium_dom::InjectError;
use thiserror::Error;

/// Centralized error type for the loading engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The host reported a failure for the element carrying this
    /// identifier. Never retried.
    #[error("script load failed for `{src}`: {message}")]
    Failed { src: String, message: String },
    /// The loader (or its runtime) went away before a queued request
    /// could settle.
    #[error("loader shut down before the request settled")]
    Shutdown,
}

impl LoadError {
    pub fn failed<S: Into<String>>(src: S, err: InjectError) -> Self {
        Self::Failed {
            src: src.into(),
            message: err.message().to_string(),
        }
    }

    /// The identifier that failed, if this is a load failure.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Failed { src, .. } => Some(src),
            Self::Shutdown => None,
        }
    }

    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
