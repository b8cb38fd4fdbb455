//! Loading / ready / failed state of one fetch.

use std::fmt;

/// State of a single fetched resource.
///
/// Exactly one variant is active. A resolution only ever moves a `Loading`
/// state forward; resolving a settled state leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// Request in flight (or not yet issued)
    #[default]
    Loading,
    /// Request succeeded
    Ready(T),
    /// Request failed, with a human-readable reason
    Failed(String),
}

impl<T> FetchState<T> {
    /// Apply a fetch outcome.
    ///
    /// `Loading` becomes `Ready` or `Failed`; any other state is returned
    /// unchanged.
    pub fn resolve<E: fmt::Display>(self, result: Result<T, E>) -> Self {
        match self {
            FetchState::Loading => match result {
                Ok(value) => FetchState::Ready(value),
                Err(err) => FetchState::Failed(err.to_string()),
            },
            settled => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    /// True once the fetch has either succeeded or failed.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// The loaded value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure reason, if failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Loading => "loading",
            FetchState::Ready(_) => "ready",
            FetchState::Failed(_) => "failed",
        }
    }
}
