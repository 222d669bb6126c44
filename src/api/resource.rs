//! Tagged fetch result shared by every page: a slot is loading, holds data,
//! or failed with a short user-facing notice. The notice names the failed
//! action, never the raw transport error.

use tracing::warn;

use crate::error::ApiResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Resource<T> {
    fn default() -> Self { Resource::Loading }
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool { matches!(self, Resource::Loading) }
    pub fn is_ready(&self) -> bool { matches!(self, Resource::Ready(_)) }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Resource::Failed(n) => Some(n),
            _ => None,
        }
    }
}

/// Map a call outcome into `(resource, notice)`. `action` is a short verb
/// phrase such as `"load contacts"`; the failure notice becomes
/// `"Failed to load contacts"`. The raw error is logged, never surfaced.
pub fn settle<T>(result: ApiResult<T>, action: &str) -> (Resource<T>, Option<String>) {
    match result {
        Ok(v) => (Resource::Ready(v), None),
        Err(e) => {
            warn!(target: "hexabid::api", "{} failed: {}", action, e);
            let notice = format!("Failed to {}", action);
            (Resource::Failed(notice.clone()), Some(notice))
        }
    }
}
