//! Explicit change signal for recomputed engine state.

use std::sync::Arc;

/// Result of asking the engine to recompute a derived value.
///
/// `Unchanged` means the caller's cached value is still current and no
/// redraw is needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh<T> {
    Unchanged,
    Changed(T),
}

impl<T> Refresh<T> {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    pub fn changed(self) -> Option<T> {
        match self {
            Self::Changed(v) => Some(v),
            Self::Unchanged => None,
        }
    }
}

impl<T: ?Sized> Refresh<Arc<T>> {
    /// Compare by `Arc` identity; for engines that keep the previous value.
    pub fn by_identity(previous: &Arc<T>, next: &Arc<T>) -> Self {
        if Arc::ptr_eq(previous, next) {
            Self::Unchanged
        } else {
            Self::Changed(Arc::clone(next))
        }
    }
}

impl<T: ?Sized> Refresh<Option<Arc<T>>> {
    /// Like [`Refresh::by_identity`], treating two `None`s as the same value.
    pub fn by_optional_identity(previous: Option<&Arc<T>>, next: Option<&Arc<T>>) -> Self {
        match (previous, next) {
            (None, None) => Self::Unchanged,
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => Self::Unchanged,
            _ => Self::Changed(next.cloned()),
        }
    }
}
