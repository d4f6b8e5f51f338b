use leptos::prelude::on_cleanup;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks the responses of a page as stale once the page is gone.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Token cancelled when the current reactive owner (the page) is disposed.
    pub fn scoped() -> Self {
        let token = Self::default();
        let on_drop = token.clone();
        on_cleanup(move || on_drop.cancel());
        token
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancelToken::default();
        let copy = token.clone();
        assert!(!copy.is_cancelled());
        token.cancel();
        assert!(copy.is_cancelled());
    }
}
