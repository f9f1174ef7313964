//! Navigator that logs and remembers routes.

use std::sync::{Mutex, PoisonError};

use latch_application::ports::Navigator;
use latch_domain::NavigationTarget;
use tracing::info;

/// Navigator for headless clients.
///
/// There is no view to switch, so each navigation is logged and kept in a
/// history the caller can inspect.
#[derive(Debug, Default)]
pub struct TracingNavigator {
    history: Mutex<Vec<NavigationTarget>>,
}

impl TracingNavigator {
    /// Creates a navigator with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All targets navigated to, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<NavigationTarget> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent target.
    #[must_use]
    pub fn last(&self) -> Option<NavigationTarget> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl Navigator for TracingNavigator {
    fn navigate(&self, target: NavigationTarget) {
        info!(route = target.path(), "navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target);
    }
}
