//! Navigation port

use latch_domain::NavigationTarget;

/// Dispatches navigation side effects after session transitions.
pub trait Navigator: Send + Sync {
    /// Moves the client to the given view.
    fn navigate(&self, target: NavigationTarget);
}
