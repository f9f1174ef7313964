//! Generation counter for session-mutating operations.
//!
//! Every operation takes a ticket when it starts. A ticket may commit until
//! a newer ticket has committed; from then on its results are discarded.
//! Starting an operation alone supersedes nothing, so a login that fails
//! before storing anything does not cancel a restore still in flight.

use std::sync::{Mutex, PoisonError};

/// Identifies one session-mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Generations {
    issued: u64,
    committed: u64,
}

/// Hands out tickets and serializes commits.
#[derive(Debug, Default)]
pub struct Sequencer {
    generations: Mutex<Generations>,
}

impl Sequencer {
    /// Creates a sequencer with no operations started.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generations: Mutex::new(Generations {
                issued: 0,
                committed: 0,
            }),
        }
    }

    /// Starts a new operation.
    pub fn begin(&self) -> Ticket {
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        generations.issued += 1;
        Ticket(generations.issued)
    }

    /// Runs `commit` unless a newer ticket already committed; returns `None`
    /// when discarded.
    ///
    /// An operation may commit several times with the same ticket. No other
    /// operation can begin or commit while `commit` runs.
    pub fn commit<T>(&self, ticket: Ticket, commit: impl FnOnce() -> T) -> Option<T> {
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if generations.committed > ticket.0 {
            return None;
        }
        generations.committed = ticket.0;
        let value = commit();
        drop(generations);
        Some(value)
    }
}
