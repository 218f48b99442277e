//! Waiting lists of full sessions.
//!
//! A session's waiting list is a `WaitingListPublisher`: an ordered set of client ids.
//! When places free up the publisher offers them to waiting clients in arrival order
//! through a `WaitingListSubscriber`, which decides whether a client can take the place
//! and books it. Clients the subscriber rejects as ineligible are passed over and keep
//! their position; any other failure stops the round.
//!
//! Mutations of a session (enrolled set, waiting list) are serialized per session with
//! `SessionLocks` and written back with a version check.

pub mod lock;
pub mod publisher;
pub mod subscriber;

pub use lock::SessionLocks;
pub use publisher::WaitingListPublisher;
pub use subscriber::{ReservationSubscriber, WaitingListSubscriber};

use thiserror::Error;

use crate::server::error::AppError;

/// Places that became available in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreedSlot {
    pub session_id: String,
    /// Number of places that may be handed out in this round.
    pub slots: usize,
}

/// A waiting client that obtained a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub client_id: String,
    pub reservation_id: String,
}

/// Outcome of a completed notification round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Promoted clients in promotion order.
    pub promoted: Vec<Promotion>,
    /// Clients passed over as ineligible; they are still waiting.
    pub skipped: Vec<String>,
}

/// A notification round stopped by an error other than ineligibility.
///
/// Promotions made before the failure are returned so that the caller can undo them.
#[derive(Error, Debug)]
#[error("Waiting list notification aborted after {} promotion(s): {source}", promoted.len())]
pub struct NotifyAborted {
    pub promoted: Vec<Promotion>,
    #[source]
    pub source: AppError,
}
