//! Reservation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::model::document::DocumentModel;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Active,
    Cancelled,
}

/// A confirmed place of a client in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub client_id: String,
    pub session_id: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Whether attendance has already been converted into a reward star.
    #[serde(default)]
    pub rewarded: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reservation {
    /// Creates an active reservation stamped with the current time.
    pub fn active(client_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            session_id: session_id.into(),
            status: ReservationStatus::Active,
            created_at: Utc::now(),
            rewarded: false,
            extra: Map::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

impl DocumentModel for Reservation {
    const COLLECTION: &'static str = "reservations";
}
