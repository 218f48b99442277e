//! Gym session domain model.
//!
//! A session is a scheduled class with a fixed capacity. Enrolled clients and the waiting
//! list are both kept on the session document as ordered client identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::model::document::DocumentModel;

fn default_duration() -> u32 {
    60
}

/// A scheduled session of a gym service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymSession {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub instructor_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    /// Start of the session.
    pub date: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    /// Maximum number of enrolled clients.
    pub capacity: u32,
    /// Enrolled client ids in enrollment order.
    #[serde(default)]
    pub enrolled: Vec<String>,
    /// Waiting client ids in arrival order.
    #[serde(default)]
    pub waiting_list: Vec<String>,
    /// Any descriptive fields not modeled above (name, level, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GymSession {
    /// Number of places still available.
    pub fn free_slots(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.enrolled.len())
    }

    pub fn is_enrolled(&self, client_id: &str) -> bool {
        self.enrolled.iter().any(|c| c == client_id)
    }

    /// Removes a client from the enrolled set.
    ///
    /// # Returns
    /// - `true` - Client was enrolled and has been removed
    /// - `false` - Client was not enrolled
    pub fn remove_enrolled(&mut self, client_id: &str) -> bool {
        let before = self.enrolled.len();
        self.enrolled.retain(|c| c != client_id);
        self.enrolled.len() != before
    }
}

impl DocumentModel for GymSession {
    const COLLECTION: &'static str = "sessions";

    fn validate(&self) -> Result<(), String> {
        if self.enrolled.len() > self.capacity as usize {
            return Err(format!(
                "Session has {} enrolled clients but a capacity of {}",
                self.enrolled.len(),
                self.capacity
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for client_id in self.enrolled.iter().chain(self.waiting_list.iter()) {
            if !seen.insert(client_id.as_str()) {
                return Err(format!(
                    "Client {} appears more than once in the session",
                    client_id
                ));
            }
        }

        Ok(())
    }
}
