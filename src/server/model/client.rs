//! Client domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::model::document::DocumentModel;

/// Stars a client must collect before receiving a reward.
pub const STAR_REWARD_THRESHOLD: u32 = 10;

/// A message left for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier unique within the client's notifications.
    pub id: u32,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A gym customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Current membership, if any.
    #[serde(default)]
    pub membership_id: Option<String>,
    #[serde(default)]
    pub favorite_services: Vec<String>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Attendance stars collected towards the next reward.
    #[serde(default)]
    pub stars: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    /// Appends a notification with the next free id and returns it.
    pub fn notify(&mut self, message: impl Into<String>) -> Notification {
        let id = self
            .notifications
            .iter()
            .map(|n| n.id)
            .max()
            .map_or(1, |max| max + 1);
        let notification = Notification {
            id,
            message: message.into(),
            created_at: Utc::now(),
        };
        self.notifications.push(notification.clone());
        notification
    }

    /// Removes a notification.
    ///
    /// # Returns
    /// - `true` - Notification existed and was removed
    /// - `false` - No notification with this id
    pub fn remove_notification(&mut self, id: u32) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }
}

impl DocumentModel for Client {
    const COLLECTION: &'static str = "clients";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        serde_json::from_value(serde_json::json!({"name": "Ada"})).unwrap()
    }

    /// Expected: ids keep increasing even after removals
    #[test]
    fn notification_ids_increase() {
        let mut c = client();
        assert_eq!(c.notify("a").id, 1);
        assert_eq!(c.notify("b").id, 2);

        assert!(c.remove_notification(1));
        assert_eq!(c.notify("c").id, 3);
        assert!(!c.remove_notification(42));
    }
}
