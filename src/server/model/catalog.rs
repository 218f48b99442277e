//! Descriptive records managed through plain CRUD: services, rooms, instructors and staff users.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::server::model::document::DocumentModel;

/// A class type offered by the gym (spinning, yoga, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for Service {
    const COLLECTION: &'static str = "services";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for Room {
    const COLLECTION: &'static str = "rooms";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for Instructor {
    const COLLECTION: &'static str = "instructors";
}

/// A staff account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentModel for User {
    const COLLECTION: &'static str = "users";
}
