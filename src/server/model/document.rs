//! Stored document models.
//!
//! Every business entity lives as a JSON object inside a named collection. This module
//! holds the untyped `Document` read from the `document` table, the typed `Stored<M>`
//! wrapper used by the service layer, and the `DocumentModel` trait binding a Rust type
//! to its collection.

use chrono::NaiveDateTime;
use sea_orm::DbErr;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Field names managed by the store and never persisted inside a document body.
pub const RESERVED_FIELDS: [&str; 2] = ["id", "version"];

/// A JSON document as persisted in a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier (UUID v4 string).
    pub id: String,
    /// Write counter used for optimistic concurrency checks.
    pub version: i64,
    /// Document body without the reserved `id`/`version` fields.
    pub body: Map<String, Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Document {
    /// Converts an entity model to a document at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Document)` - Body parsed as a JSON object
    /// - `Err(DbErr::Custom)` - Stored body is not valid JSON or not an object
    pub fn from_entity(entity: entity::document::Model) -> Result<Self, DbErr> {
        let body = match serde_json::from_str::<Value>(&entity.body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(DbErr::Custom(format!(
                    "Document {} in collection {} is not a JSON object",
                    entity.id, entity.collection
                )))
            }
            Err(e) => {
                return Err(DbErr::Custom(format!(
                    "Failed to parse document {}: {}",
                    entity.id, e
                )))
            }
        };

        Ok(Self {
            id: entity.id,
            version: entity.version,
            body,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Returns the document as a single JSON object including `id` and `version`.
    pub fn into_json(self) -> Value {
        let mut map = Map::with_capacity(self.body.len() + 2);
        map.insert("id".to_string(), Value::String(self.id));
        map.insert("version".to_string(), Value::from(self.version));
        map.extend(self.body);
        Value::Object(map)
    }

    /// Decodes the body into a typed model.
    pub fn decode<M: DeserializeOwned>(self) -> Result<Stored<M>, serde_json::Error> {
        let value = serde_json::from_value(Value::Object(self.body))?;

        Ok(Stored {
            id: self.id,
            version: self.version,
            value,
        })
    }
}

/// Applies a top-level merge patch to a document body.
///
/// Keys mapped to `null` are removed, every other key overwrites the existing value.
/// Reserved fields in the patch are ignored.
pub fn merge_patch(body: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if RESERVED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if value.is_null() {
            body.remove(&key);
        } else {
            body.insert(key, value);
        }
    }
}

/// Removes reserved fields from a body about to be written.
pub fn strip_reserved(body: &mut Map<String, Value>) {
    for field in RESERVED_FIELDS {
        body.remove(field);
    }
}

/// A typed document together with its store metadata.
///
/// Serializes flat: `{"id": .., "version": .., ...fields of M}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<M> {
    pub id: String,
    pub version: i64,
    #[serde(flatten)]
    pub value: M,
}

/// Binds a domain type to the collection it is stored in.
pub trait DocumentModel: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Name of the collection holding documents of this type.
    const COLLECTION: &'static str;

    /// Checks invariants that must hold before the model is written.
    ///
    /// # Returns
    /// - `Ok(())` - Model may be persisted
    /// - `Err(String)` - Description of the violated invariant
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Encodes the model as a document body.
    fn to_body(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(mut map) => {
                strip_reserved(&mut map);
                Ok(map)
            }
            _ => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "{} documents must serialize to a JSON object",
                Self::COLLECTION
            ))),
        }
    }
}
