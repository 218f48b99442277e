//! Session factory for creating test gym session documents.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::{insert_document, next_id};

/// Factory for creating test sessions with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionFactory::new(&db)
///     .capacity(1)
///     .enrolled(vec![client.id.clone()])
///     .waiting_list(vec![other.id.clone()])
///     .build()
///     .await?;
/// ```
pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    date: DateTime<Utc>,
    capacity: u32,
    enrolled: Vec<String>,
    waiting_list: Vec<String>,
    instructor_id: Option<String>,
    room_id: Option<String>,
    service_id: Option<String>,
}

impl<'a> SessionFactory<'a> {
    /// Creates a new SessionFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Session {id}"`
    /// - date: 1 day from now
    /// - capacity: 10, nobody enrolled or waiting
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Session {}", next_id()),
            date: Utc::now() + Duration::days(1),
            capacity: 10,
            enrolled: Vec::new(),
            waiting_list: Vec::new(),
            instructor_id: None,
            room_id: None,
            service_id: None,
        }
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn enrolled(mut self, enrolled: Vec<String>) -> Self {
        self.enrolled = enrolled;
        self
    }

    pub fn waiting_list(mut self, waiting_list: Vec<String>) -> Self {
        self.waiting_list = waiting_list;
        self
    }

    pub fn instructor_id(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    pub fn room_id(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Builds and inserts the session document.
    ///
    /// # Returns
    /// - `Ok(entity::document::Model)` - Created session document
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        insert_document(
            self.db,
            "sessions",
            json!({
                "name": self.name,
                "date": self.date,
                "durationMinutes": 60,
                "capacity": self.capacity,
                "enrolled": self.enrolled,
                "waitingList": self.waiting_list,
                "instructorId": self.instructor_id,
                "roomId": self.room_id,
                "serviceId": self.service_id,
            }),
        )
        .await
    }
}

/// Creates a session with default values.
pub async fn create_session(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    SessionFactory::new(db).build().await
}
