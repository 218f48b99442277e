//! Client factory for creating test client documents.

use crate::factory::helpers::{insert_document, next_id};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

/// Factory for creating test clients with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let client = ClientFactory::new(&db).name("Ada").stars(9).build().await?;
/// ```
pub struct ClientFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    membership_id: Option<String>,
    favorite_services: Vec<String>,
    stars: u32,
}

impl<'a> ClientFactory<'a> {
    /// Creates a new ClientFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Client {id}"` where id is auto-incremented
    /// - no membership, no favorites, no stars
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: format!("Client {}", next_id()),
            membership_id: None,
            favorite_services: Vec::new(),
            stars: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn membership_id(mut self, membership_id: impl Into<String>) -> Self {
        self.membership_id = Some(membership_id.into());
        self
    }

    pub fn favorite_services(mut self, favorite_services: Vec<String>) -> Self {
        self.favorite_services = favorite_services;
        self
    }

    pub fn stars(mut self, stars: u32) -> Self {
        self.stars = stars;
        self
    }

    /// Builds and inserts the client document.
    ///
    /// # Returns
    /// - `Ok(entity::document::Model)` - Created client document
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::document::Model, DbErr> {
        let email = format!("{}@example.com", self.name.to_lowercase().replace(' ', "."));
        insert_document(
            self.db,
            "clients",
            json!({
                "name": self.name,
                "email": email,
                "membershipId": self.membership_id,
                "favoriteServices": self.favorite_services,
                "notifications": [],
                "stars": self.stars,
            }),
        )
        .await
    }
}

/// Creates a client with default values.
pub async fn create_client(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    ClientFactory::new(db).build().await
}
