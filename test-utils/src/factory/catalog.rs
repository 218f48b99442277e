//! Factories for services, rooms and instructors.

use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::{insert_document, next_id};

/// Creates a service named `"Service {id}"`.
pub async fn create_service(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    insert_document(
        db,
        "services",
        json!({ "name": format!("Service {}", next_id()), "description": "Test service" }),
    )
    .await
}

/// Creates a room named `"Room {id}"` with 20 places.
pub async fn create_room(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    insert_document(
        db,
        "rooms",
        json!({ "name": format!("Room {}", next_id()), "capacity": 20 }),
    )
    .await
}

/// Creates an instructor named `"Instructor {id}"`.
pub async fn create_instructor(db: &DatabaseConnection) -> Result<entity::document::Model, DbErr> {
    insert_document(
        db,
        "instructors",
        json!({ "name": format!("Instructor {}", next_id()), "specialties": ["yoga"] }),
    )
    .await
}
