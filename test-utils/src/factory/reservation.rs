//! Reservation factory for creating test reservation documents.

use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::insert_document;

/// Creates an active, not yet rewarded reservation.
///
/// # Returns
/// - `Ok(entity::document::Model)` - Created reservation document
/// - `Err(DbErr)` - Database error during insert
pub async fn create_reservation(
    db: &DatabaseConnection,
    client_id: &str,
    session_id: &str,
) -> Result<entity::document::Model, DbErr> {
    insert_document(
        db,
        "reservations",
        json!({
            "clientId": client_id,
            "sessionId": session_id,
            "status": "active",
            "createdAt": chrono::Utc::now(),
            "rewarded": false,
        }),
    )
    .await
}
