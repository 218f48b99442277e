//! Calendar factory for creating test calendar documents.

use sea_orm::{DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::insert_document;

/// Creates a draft calendar for a room listing the given session ids.
///
/// # Returns
/// - `Ok(entity::document::Model)` - Created calendar document
/// - `Err(DbErr)` - Database error during insert
pub async fn create_calendar(
    db: &DatabaseConnection,
    room_id: &str,
    session_ids: Vec<String>,
) -> Result<entity::document::Model, DbErr> {
    insert_document(
        db,
        "calendars",
        json!({
            "roomId": room_id,
            "sessions": session_ids,
            "status": "draft",
        }),
    )
    .await
}
