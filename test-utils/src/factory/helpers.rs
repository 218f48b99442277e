//! Shared helper utilities for factory methods.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::Value;
use uuid::Uuid;

/// Counter for generating unique names in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Inserts a raw document into a collection.
///
/// # Arguments
/// - `db` - Database connection
/// - `collection` - Collection name
/// - `body` - JSON object stored as the document body
///
/// # Returns
/// - `Ok(entity::document::Model)` - Inserted row with generated id and version 1
/// - `Err(DbErr)` - Database error during insert
pub async fn insert_document(
    db: &DatabaseConnection,
    collection: &str,
    body: Value,
) -> Result<entity::document::Model, DbErr> {
    let now = Utc::now().naive_utc();

    entity::document::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        collection: ActiveValue::Set(collection.to_string()),
        body: ActiveValue::Set(body.to_string()),
        version: ActiveValue::Set(1),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a client holding an active, fully paid membership.
///
/// # Returns
/// - `Ok((client, membership))` - Both inserted documents
/// - `Err(DbErr)` - Database error during creation
pub async fn create_eligible_client(
    db: &DatabaseConnection,
) -> Result<(entity::document::Model, entity::document::Model), DbErr> {
    let client = crate::factory::client::create_client(db).await?;
    let membership = crate::factory::membership::create_membership(db, &client.id).await?;

    Ok((client, membership))
}
