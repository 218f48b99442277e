use super::*;
use crate::server::{
    model::{catalog::Room, session::GymSession},
    service::entity::EntityService,
};
use serde_json::Map;

/// Tests patching a document with a merge patch.
///
/// Expected: Ok with patched fields replaced, null fields removed, version incremented
#[tokio::test]
async fn modify_merges_patch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;

    let service = EntityService::<Room>::new(db);
    let patch = json!({"name": "Studio", "capacity": null, "floor": 2});
    let updated = service
        .modify(&room.id, patch.as_object().cloned().unwrap())
        .await?;

    assert_eq!(updated.version, 2);
    assert_eq!(updated.value.name, "Studio");
    assert_eq!(updated.value.capacity, None);
    assert_eq!(updated.value.extra.get("floor"), Some(&json!(2)));

    Ok(())
}

/// Tests a patch that breaks the session capacity invariant.
///
/// Expected: Err(BadRequest) and the stored document unchanged
#[tokio::test]
async fn modify_rejects_invalid_result() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::session::SessionFactory::new(db)
        .capacity(2)
        .enrolled(vec!["c1".to_string(), "c2".to_string()])
        .build()
        .await?;

    let service = EntityService::<GymSession>::new(db);
    let patch = json!({"capacity": 1});
    let result = service
        .modify(&session.id, patch.as_object().cloned().unwrap())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(service.get_by_id(&session.id).await?.version, 1);

    Ok(())
}

/// Tests writing a document with a version that was overtaken by another writer.
///
/// Expected: Err(ConcurrentModification)
#[tokio::test]
async fn save_rejects_stale_version() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::create_session(db).await?;

    let service = EntityService::<GymSession>::new(db);
    let first_reader = service.get_by_id(&session.id).await?;
    let mut second_reader = service.get_by_id(&session.id).await?;

    service.save(&first_reader).await?;
    second_reader.value.capacity = 3;
    let result = service.save(&second_reader).await;

    assert!(matches!(result, Err(AppError::ConcurrentModification(_))));
    assert_eq!(service.get_by_id(&session.id).await?.value.capacity, 10);

    Ok(())
}

/// Tests the generic operations on unknown ids.
///
/// Expected: Err(NotFound) for get, modify and delete
#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = EntityService::<Room>::new(db);

    assert!(matches!(
        service.get_by_id("missing").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.modify("missing", Map::new()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete("missing").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests creating a document from a body that does not describe the model.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn create_from_json_rejects_malformed_body() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = EntityService::<GymSession>::new(db);
    let result = service.create_from_json(json!({"capacity": "many"})).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(service.find(&Filter::new()).await?.is_empty());

    Ok(())
}
