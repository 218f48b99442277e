use super::*;

/// Tests creating a document in an empty collection.
///
/// Expected: Ok with a generated id, version 1 and the body stored as given
#[tokio::test]
async fn creates_document_with_generated_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let document = repo
        .create("rooms", object(json!({"name": "Room A", "capacity": 12})))
        .await?;

    assert!(!document.id.is_empty());
    assert_eq!(document.version, 1);
    assert_eq!(document.body.get("name"), Some(&json!("Room A")));

    let stored = repo.get_by_id("rooms", &document.id).await?;
    assert_eq!(stored, Some(document));

    Ok(())
}

/// Tests that caller supplied `id` and `version` fields are ignored.
///
/// Expected: Ok with store-assigned id and version, reserved fields absent from the body
#[tokio::test]
async fn ignores_reserved_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let document = repo
        .create(
            "rooms",
            object(json!({"id": "forced", "version": 99, "name": "Room B"})),
        )
        .await?;

    assert_ne!(document.id, "forced");
    assert_eq!(document.version, 1);
    assert!(!document.body.contains_key("id"));
    assert!(!document.body.contains_key("version"));

    Ok(())
}

/// Tests that documents are scoped to their collection.
///
/// Expected: document not visible from another collection
#[tokio::test]
async fn scopes_documents_to_collection() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;

    let repo = DocumentRepository::new(db);
    assert!(repo.get_by_id("clients", &client.id).await?.is_some());
    assert!(repo.get_by_id("sessions", &client.id).await?.is_none());

    Ok(())
}
