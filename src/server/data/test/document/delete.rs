use super::*;

/// Tests deleting an existing document.
///
/// Expected: Ok(true) and the document is gone
#[tokio::test]
async fn deletes_existing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;

    let repo = DocumentRepository::new(db);
    assert!(repo.delete("clients", &client.id).await?);
    assert!(repo.get_by_id("clients", &client.id).await?.is_none());

    Ok(())
}

/// Tests deleting an unknown id, or a known id through the wrong collection.
///
/// Expected: Ok(false) and nothing removed
#[tokio::test]
async fn returns_false_when_nothing_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;

    let repo = DocumentRepository::new(db);
    assert!(!repo.delete("clients", "unknown").await?);
    assert!(!repo.delete("sessions", &client.id).await?);
    assert!(repo.get_by_id("clients", &client.id).await?.is_some());

    Ok(())
}
