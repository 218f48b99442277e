use super::*;

/// Tests replacing a document with the version that was read.
///
/// Expected: Written with the new body and version incremented
#[tokio::test]
async fn writes_when_version_matches() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;

    let repo = DocumentRepository::new(db);
    let outcome = repo
        .replace_if_version("rooms", &room.id, 1, object(json!({"name": "Renamed"})))
        .await?;

    let WriteOutcome::Written(document) = outcome else {
        panic!("expected the write to succeed, got {:?}", outcome);
    };
    assert_eq!(document.version, 2);
    assert_eq!(document.body.get("name"), Some(&json!("Renamed")));
    assert!(!document.body.contains_key("capacity"));

    Ok(())
}

/// Tests that the second of two writers holding the same version is rejected.
///
/// Expected: Stale with the version left by the first writer, body unchanged by the second
#[tokio::test]
async fn rejects_stale_version() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;

    let repo = DocumentRepository::new(db);
    repo.replace_if_version("rooms", &room.id, 1, object(json!({"name": "First"})))
        .await?;
    let outcome = repo
        .replace_if_version("rooms", &room.id, 1, object(json!({"name": "Second"})))
        .await?;

    assert_eq!(outcome, WriteOutcome::Stale { current_version: 2 });

    let stored = repo.get_by_id("rooms", &room.id).await?.unwrap();
    assert_eq!(stored.body.get("name"), Some(&json!("First")));

    Ok(())
}

/// Tests replacing a document that does not exist.
///
/// Expected: Missing
#[tokio::test]
async fn reports_missing_document() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DocumentRepository::new(db);
    let outcome = repo
        .replace_if_version("rooms", "nope", 1, object(json!({"name": "x"})))
        .await?;

    assert_eq!(outcome, WriteOutcome::Missing);

    Ok(())
}
