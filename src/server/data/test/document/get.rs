use super::*;

/// Tests getting every document of a collection.
///
/// Expected: Ok with documents in insertion order, each carrying id and version
#[tokio::test]
async fn returns_all_documents_in_insertion_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_client(db).await?;
    let second = factory::create_client(db).await?;
    factory::create_session(db).await?;

    let repo = DocumentRepository::new(db);
    let result = repo
        .get("clients", &Filter::new(), &Projection::All)
        .await?;

    assert_eq!(result.len(), 2);
    assert_eq!(result[0]["id"], json!(first.id));
    assert_eq!(result[1]["id"], json!(second.id));
    assert_eq!(result[0]["version"], json!(1));

    Ok(())
}

/// Tests filtering on a scalar field and on array membership.
///
/// Expected: Ok with only the matching sessions
#[tokio::test]
async fn filters_on_fields_and_array_members() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let yoga = factory::session::SessionFactory::new(db)
        .instructor_id("i-1")
        .enrolled(vec!["c-1".to_string()])
        .build()
        .await?;
    factory::session::SessionFactory::new(db)
        .instructor_id("i-2")
        .build()
        .await?;

    let repo = DocumentRepository::new(db);

    let by_instructor = repo
        .get(
            "sessions",
            &Filter::new().eq("instructorId", "i-1"),
            &Projection::All,
        )
        .await?;
    assert_eq!(by_instructor.len(), 1);
    assert_eq!(by_instructor[0]["id"], json!(yoga.id));

    let by_enrolled = repo
        .get(
            "sessions",
            &Filter::new().eq("enrolled", "c-1"),
            &Projection::All,
        )
        .await?;
    assert_eq!(by_enrolled.len(), 1);

    let none = repo
        .get(
            "sessions",
            &Filter::new().eq("instructorId", "missing"),
            &Projection::All,
        )
        .await?;
    assert!(none.is_empty());

    Ok(())
}

/// Tests applying an inclusion projection.
///
/// Expected: Ok with only id and the included fields
#[tokio::test]
async fn applies_inclusion_projection() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;

    let repo = DocumentRepository::new(db);
    let projection = Projection::from_json(Some(json!({"name": 1}))).unwrap();
    let result = repo.get("clients", &Filter::new(), &projection).await?;

    let fields = result[0].as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["id"], json!(client.id));
    assert!(fields.contains_key("name"));

    Ok(())
}

/// Tests filtering on the document id.
///
/// Only the addressed row is read, so an unreadable sibling document does not matter.
///
/// Expected: Ok with the one document when every condition holds, empty otherwise
#[tokio::test]
async fn id_filter_reads_single_document() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;
    factory::insert_document(db, "clients", json!("not an object")).await?;

    let repo = DocumentRepository::new(db);

    let found = repo
        .find("clients", &Filter::new().eq("id", client.id.as_str()))
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, client.id);

    let other_collection = repo
        .find("sessions", &Filter::new().eq("id", client.id.as_str()))
        .await?;
    assert!(other_collection.is_empty());

    let unmatched = repo
        .find(
            "clients",
            &Filter::new()
                .eq("id", client.id.as_str())
                .eq("name", "Nobody"),
        )
        .await?;
    assert!(unmatched.is_empty());

    Ok(())
}
