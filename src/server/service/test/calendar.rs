use super::*;
use crate::server::{
    model::calendar::{CalendarStatus, FilterCriteria},
    service::calendar::{
        filter::{FilterByInstructor, FilterByService},
        CalendarService,
    },
};

/// Tests resolving a room calendar.
///
/// Expected: sessions in calendar order, ids of deleted sessions left out
#[tokio::test]
async fn resolves_calendar_sessions_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;
    let first = factory::create_session(db).await?;
    let second = factory::create_session(db).await?;
    factory::calendar::create_calendar(
        db,
        &room.id,
        vec![second.id.clone(), "deleted".to_string(), first.id.clone()],
    )
    .await?;

    let service = CalendarService::new(db, &FilterByInstructor);
    let calendar = service.get_calendar_by_room(&room.id).await?;

    let ids: Vec<&str> = calendar.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);

    assert!(matches!(
        service.get_calendar_by_room("no-room").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests filtering a calendar with the injected strategy.
///
/// Expected: only matching sessions, calendar document unchanged
#[tokio::test]
async fn filters_with_configured_strategy() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;
    let yoga = factory::session::SessionFactory::new(db)
        .service_id("yoga")
        .build()
        .await?;
    let spin = factory::session::SessionFactory::new(db)
        .service_id("spin")
        .build()
        .await?;
    let calendar = factory::calendar::create_calendar(
        db,
        &room.id,
        vec![yoga.id.clone(), spin.id.clone()],
    )
    .await?;

    let service = CalendarService::new(db, &FilterByService);
    let criteria = FilterCriteria {
        service_id: Some("spin".to_string()),
        ..Default::default()
    };
    let result = service.filter_calendar(&room.id, &criteria).await?;

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, spin.id);

    let unmatched = FilterCriteria {
        service_id: Some("boxing".to_string()),
        ..Default::default()
    };
    assert!(service.filter_calendar(&room.id, &unmatched).await?.is_empty());

    let stored = service.get_calendar_by_room(&room.id).await?;
    assert_eq!(stored.calendar.version, 1);
    assert_eq!(stored.calendar.id, calendar.id);

    Ok(())
}

/// Tests publishing a calendar.
///
/// Expected: status becomes published, publishing again keeps the version
#[tokio::test]
async fn publishes_calendar() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await?;
    let calendar = factory::calendar::create_calendar(db, &room.id, Vec::new()).await?;

    let service = CalendarService::new(db, &FilterByInstructor);
    let published = service.publish_calendar(&calendar.id).await?;
    let again = service.publish_calendar(&calendar.id).await?;

    assert_eq!(published.value.status, CalendarStatus::Published);
    assert_eq!(published.version, 2);
    assert_eq!(again.version, 2);

    Ok(())
}
