use super::*;

/// Tests enrolling through the HTTP surface until the session is full.
///
/// Expected: 201 with the reservation, then 200 with a waiting position
#[tokio::test]
async fn enroll_then_wait() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = factory::create_eligible_client(db).await.unwrap();
    let (second, _) = factory::create_eligible_client(db).await.unwrap();
    let session = factory::session::SessionFactory::new(db)
        .capacity(1)
        .build()
        .await
        .unwrap();

    let (status, enrolled) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::POST,
        "/api/sessions/enroll",
        Some(json!({"sessionId": session.id, "clientId": first.id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrolled["status"], json!("enrolled"));
    assert_eq!(enrolled["reservation"]["clientId"], json!(first.id));

    let (status, waiting) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::POST,
        "/api/reservation/create",
        Some(json!({"sessionId": session.id, "clientId": second.id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(waiting, json!({"status": "waiting", "position": 0}));
}

/// Tests enrolling a client without membership in a session with free places.
///
/// Expected: 422 Unprocessable Entity
#[tokio::test]
async fn enroll_ineligible_client() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await.unwrap();
    let session = factory::create_session(db).await.unwrap();

    let (status, _) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::POST,
        "/api/sessions/enroll",
        Some(json!({"sessionId": session.id, "clientId": client.id})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// Tests cancelling through the HTTP surface.
///
/// Expected: 200 listing the promoted waiting client
#[tokio::test]
async fn cancel_promotes_waiting_client() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = factory::create_eligible_client(db).await.unwrap();
    let (second, _) = factory::create_eligible_client(db).await.unwrap();
    let session = factory::session::SessionFactory::new(db)
        .capacity(1)
        .enrolled(vec![first.id.clone()])
        .waiting_list(vec![second.id.clone()])
        .build()
        .await
        .unwrap();
    let reservation = factory::reservation::create_reservation(db, &first.id, &session.id)
        .await
        .unwrap();

    let uri = format!("/api/reservation/cancel?reservationId={}", reservation.id);
    let (status, body) = send(app(db, CalendarFilterKind::Instructor), Method::DELETE, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reservation"]["status"], json!("cancelled"));
    assert_eq!(body["promoted"][0]["clientId"], json!(second.id));
    assert_eq!(body["skipped"], json!([]));
}

/// Tests filtering a room calendar with the date range strategy.
///
/// Expected: 200 with the sessions starting inside the range, empty array without bounds
#[tokio::test]
async fn calendar_filter_uses_configured_strategy() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await.unwrap();
    let morning = factory::session::SessionFactory::new(db)
        .date("2026-05-01T08:00:00Z".parse().unwrap())
        .build()
        .await
        .unwrap();
    let evening = factory::session::SessionFactory::new(db)
        .date("2026-05-01T19:00:00Z".parse().unwrap())
        .build()
        .await
        .unwrap();
    factory::calendar::create_calendar(db, &room.id, vec![morning.id.clone(), evening.id.clone()])
        .await
        .unwrap();

    let uri = format!("/api/calendar/getFilter?roomId={}", room.id);
    let (status, body) = send(
        app(db, CalendarFilterKind::DateRange),
        Method::POST,
        &uri,
        Some(json!({"from": "2026-05-01T12:00:00Z", "to": "2026-05-02T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], json!(evening.id));

    let (status, body) = send(
        app(db, CalendarFilterKind::DateRange),
        Method::POST,
        &uri,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

/// Tests the eligibility endpoints for an unknown client.
///
/// Expected: 404 Not Found
#[tokio::test]
async fn membership_checks_unknown_client() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, _) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::GET,
        "/api/membership/itsAllowedToReserve?clientId=nobody",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tests adding a session to a room that has no calendar yet.
///
/// Expected: 200 with a new draft calendar listing the session
#[tokio::test]
async fn add_session_to_calendar_creates_draft() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let room = factory::catalog::create_room(db).await.unwrap();
    let session = factory::create_session(db).await.unwrap();

    let uri = format!(
        "/api/sessions/addSessionToCalendar?sessionId={}&roomId={}",
        session.id, room.id
    );
    let (status, calendar) = send(app(db, CalendarFilterKind::Instructor), Method::PUT, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calendar["roomId"], json!(room.id));
    assert_eq!(calendar["sessions"], json!([session.id]));
    assert_eq!(calendar["status"], json!("draft"));
}

/// Tests patching booking state through the generic update routes.
///
/// Expected: 400 for reservation status and session enrolled list; cancel still promotes
#[tokio::test]
async fn update_routes_reject_booking_state() {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (first, _) = factory::create_eligible_client(db).await.unwrap();
    let (second, _) = factory::create_eligible_client(db).await.unwrap();
    let session = factory::session::SessionFactory::new(db)
        .capacity(1)
        .enrolled(vec![first.id.clone()])
        .waiting_list(vec![second.id.clone()])
        .build()
        .await
        .unwrap();
    let reservation = factory::reservation::create_reservation(db, &first.id, &session.id)
        .await
        .unwrap();

    let (status, _) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::PUT,
        "/api/reservation/update",
        Some(json!({"id": reservation.id, "patch": {"status": "cancelled"}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::PUT,
        "/api/sessions/update",
        Some(json!({"id": session.id, "patch": {"enrolled": ["ghost-client"]}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        app(db, CalendarFilterKind::Instructor),
        Method::PUT,
        "/api/reservation/update",
        Some(json!({"id": reservation.id, "patch": {"note": "front row"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["note"], json!("front row"));
    assert_eq!(updated["status"], json!("active"));

    let uri = format!("/api/reservation/cancel?reservationId={}", reservation.id);
    let (status, body) = send(app(db, CalendarFilterKind::Instructor), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["promoted"][0]["clientId"], json!(second.id));
}
