use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::{
    model::{
        api::{ErrorDto, GetParamsDto, IdQuery, UpdateDocumentDto},
        session::{EnrollmentDto, SessionClientDto, SessionClientQuery, SessionQuery, SessionRoomQuery},
    },
    server::{
        error::AppError,
        model::query::{Filter, Projection},
        service::session::SessionService,
        state::AppState,
    },
};

/// Tag for grouping session endpoints in OpenAPI documentation
pub static SESSION_TAG: &str = "sessions";

/// Create a session.
///
/// Replaces the generic create so that capacity rules are checked the same way as on
/// every other session write.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let session = service.create(body).await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Update a session.
///
/// Runs under the session lock and offers places freed by a capacity increase to the
/// waiting list.
pub async fn update_session(
    State(state): State<AppState>,
    Json(payload): Json<UpdateDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let session = service.update(&payload.id, payload.patch).await?;

    Ok((StatusCode::OK, Json(session)))
}

/// Delete a session and cancel its active reservations.
pub async fn delete_session(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    service.delete(&params.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get sessions with their service, instructor and room embedded.
///
/// # Returns
/// - `200 OK` - Sessions matching the filter, each with `service`, `instructor` and
///   `room` fields holding the referenced document or `null`
/// - `400 Bad Request` - Malformed filter or projection
#[utoipa::path(
    post,
    path = "/api/sessions/getCompleted",
    tag = SESSION_TAG,
    request_body = GetParamsDto,
    responses(
        (status = 200, description = "Sessions with references embedded"),
        (status = 400, description = "Malformed filter or projection", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_completed(
    State(state): State<AppState>,
    Json(params): Json<GetParamsDto>,
) -> Result<impl IntoResponse, AppError> {
    let filter = Filter::from_json(params.filter)?;
    let projection = Projection::from_json(params.projection)?;
    let service = SessionService::new(&state.db, &state.session_locks);

    let sessions = service.get_completed(&filter, &projection).await?;

    Ok((StatusCode::OK, Json(sessions)))
}

/// Add a session to a room's calendar.
///
/// Creates the room's calendar as a draft when it does not exist yet.
#[utoipa::path(
    put,
    path = "/api/sessions/calendar",
    tag = SESSION_TAG,
    params(SessionRoomQuery),
    responses(
        (status = 200, description = "Calendar listing the session"),
        (status = 404, description = "Session or room not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_to_calendar(
    State(state): State<AppState>,
    Query(params): Query<SessionRoomQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let calendar = service
        .add_session_to_calendar(&params.session_id, &params.room_id)
        .await?;

    Ok((StatusCode::OK, Json(calendar)))
}

/// Get the enrolled clients of a session in enrollment order.
#[utoipa::path(
    get,
    path = "/api/sessions/getClientsBySession",
    tag = SESSION_TAG,
    params(SessionQuery),
    responses(
        (status = 200, description = "Enrolled clients"),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_clients_by_session(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let clients = service.get_clients_by_session(&params.session_id).await?;

    Ok((StatusCode::OK, Json(clients)))
}

/// Put a client on a session's waiting list.
///
/// Enqueueing a client who is already waiting leaves the list unchanged.
#[utoipa::path(
    post,
    path = "/api/sessions/enqueueWaitingList",
    tag = SESSION_TAG,
    request_body = SessionClientDto,
    responses(
        (status = 200, description = "Session after the change"),
        (status = 400, description = "Client already enrolled", body = ErrorDto),
        (status = 404, description = "Session or client not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enqueue_waiting_list(
    State(state): State<AppState>,
    Json(payload): Json<SessionClientDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let session = service
        .enqueue_waiting_list(&payload.session_id, &payload.client_id)
        .await?;

    Ok((StatusCode::OK, Json(session)))
}

/// Remove a client from a session's waiting list.
#[utoipa::path(
    delete,
    path = "/api/sessions/withdrawWaitingList",
    tag = SESSION_TAG,
    params(SessionClientQuery),
    responses(
        (status = 200, description = "Session after the change"),
        (status = 404, description = "Session not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn withdraw_waiting_list(
    State(state): State<AppState>,
    Query(params): Query<SessionClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let session = service
        .withdraw_waiting_list(&params.session_id, &params.client_id)
        .await?;

    Ok((StatusCode::OK, Json(session)))
}

/// Enroll a client in a session, or put them on the waiting list when it is full.
///
/// # Returns
/// - `201 Created` - Client enrolled, reservation attached
/// - `200 OK` - Session full, client waiting at the returned position
/// - `422 Unprocessable Entity` - Client may not reserve
#[utoipa::path(
    post,
    path = "/api/sessions/enroll",
    tag = SESSION_TAG,
    request_body = SessionClientDto,
    responses(
        (status = 201, description = "Client enrolled", body = EnrollmentDto),
        (status = 200, description = "Client waiting", body = EnrollmentDto),
        (status = 400, description = "Client already enrolled", body = ErrorDto),
        (status = 404, description = "Session or client not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 422, description = "Client not allowed to reserve", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enroll(
    State(state): State<AppState>,
    Json(payload): Json<SessionClientDto>,
) -> Result<impl IntoResponse, AppError> {
    enroll_client(&state, payload).await
}

/// Shared by `sessions/enroll` and `reservation/create`.
pub(super) async fn enroll_client(
    state: &AppState,
    payload: SessionClientDto,
) -> Result<(StatusCode, Json<EnrollmentDto>), AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let outcome = service
        .enroll(&payload.session_id, &payload.client_id)
        .await?
        .into_dto()?;

    let status = match outcome {
        EnrollmentDto::Enrolled { .. } => StatusCode::CREATED,
        EnrollmentDto::Waiting { .. } => StatusCode::OK,
    };

    Ok((status, Json(outcome)))
}
