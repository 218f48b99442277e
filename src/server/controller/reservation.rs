use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, UpdateDocumentDto},
        membership::ClientQuery,
        reservation::ReservationQuery,
        session::{CancellationDto, EnrollmentDto, SessionClientDto},
    },
    server::{
        controller::session::enroll_client,
        error::AppError,
        service::{reservation::ReservationService, session::SessionService},
        state::AppState,
    },
};

/// Tag for grouping reservation endpoints in OpenAPI documentation
pub static RESERVATION_TAG: &str = "reservation";

/// Get every reservation of a client.
#[utoipa::path(
    get,
    path = "/api/reservation/getByClient",
    tag = RESERVATION_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Reservations of the client, oldest first"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_by_client(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = ReservationService::new(&state.db);

    let reservations = service.get_by_client(&params.client_id).await?;

    Ok((StatusCode::OK, Json(reservations)))
}

/// Reserve a place in a session.
///
/// Goes through session enrollment, so a full session puts the client on its waiting list
/// instead.
#[utoipa::path(
    post,
    path = "/api/reservation/create",
    tag = RESERVATION_TAG,
    request_body = SessionClientDto,
    responses(
        (status = 201, description = "Client enrolled", body = EnrollmentDto),
        (status = 200, description = "Client waiting", body = EnrollmentDto),
        (status = 404, description = "Session or client not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 422, description = "Client not allowed to reserve", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<SessionClientDto>,
) -> Result<impl IntoResponse, AppError> {
    enroll_client(&state, payload).await
}

/// Update a reservation's descriptive fields.
///
/// Booking state cannot be patched: cancel through `/cancel` and book through `/create`.
#[utoipa::path(
    put,
    path = "/api/reservation/update",
    tag = RESERVATION_TAG,
    request_body = UpdateDocumentDto,
    responses(
        (status = 200, description = "Updated reservation"),
        (status = 400, description = "Patch touches status, session, client or reward flag", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_reservation(
    State(state): State<AppState>,
    Json(payload): Json<UpdateDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = ReservationService::new(&state.db);

    let reservation = service.update(&payload.id, payload.patch).await?;

    Ok((StatusCode::OK, Json(reservation)))
}

/// Cancel a reservation and promote waiting clients into the freed place.
#[utoipa::path(
    delete,
    path = "/api/reservation/cancel",
    tag = RESERVATION_TAG,
    params(ReservationQuery),
    responses(
        (status = 200, description = "Cancelled reservation and promotions", body = CancellationDto),
        (status = 400, description = "Reservation already cancelled", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Query(params): Query<ReservationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = SessionService::new(&state.db, &state.session_locks);

    let cancellation = service
        .cancel_reservation(&params.reservation_id)
        .await?
        .into_dto()?;

    Ok((StatusCode::OK, Json(cancellation)))
}
