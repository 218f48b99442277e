use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        membership::{ApplyChargeDto, ClientQuery, CreateMembershipDto},
    },
    server::{error::AppError, service::membership::MembershipService, state::AppState},
};

/// Tag for grouping membership endpoints in OpenAPI documentation
pub static MEMBERSHIP_TAG: &str = "membership";

/// Create a membership for a client together with its first payment.
///
/// The payment is deducted from the membership balance and the membership becomes the
/// client's current one.
#[utoipa::path(
    post,
    path = "/api/membership/create",
    tag = MEMBERSHIP_TAG,
    request_body = CreateMembershipDto,
    responses(
        (status = 201, description = "Created membership"),
        (status = 400, description = "Invalid membership or payment", body = ErrorDto),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_membership(
    State(state): State<AppState>,
    Json(payload): Json<CreateMembershipDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = MembershipService::new(&state.db);

    let membership = service
        .create_membership(&payload.client_id, payload.membership, payload.payment)
        .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Whether the client holds a membership that is active today.
#[utoipa::path(
    get,
    path = "/api/membership/hasActiveMembership",
    tag = MEMBERSHIP_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Membership state", body = bool),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn has_active_membership(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = MembershipService::new(&state.db);

    let active = service.has_active_membership(&params.client_id).await?;

    Ok((StatusCode::OK, Json(active)))
}

/// Whether the client owes money past a due date.
#[utoipa::path(
    get,
    path = "/api/membership/isDefaulter",
    tag = MEMBERSHIP_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Defaulter state", body = bool),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn is_defaulter(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = MembershipService::new(&state.db);

    let defaulter = service.is_defaulter(&params.client_id).await?;

    Ok((StatusCode::OK, Json(defaulter)))
}

/// Whether the client may reserve a place: active membership and no overdue balance.
#[utoipa::path(
    get,
    path = "/api/membership/itsAllowedToReserve",
    tag = MEMBERSHIP_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Reservation eligibility", body = bool),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn its_allowed_to_reserve(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = MembershipService::new(&state.db);

    let allowed = service.its_allowed_to_reserve(&params.client_id).await?;

    Ok((StatusCode::OK, Json(allowed)))
}

/// Record a payment against the client's current membership.
#[utoipa::path(
    post,
    path = "/api/membership/applyCharge",
    tag = MEMBERSHIP_TAG,
    request_body = ApplyChargeDto,
    responses(
        (status = 200, description = "Membership with reduced balance"),
        (status = 400, description = "Invalid payment", body = ErrorDto),
        (status = 404, description = "Client or membership not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn apply_charge(
    State(state): State<AppState>,
    Json(payload): Json<ApplyChargeDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = MembershipService::new(&state.db);

    let membership = service
        .apply_charge(&payload.client_id, payload.payment)
        .await?;

    Ok((StatusCode::OK, Json(membership)))
}
