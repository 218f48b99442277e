use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, GetParamsDto},
        client::{AddNotificationDto, FavoriteServiceQuery, NotificationQuery, RewardSummaryDto},
        membership::ClientQuery,
    },
    server::{
        error::AppError,
        model::query::{Filter, Projection},
        service::{client::ClientService, reward::RewardService},
        state::AppState,
    },
};

/// Tag for grouping client endpoints in OpenAPI documentation
pub static CLIENT_TAG: &str = "client";

#[utoipa::path(
    get,
    path = "/api/client/getOne",
    tag = CLIENT_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Client document"),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_one(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let client = ClientService::new(&state.db)
        .get_one(&params.client_id)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

/// Get clients with their current membership embedded under `membership`.
#[utoipa::path(
    post,
    path = "/api/client/getCompleted",
    tag = CLIENT_TAG,
    request_body = GetParamsDto,
    responses(
        (status = 200, description = "Clients with membership embedded"),
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

    let clients = ClientService::new(&state.db)
        .get_completed(&filter, &projection)
        .await?;

    Ok((StatusCode::OK, Json(clients)))
}

#[utoipa::path(
    put,
    path = "/api/client/addFavoriteService",
    tag = CLIENT_TAG,
    params(FavoriteServiceQuery),
    responses(
        (status = 200, description = "Client after the change"),
        (status = 404, description = "Client or service not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_favorite_service(
    State(state): State<AppState>,
    Query(params): Query<FavoriteServiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let client = ClientService::new(&state.db)
        .add_favorite_service(&params.client_id, &params.service_id)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    delete,
    path = "/api/client/deleteFavoriteService",
    tag = CLIENT_TAG,
    params(FavoriteServiceQuery),
    responses(
        (status = 200, description = "Client after the change"),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_favorite_service(
    State(state): State<AppState>,
    Query(params): Query<FavoriteServiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let client = ClientService::new(&state.db)
        .delete_favorite_service(&params.client_id, &params.service_id)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    get,
    path = "/api/client/getFavoritesServices",
    tag = CLIENT_TAG,
    params(ClientQuery),
    responses(
        (status = 200, description = "Favorite service documents"),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_favorites_services(
    State(state): State<AppState>,
    Query(params): Query<ClientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = ClientService::new(&state.db)
        .get_favorites_services(&params.client_id)
        .await?;

    Ok((StatusCode::OK, Json(services)))
}

#[utoipa::path(
    post,
    path = "/api/client/addNotification",
    tag = CLIENT_TAG,
    request_body = AddNotificationDto,
    responses(
        (status = 201, description = "Created notification"),
        (status = 404, description = "Client not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_notification(
    State(state): State<AppState>,
    Json(payload): Json<AddNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    let notification = ClientService::new(&state.db)
        .add_notification(&payload.client_id, &payload.message)
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    delete,
    path = "/api/client/deleteNotification",
    tag = CLIENT_TAG,
    params(NotificationQuery),
    responses(
        (status = 204, description = "Notification removed"),
        (status = 404, description = "Client or notification not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    ClientService::new(&state.db)
        .delete_notification(&params.client_id, params.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Turn collected stars into rewards.
///
/// Every client holding at least the reward threshold of stars gets a reward notification
/// and the threshold is deducted from their stars.
#[utoipa::path(
    get,
    path = "/api/client/checkStars",
    tag = CLIENT_TAG,
    responses(
        (status = 200, description = "Rewarded clients", body = RewardSummaryDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_stars(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let summary = RewardService::new(&state.db).check_stars().await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
