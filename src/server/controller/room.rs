use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::{api::ErrorDto, client::RewardSummaryDto},
    server::{error::AppError, service::reward::RewardService, state::AppState},
};

/// Tag for grouping room endpoints in OpenAPI documentation
pub static ROOM_TAG: &str = "rooms";

/// Grant a star for every attended session not rewarded yet.
///
/// A reservation counts as attended once its session has ended. Each reservation is
/// rewarded at most once.
#[utoipa::path(
    get,
    path = "/api/rooms/giveClientReward",
    tag = ROOM_TAG,
    responses(
        (status = 200, description = "Rewarded clients and reservations", body = RewardSummaryDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn give_client_reward(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = RewardService::new(&state.db)
        .give_client_reward(Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}
