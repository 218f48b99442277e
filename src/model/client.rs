use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct FavoriteServiceQuery {
    pub client_id: String,
    pub service_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct NotificationQuery {
    pub client_id: String,
    pub id: u32,
}

/// Body of `client/addNotification`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddNotificationDto {
    pub client_id: String,
    pub message: String,
}

/// Outcome of a reward run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardSummaryDto {
    /// Clients touched by the run.
    pub client_ids: Vec<String>,
    /// Reservations converted into stars (attendance rewards only).
    pub reservations_rewarded: usize,
}
