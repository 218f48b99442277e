use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// A (session, client) pair used by enrollment and waiting-list endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionClientDto {
    pub session_id: String,
    pub client_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct SessionClientQuery {
    pub session_id: String,
    pub client_id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase", parameter_in = Query)]
pub struct SessionRoomQuery {
    pub session_id: String,
    pub room_id: String,
}

/// Result of an enrollment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EnrollmentDto {
    /// The client got a place; the reservation document is attached.
    Enrolled {
        #[schema(value_type = Object)]
        reservation: Value,
    },
    /// The session is full; the client waits at `position` (0 based).
    Waiting { position: usize },
}

/// Client promoted from a waiting list.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDto {
    pub client_id: String,
    pub reservation_id: String,
}

/// Result of cancelling a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancellationDto {
    #[schema(value_type = Object)]
    pub reservation: Value,
    pub promoted: Vec<PromotionDto>,
    /// Waiting clients passed over because they were not eligible.
    pub skipped: Vec<String>,
}
