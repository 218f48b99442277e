use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

/// Body of the `POST .../get` endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GetParamsDto {
    /// Field equality conditions, e.g. `{"roomId": "..."}`.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub filter: Option<Value>,
    /// Fields to include (`1`) or exclude (`0`).
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub projection: Option<Value>,
}

/// Body of the `PUT .../update` endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDocumentDto {
    pub id: String,
    /// Top-level merge patch; `null` removes a field.
    #[schema(value_type = Object)]
    pub patch: Map<String, Value>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: String,
}
