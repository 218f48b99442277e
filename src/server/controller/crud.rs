//! Generic document endpoints shared by every resource group.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::{
    model::api::{GetParamsDto, IdQuery, UpdateDocumentDto},
    server::{
        error::AppError,
        model::{
            document::DocumentModel,
            query::{Filter, Projection},
        },
        service::entity::EntityService,
        state::AppState,
    },
};

/// Gets the documents of a collection matching a filter.
///
/// # Returns
/// - `200 OK` - Array of matching documents, projected
/// - `400 Bad Request` - Malformed filter or projection
pub async fn get<M: DocumentModel>(
    State(state): State<AppState>,
    Json(params): Json<GetParamsDto>,
) -> Result<impl IntoResponse, AppError> {
    let filter = Filter::from_json(params.filter)?;
    let projection = Projection::from_json(params.projection)?;

    let documents = EntityService::<M>::new(&state.db)
        .get(&filter, &projection)
        .await?;

    Ok((StatusCode::OK, Json(documents)))
}

/// Creates a document.
///
/// # Returns
/// - `201 Created` - Created document with its id and version
/// - `400 Bad Request` - Body is not a valid document of the collection
pub async fn create<M: DocumentModel>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let document = EntityService::<M>::new(&state.db)
        .create_from_json(body)
        .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// Applies a merge patch to a document.
///
/// # Returns
/// - `200 OK` - Updated document
/// - `400 Bad Request` - Patch produces an invalid document
/// - `404 Not Found` - Unknown id
/// - `409 Conflict` - Document modified concurrently
pub async fn update<M: DocumentModel>(
    State(state): State<AppState>,
    Json(payload): Json<UpdateDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let document = EntityService::<M>::new(&state.db)
        .modify(&payload.id, payload.patch)
        .await?;

    Ok((StatusCode::OK, Json(document)))
}

/// Deletes a document.
///
/// # Returns
/// - `204 No Content` - Document deleted
/// - `404 Not Found` - Unknown id
pub async fn delete<M: DocumentModel>(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    EntityService::<M>::new(&state.db).delete(&params.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
