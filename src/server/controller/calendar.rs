use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        calendar::{CalendarQuery, FilterCriteriaDto, RoomQuery},
    },
    server::{
        error::AppError, model::calendar::FilterCriteria, service::calendar::CalendarService,
        state::AppState,
    },
};

/// Tag for grouping calendar endpoints in OpenAPI documentation
pub static CALENDAR_TAG: &str = "calendar";

/// Get the calendar of a room with its sessions in calendar order.
#[utoipa::path(
    get,
    path = "/api/calendar/getByRoom",
    tag = CALENDAR_TAG,
    params(RoomQuery),
    responses(
        (status = 200, description = "Calendar and resolved sessions"),
        (status = 404, description = "Room has no calendar", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_by_room(
    State(state): State<AppState>,
    Query(params): Query<RoomQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = CalendarService::new(&state.db, state.calendar_filter.as_ref());

    let calendar = service.get_calendar_by_room(&params.room_id).await?;

    Ok((StatusCode::OK, Json(calendar)))
}

/// Mark a calendar as published.
#[utoipa::path(
    put,
    path = "/api/calendar/publish",
    tag = CALENDAR_TAG,
    params(CalendarQuery),
    responses(
        (status = 200, description = "Published calendar"),
        (status = 404, description = "Calendar not found", body = ErrorDto),
        (status = 409, description = "Concurrent modification", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn publish(
    State(state): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = CalendarService::new(&state.db, state.calendar_filter.as_ref());

    let calendar = service.publish_calendar(&params.calendar_id).await?;

    Ok((StatusCode::OK, Json(calendar)))
}

/// Filter the sessions of a room's calendar.
///
/// The configured filter strategy decides which criterion is read. Criteria that match
/// nothing give an empty array.
#[utoipa::path(
    post,
    path = "/api/calendar/getFilter",
    tag = CALENDAR_TAG,
    params(RoomQuery),
    request_body = FilterCriteriaDto,
    responses(
        (status = 200, description = "Matching sessions in calendar order"),
        (status = 404, description = "Room has no calendar", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_filter(
    State(state): State<AppState>,
    Query(params): Query<RoomQuery>,
    Json(payload): Json<FilterCriteriaDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = CalendarService::new(&state.db, state.calendar_filter.as_ref());

    let criteria = FilterCriteria::from_dto(payload);
    let sessions = service.filter_calendar(&params.room_id, &criteria).await?;

    Ok((StatusCode::OK, Json(sessions)))
}
