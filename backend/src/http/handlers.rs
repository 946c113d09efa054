//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;

use super::dto::{
    HealthResponse, ItemListResponse, TimelineLayoutData, TimelineQuery, UpdateDatesRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{parse_calendar_date, week_start, ItemId, ScheduledItem};
use crate::services;
use crate::timeline::RenderWindow;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
    }))
}

// =============================================================================
// Items
// =============================================================================

/// GET /v1/items
pub async fn list_items(State(state): State<AppState>) -> HandlerResult<ItemListResponse> {
    let items = db_services::fetch_scheduled_items(state.repository.as_ref()).await?;
    let scheduled = items.iter().filter(|item| item.is_scheduled()).count();

    Ok(Json(ItemListResponse {
        total: items.len(),
        scheduled,
        items,
    }))
}

/// GET /v1/items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> HandlerResult<ScheduledItem> {
    let item = db_services::get_scheduled_item(state.repository.as_ref(), &ItemId::from(item_id))
        .await?;
    Ok(Json(item))
}

/// PUT /v1/items/{item_id}/dates
///
/// Persist a new date range. Rejects `start_date > end_date` with 400 and
/// unknown ids with 404.
pub async fn update_item_dates(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateDatesRequest>,
) -> HandlerResult<ScheduledItem> {
    let item = services::reschedule_item(
        state.repository.as_ref(),
        &ItemId::from(item_id),
        request.start_date,
        request.end_date,
    )
    .await?;
    Ok(Json(item))
}

// =============================================================================
// Timeline
// =============================================================================

/// GET /v1/timeline?start=YYYY-MM-DD&weeks=N&lane_height=PX
///
/// Lane-packed, window-projected timeline.
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> HandlerResult<TimelineLayoutData> {
    let start = match query.start.as_deref() {
        Some(raw) => parse_calendar_date(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid start: {}", e)))?,
        None => week_start(Local::now().date_naive()),
    };

    let weeks = query.weeks.unwrap_or(state.timeline.weeks_to_show);
    if weeks == 0 {
        return Err(AppError::BadRequest("weeks must be at least 1".to_string()));
    }

    let lane_height_px = query.lane_height.unwrap_or(state.timeline.lane_height_px);
    if !(lane_height_px.is_finite() && lane_height_px > 0.0) {
        return Err(AppError::BadRequest(
            "lane_height must be a positive number".to_string(),
        ));
    }

    let data = services::get_timeline_layout(
        state.repository.as_ref(),
        RenderWindow::new(start, weeks),
        lane_height_px,
    )
    .await?;
    Ok(Json(data))
}
