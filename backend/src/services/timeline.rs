//! Timeline layout service.
//!
//! Fetches the item set, filters out malformed items, packs lanes and
//! projects every bar onto the requested window. Used by the HTTP layer,
//! which has no long-lived session.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::repository::{RepositoryResult, ScheduledItemRepository};
use crate::db::services as db_services;
use crate::models::{ItemId, ScheduledItem};
use crate::timeline::{
    build_layout, pack_lanes, partition_valid, RenderWindow, TimelineBar, TimelineError,
};

/// Timeline dataset for one window.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayoutData {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub weeks_to_show: u32,
    pub lane_height_px: f64,
    pub lane_count: usize,
    pub bars: Vec<TimelineBar>,
    /// Items without a start or end date.
    pub unscheduled: Vec<ItemId>,
    /// Items skipped because their start is after their end.
    pub rejected: Vec<ItemId>,
    /// Scheduled items entirely outside the window.
    pub hidden_count: usize,
    pub total_count: usize,
}

/// Compute timeline data from an already fetched item set.
pub fn compute_timeline_data(
    items: Vec<ScheduledItem>,
    window: RenderWindow,
    lane_height_px: f64,
) -> Result<TimelineLayoutData, TimelineError> {
    let total_count = items.len();
    let (valid, rejected) = partition_valid(items);
    let packing = pack_lanes(&valid)?;
    let layout = build_layout(&valid, &packing, window, lane_height_px, None);

    Ok(TimelineLayoutData {
        window_start: window.start(),
        window_end: window.end(),
        weeks_to_show: window.weeks_to_show(),
        lane_height_px,
        lane_count: layout.lane_count,
        bars: layout.bars,
        unscheduled: layout.unscheduled,
        rejected: rejected.into_iter().map(|(id, _)| id).collect(),
        hidden_count: layout.hidden.len(),
        total_count,
    })
}

/// Fetch items and compute the timeline for `window`.
pub async fn get_timeline_layout<R: ScheduledItemRepository + ?Sized>(
    repo: &R,
    window: RenderWindow,
    lane_height_px: f64,
) -> Result<TimelineLayoutData, TimelineError> {
    let items = db_services::fetch_scheduled_items(repo)
        .await
        .map_err(TimelineError::Fetch)?;
    compute_timeline_data(items, window, lane_height_px)
}

/// Persist new dates for an item and return it as stored.
pub async fn reschedule_item<R: ScheduledItemRepository + ?Sized>(
    repo: &R,
    item_id: &ItemId,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<ScheduledItem> {
    db_services::update_item_dates(repo, item_id, start, end).await?;
    db_services::get_scheduled_item(repo, item_id).await
}
