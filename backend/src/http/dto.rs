//! Data Transfer Objects for the HTTP API.
//!
//! Timeline responses reuse [`TimelineLayoutData`] directly since it already
//! derives `Serialize`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{deserialize_date, ScheduledItem};
pub use crate::services::TimelineLayoutData;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub repository: String,
}

/// Response for the item listing.
#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ScheduledItem>,
    pub total: usize,
    pub scheduled: usize,
}

/// Query parameters for the timeline endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelineQuery {
    /// First visible day. Defaults to the Monday of the current week.
    pub start: Option<String>,
    /// Number of weeks shown. Defaults to the configured value.
    pub weeks: Option<u32>,
    /// Row height in pixels. Defaults to the configured value.
    pub lane_height: Option<f64>,
}

/// Request body for rescheduling an item.
///
/// Dates accept `YYYY-MM-DD` as well as full timestamps, which are reduced to
/// their calendar day.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDatesRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: NaiveDate,
}
