//! Projection of date ranges onto the visible render window.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{add_days, days_between, DateRange, ScheduledItem};

/// A span of `weeks_to_show * 7` days starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderWindow {
    start: NaiveDate,
    weeks_to_show: u32,
}

impl RenderWindow {
    /// Create a window. `weeks_to_show` is clamped to at least one week.
    pub fn new(start: NaiveDate, weeks_to_show: u32) -> Self {
        Self {
            start,
            weeks_to_show: weeks_to_show.max(1),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn weeks_to_show(&self) -> u32 {
        self.weeks_to_show
    }

    pub fn total_days(&self) -> i64 {
        i64::from(self.weeks_to_show) * 7
    }

    /// Last visible day (inclusive).
    pub fn end(&self) -> NaiveDate {
        add_days(self.start, self.total_days() - 1)
    }

    pub fn as_range(&self) -> DateRange {
        DateRange::new(self.start, self.end()).unwrap_or(DateRange::single_day(self.start))
    }

    /// The same window moved by whole weeks.
    pub fn shifted_weeks(&self, weeks: i64) -> Self {
        Self {
            start: add_days(self.start, weeks.saturating_mul(7)),
            weeks_to_show: self.weeks_to_show,
        }
    }

    /// Pixel-to-day scale for a timeline rendered `timeline_width_px` wide.
    pub fn day_scale(&self, timeline_width_px: f64) -> DayScale {
        DayScale {
            day_width_px: timeline_width_px / self.total_days() as f64,
        }
    }
}

/// Width of one day column in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayScale {
    pub day_width_px: f64,
}

impl DayScale {
    /// Whole days represented by a horizontal pointer delta, rounded to the
    /// nearest day. A degenerate scale (zero or non-finite width) maps every
    /// delta to zero days.
    pub fn days_for_delta(&self, delta_px: f64) -> i64 {
        if !self.day_width_px.is_finite() || self.day_width_px <= 0.0 || !delta_px.is_finite() {
            return 0;
        }
        (delta_px / self.day_width_px).round() as i64
    }
}

/// Rendering geometry for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    /// Left edge as a fraction of the window width (0.0 to 1.0).
    pub left_pct: f64,
    /// Width as a fraction of the window width; `left_pct + width_pct <= 1`.
    pub width_pct: f64,
    pub top_px: f64,
    /// Days visible in the window after clipping.
    pub visible_days: i64,
    /// The item's real duration, unaffected by clipping. This is what the
    /// user is shown as the item's length.
    pub duration_days: i64,
}

/// Project an item onto the window.
///
/// `override_range` replaces the item's stored dates, which is how an
/// in-progress drag renders its candidate without touching the item.
/// Returns `None` for unscheduled or malformed items and for items entirely
/// outside the window.
pub fn project(
    item: &ScheduledItem,
    lane_index: usize,
    window: &RenderWindow,
    lane_height_px: f64,
    override_range: Option<DateRange>,
) -> Option<Geometry> {
    let range = match override_range {
        Some(range) => range,
        None => item.range().ok().flatten()?,
    };
    project_range(range, lane_index, window, lane_height_px)
}

/// Geometry for a bare range; see [`project`].
pub fn project_range(
    range: DateRange,
    lane_index: usize,
    window: &RenderWindow,
    lane_height_px: f64,
) -> Option<Geometry> {
    let visible = range.clip_to(&window.as_range())?;

    let total_days = window.total_days() as f64;
    let offset_days = days_between(window.start(), visible.start()) as f64;
    let visible_days = visible.duration_days();

    let left_pct = offset_days / total_days;
    let width_pct = (visible_days as f64 / total_days).min(1.0 - left_pct);

    Some(Geometry {
        left_pct,
        width_pct,
        top_px: lane_index as f64 * lane_height_px,
        visible_days,
        duration_days: range.duration_days(),
    })
}
