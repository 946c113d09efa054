//! Scheduled work items and their date ranges.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::time::{add_days, days_between, deserialize_opt_date};
use crate::timeline::TimelineError;

/// Opaque identifier of a scheduled item, unique within one item set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    /// Two ranges overlap iff neither strictly precedes the other.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// The same span moved by `days`.
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: add_days(self.start, days),
            end: add_days(self.end, days),
        }
    }

    /// Intersection with `other`, if any.
    pub fn clip_to(&self, other: &DateRange) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One unit of production work placed on the timeline.
///
/// Items are supplied fresh from the data source on every render pass and are
/// never mutated in place by the timeline; rescheduling produces a new
/// [`DateRange`] that goes through the commit boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub end_date: Option<NaiveDate>,
}

impl ScheduledItem {
    /// An item with no dates yet.
    pub fn unscheduled(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// An item with both dates set. No ordering check happens here.
    pub fn scheduled(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    /// Whether both dates are present.
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// The item's date range.
    ///
    /// Returns `Ok(None)` for unscheduled items and `InvalidRange` when the
    /// stored start falls after the stored end.
    pub fn range(&self) -> Result<Option<DateRange>, TimelineError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end)
                .map(Some)
                .ok_or_else(|| TimelineError::InvalidRange {
                    item_id: self.id.clone(),
                    start,
                    end,
                }),
            _ => Ok(None),
        }
    }

    /// Like [`range`](Self::range) but treats a missing date as an error.
    pub fn scheduled_range(&self) -> Result<DateRange, TimelineError> {
        self.range()?.ok_or_else(|| TimelineError::Unscheduled {
            item_id: self.id.clone(),
        })
    }
}
