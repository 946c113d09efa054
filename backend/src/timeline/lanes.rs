//! Greedy interval lane packing.
//!
//! Items are placed, in start-date order, into the lowest lane where they do
//! not overlap anything already there. The result is deterministic for a
//! given input order but is not a minimum interval-graph coloring: keeping the
//! first-fit layout stable as items are added matters more than saving a lane.

use std::collections::HashMap;

use log::{debug, warn};

use super::error::TimelineError;
use crate::models::{DateRange, ItemId, ScheduledItem};

/// Output of [`pack_lanes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanePacking {
    /// Items per lane, each lane ordered by start date.
    pub lanes: Vec<Vec<ScheduledItem>>,
    /// Lane index (0-based, dense) for every scheduled item.
    pub assignment: HashMap<ItemId, usize>,
    /// Items skipped because they lack a start or end date, in input order.
    pub unscheduled: Vec<ItemId>,
}

impl LanePacking {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lane_of(&self, id: &ItemId) -> Option<usize> {
        self.assignment.get(id).copied()
    }
}

/// Assign every scheduled item to a lane.
///
/// Fails with [`TimelineError::InvalidRange`] if any scheduled item has
/// `start > end`; such items must be filtered upstream (see
/// [`partition_valid`]).
pub fn pack_lanes(items: &[ScheduledItem]) -> Result<LanePacking, TimelineError> {
    let mut unscheduled = Vec::new();
    let mut scheduled: Vec<(DateRange, &ScheduledItem)> = Vec::with_capacity(items.len());

    for item in items {
        match item.range()? {
            Some(range) => scheduled.push((range, item)),
            None => unscheduled.push(item.id.clone()),
        }
    }

    // Vec::sort_by_key is stable, so ties keep input order.
    scheduled.sort_by_key(|(range, _)| range.start());

    let mut lane_ranges: Vec<Vec<DateRange>> = Vec::new();
    let mut lanes: Vec<Vec<ScheduledItem>> = Vec::new();
    let mut assignment = HashMap::with_capacity(scheduled.len());

    for (range, item) in scheduled {
        let slot = lane_ranges
            .iter()
            .position(|occupied| occupied.iter().all(|other| !other.overlaps(&range)));

        let lane = match slot {
            Some(lane) => lane,
            None => {
                lane_ranges.push(Vec::new());
                lanes.push(Vec::new());
                lane_ranges.len() - 1
            }
        };

        lane_ranges[lane].push(range);
        lanes[lane].push(item.clone());
        assignment.insert(item.id.clone(), lane);
    }

    debug!(
        "Packed {} items into {} lanes ({} unscheduled)",
        assignment.len(),
        lanes.len(),
        unscheduled.len()
    );

    Ok(LanePacking {
        lanes,
        assignment,
        unscheduled,
    })
}

/// Split items into those safe to pack and those with an inverted range.
pub fn partition_valid(
    items: Vec<ScheduledItem>,
) -> (Vec<ScheduledItem>, Vec<(ItemId, TimelineError)>) {
    let mut valid = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for item in items {
        match item.range() {
            Ok(_) => valid.push(item),
            Err(err) => {
                warn!("Skipping item {}: {}", item.id, err);
                rejected.push((item.id, err));
            }
        }
    }

    (valid, rejected)
}
