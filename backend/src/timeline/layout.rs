//! Assembled timeline geometry: lanes and projection combined.

use serde::Serialize;

use super::drag::DragState;
use super::lanes::LanePacking;
use super::window::{project, Geometry, RenderWindow};
use crate::models::{DateRange, ItemId, ScheduledItem};

/// One rendered bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBar {
    pub item_id: ItemId,
    pub name: String,
    pub lane: usize,
    /// Dates the bar is drawn with (the drag candidate while dragging).
    pub range: DateRange,
    pub geometry: Geometry,
    pub dragging: bool,
}

/// Everything needed to draw the timeline for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    pub window: RenderWindow,
    pub lane_count: usize,
    pub bars: Vec<TimelineBar>,
    /// Items without dates.
    pub unscheduled: Vec<ItemId>,
    /// Scheduled items entirely outside the window.
    pub hidden: Vec<ItemId>,
}

impl TimelineLayout {
    pub fn bar(&self, id: &ItemId) -> Option<&TimelineBar> {
        self.bars.iter().find(|bar| &bar.item_id == id)
    }
}

/// Project every packed item onto `window`.
///
/// Lanes come from `packing`, which is computed on stored dates; a dragged
/// item keeps its lane and is drawn at its candidate range.
pub fn build_layout(
    items: &[ScheduledItem],
    packing: &LanePacking,
    window: RenderWindow,
    lane_height_px: f64,
    drag: Option<&DragState>,
) -> TimelineLayout {
    let mut bars = Vec::new();
    let mut hidden = Vec::new();

    for item in items {
        let Some(lane) = packing.lane_of(&item.id) else {
            continue;
        };
        let override_range = drag
            .filter(|state| state.item_id() == &item.id)
            .map(|state| state.candidate());

        let range = match override_range {
            Some(range) => range,
            None => match item.range() {
                Ok(Some(range)) => range,
                _ => continue,
            },
        };

        match project(item, lane, &window, lane_height_px, Some(range)) {
            Some(geometry) => bars.push(TimelineBar {
                item_id: item.id.clone(),
                name: item.name.clone(),
                lane,
                range,
                geometry,
                dragging: override_range.is_some(),
            }),
            None => hidden.push(item.id.clone()),
        }
    }

    TimelineLayout {
        window,
        lane_count: packing.lane_count(),
        bars,
        unscheduled: packing.unscheduled.clone(),
        hidden,
    }
}
