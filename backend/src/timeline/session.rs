//! Stateful host for one timeline instance.
//!
//! The session owns what the UI would otherwise keep in component state: the
//! last fetched item snapshot, the visible window, the single active drag and
//! the packing cache. It never edits items locally. A successful commit is
//! followed by a refetch from the source of truth; a failed commit leaves the
//! snapshot untouched, so the item is displayed at its pre-drag dates again.
//!
//! Concurrent edits by other users between drag start and commit are not
//! detected: the commit overwrites them (last write wins).

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, info, warn};

use super::cache::LaneCache;
use super::drag::{self, CommitOutcome, DragMode, DragState};
use super::error::TimelineError;
use super::lanes::partition_valid;
use super::layout::{build_layout, TimelineLayout};
use super::window::RenderWindow;
use crate::db::repository::ScheduledItemRepository;
use crate::db::services;
use crate::models::{DateRange, ItemId, ScheduledItem};

pub struct TimelineSession {
    repository: Arc<dyn ScheduledItemRepository>,
    window: RenderWindow,
    lane_height_px: f64,
    items: Vec<ScheduledItem>,
    rejected: Vec<ItemId>,
    drag: Option<DragState>,
    cache: LaneCache,
}

impl TimelineSession {
    /// Create a session with an empty snapshot. Call [`refresh`](Self::refresh)
    /// to load items.
    pub fn new(
        repository: Arc<dyn ScheduledItemRepository>,
        window: RenderWindow,
        lane_height_px: f64,
    ) -> Self {
        Self {
            repository,
            window,
            lane_height_px,
            items: Vec::new(),
            rejected: Vec::new(),
            drag: None,
            cache: LaneCache::new(),
        }
    }

    /// Reload the item snapshot.
    ///
    /// Items with an inverted range are dropped from the snapshot and listed
    /// in [`rejected`](Self::rejected). On failure the previous snapshot is
    /// kept and the error is returned for the caller to report.
    pub async fn refresh(&mut self) -> Result<usize, TimelineError> {
        let fetched = match services::fetch_scheduled_items(self.repository.as_ref()).await {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Item fetch failed, keeping {} stale items: {}",
                    self.items.len(),
                    e
                );
                return Err(TimelineError::Fetch(e));
            }
        };

        let (valid, rejected) = partition_valid(fetched);
        self.rejected = rejected.into_iter().map(|(id, _)| id).collect();
        self.items = valid;
        debug!(
            "Refreshed timeline: {} items, {} rejected",
            self.items.len(),
            self.rejected.len()
        );
        Ok(self.items.len())
    }

    pub fn items(&self) -> &[ScheduledItem] {
        &self.items
    }

    /// Ids dropped by the last refresh because `start > end`.
    pub fn rejected(&self) -> &[ItemId] {
        &self.rejected
    }

    pub fn window(&self) -> RenderWindow {
        self.window
    }

    pub fn set_window(&mut self, start: NaiveDate, weeks_to_show: u32) {
        self.window = RenderWindow::new(start, weeks_to_show);
    }

    /// Page the window by whole weeks (negative goes back).
    pub fn shift_weeks(&mut self, weeks: i64) {
        self.window = self.window.shifted_weeks(weeks);
    }

    pub fn active_drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    fn find_item(&self, item_id: &ItemId) -> Result<&ScheduledItem, TimelineError> {
        self.items
            .iter()
            .find(|item| &item.id == item_id)
            .ok_or_else(|| TimelineError::UnknownItem {
                item_id: item_id.clone(),
            })
    }

    /// Dates the item is currently shown with: the drag candidate while it is
    /// being dragged, its stored range otherwise.
    pub fn displayed_range(&self, item_id: &ItemId) -> Option<DateRange> {
        if let Some(state) = self.drag.as_ref().filter(|s| s.item_id() == item_id) {
            return Some(state.candidate());
        }
        self.find_item(item_id).ok()?.range().ok().flatten()
    }

    /// Pack and project the current snapshot.
    pub fn layout(&mut self) -> Result<TimelineLayout, TimelineError> {
        let packing = self.cache.pack(&self.items)?;
        Ok(build_layout(
            &self.items,
            packing,
            self.window,
            self.lane_height_px,
            self.drag.as_ref(),
        ))
    }

    /// Start dragging an item.
    pub fn begin_drag(
        &mut self,
        item_id: &ItemId,
        mode: DragMode,
        pointer_x: f64,
    ) -> Result<&DragState, TimelineError> {
        if let Some(active) = &self.drag {
            return Err(TimelineError::DragInProgress {
                item_id: active.item_id().clone(),
            });
        }
        let state = drag::begin_drag(self.find_item(item_id)?, mode, pointer_x)?;
        Ok(&*self.drag.insert(state))
    }

    /// Feed a pointer move into the active drag.
    pub fn update_drag(
        &mut self,
        pointer_x: f64,
        timeline_width_px: f64,
    ) -> Result<DateRange, TimelineError> {
        let scale = self.window.day_scale(timeline_width_px);
        let state = self.drag.as_mut().ok_or(TimelineError::NoActiveDrag)?;
        Ok(state.update(pointer_x, scale))
    }

    /// Release the pointer: commit any change and clear the drag.
    ///
    /// The drag is cleared before the commit is awaited, whatever the
    /// outcome. On success the snapshot is refetched; a failed refetch is
    /// logged and leaves the previous snapshot in place.
    pub async fn end_drag(&mut self) -> Result<CommitOutcome, TimelineError> {
        let state = self.drag.take().ok_or(TimelineError::NoActiveDrag)?;
        let item_id = state.item_id().clone();

        let outcome = drag::end_drag(state, self.repository.as_ref()).await?;

        if let CommitOutcome::Committed(range) = outcome {
            info!("Item {} rescheduled to {}", item_id, range);
            if let Err(e) = self.refresh().await {
                warn!("Refetch after committing {} failed: {}", item_id, e);
            }
        }
        Ok(outcome)
    }

    /// Abandon the active drag without committing (escape, unmount).
    pub fn cancel_drag(&mut self) -> Option<DragState> {
        let cancelled = self.drag.take();
        if let Some(state) = &cancelled {
            debug!("Cancelled drag on {}", state.item_id());
        }
        cancelled
    }
}
