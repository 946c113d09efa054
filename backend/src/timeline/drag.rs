//! Drag and resize interaction controller.
//!
//! A drag is an explicit [`DragState`] value: created by [`begin_drag`],
//! advanced by [`DragState::update`] on each pointer move, and consumed by
//! [`end_drag`]. The hosting layer owns the pointer listeners and decides when
//! each of these is called; nothing here keeps global state.
//!
//! Every update is computed from the reference range captured at drag start
//! and the current pointer position, never from the previous candidate, so
//! repeated or out-of-order move events cannot accumulate drift.

use log::debug;

use super::commit::{commit, ItemDatesCommitter};
use super::error::{CommitFailure, TimelineError};
use super::window::DayScale;
use crate::models::{add_days, DateRange, ItemId, ScheduledItem};

/// What part of the item the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Shift the whole item; duration is preserved.
    Move,
    /// Move the start edge; end stays fixed.
    ResizeStart,
    /// Move the end edge; start stays fixed.
    ResizeEnd,
}

/// An in-progress pointer interaction on one item.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    item_id: ItemId,
    mode: DragMode,
    reference: DateRange,
    pointer_origin_x: f64,
    candidate: DateRange,
}

/// Result of ending a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The candidate equals the reference; nothing was sent.
    Unchanged,
    /// The candidate was persisted.
    Committed(DateRange),
}

/// Start dragging `item`.
///
/// Fails for unscheduled items and items with an inverted range.
pub fn begin_drag(
    item: &ScheduledItem,
    mode: DragMode,
    pointer_x: f64,
) -> Result<DragState, TimelineError> {
    let reference = item.scheduled_range()?;
    debug!("Begin {:?} drag on {} from {}", mode, item.id, reference);
    Ok(DragState {
        item_id: item.id.clone(),
        mode,
        reference,
        pointer_origin_x: pointer_x,
        candidate: reference,
    })
}

impl DragState {
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Dates of the item when the drag started.
    pub fn reference(&self) -> DateRange {
        self.reference
    }

    pub fn pointer_origin_x(&self) -> f64 {
        self.pointer_origin_x
    }

    /// Latest accepted candidate range.
    pub fn candidate(&self) -> DateRange {
        self.candidate
    }

    /// The candidate, if it differs from the reference.
    pub fn pending_change(&self) -> Option<DateRange> {
        (self.candidate != self.reference).then_some(self.candidate)
    }

    /// Apply a pointer move and return the resulting candidate.
    ///
    /// A resize that would make start reach or pass end is ignored for this
    /// frame: the previous candidate is kept and returned unchanged.
    pub fn update(&mut self, pointer_x: f64, scale: DayScale) -> DateRange {
        let days = scale.days_for_delta(pointer_x - self.pointer_origin_x);
        let reference = self.reference;

        let next = match self.mode {
            DragMode::Move => Some(reference.shifted(days)),
            DragMode::ResizeStart => {
                let start = add_days(reference.start(), days);
                if start >= reference.end() {
                    None
                } else {
                    DateRange::new(start, reference.end())
                }
            }
            DragMode::ResizeEnd => {
                let end = add_days(reference.end(), days);
                if end <= reference.start() {
                    None
                } else {
                    DateRange::new(reference.start(), end)
                }
            }
        };

        if let Some(range) = next {
            self.candidate = range;
        }
        self.candidate
    }
}

/// Finish a drag, committing the candidate if it changed.
///
/// The state is consumed whatever the outcome. On failure the caller must
/// display [`CommitFailure::reverted_to`] again and notify the user.
pub async fn end_drag<C>(state: DragState, committer: &C) -> Result<CommitOutcome, CommitFailure>
where
    C: ItemDatesCommitter + ?Sized,
{
    let Some(candidate) = state.pending_change() else {
        debug!("Drag on {} ended without changes", state.item_id);
        return Ok(CommitOutcome::Unchanged);
    };

    commit(committer, &state.item_id, candidate, state.reference).await?;
    Ok(CommitOutcome::Committed(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::timeline::window::RenderWindow;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn item() -> ScheduledItem {
        ScheduledItem::scheduled("wo-1", "Milling", d(2024, 1, 10), d(2024, 1, 12))
    }

    /// 28-day window, 2800 px wide: one day per 100 px.
    fn scale() -> DayScale {
        RenderWindow::new(d(2024, 1, 1), 4).day_scale(2800.0)
    }

    #[test]
    fn test_begin_captures_reference() {
        let state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        assert_eq!(state.reference().start(), d(2024, 1, 10));
        assert_eq!(state.reference().end(), d(2024, 1, 12));
        assert_eq!(state.candidate(), state.reference());
        assert_eq!(state.pending_change(), None);
    }

    #[test]
    fn test_begin_rejects_unscheduled_and_inverted() {
        let unscheduled = ScheduledItem::unscheduled("wo-2", "Painting");
        assert!(matches!(
            begin_drag(&unscheduled, DragMode::Move, 0.0),
            Err(TimelineError::Unscheduled { .. })
        ));

        let inverted = ScheduledItem::scheduled("wo-3", "Welding", d(2024, 1, 5), d(2024, 1, 1));
        assert!(matches!(
            begin_drag(&inverted, DragMode::ResizeEnd, 0.0),
            Err(TimelineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_move_preserves_duration() {
        let mut state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        let candidate = state.update(820.0, scale());
        assert_eq!(candidate.start(), d(2024, 1, 13));
        assert_eq!(candidate.end(), d(2024, 1, 15));

        let candidate = state.update(100.0, scale());
        assert_eq!(candidate.start(), d(2024, 1, 6));
        assert_eq!(candidate.duration_days(), 3);
    }

    #[test]
    fn test_updates_do_not_compound() {
        let mut state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        state.update(700.0, scale());
        state.update(700.0, scale());
        let candidate = state.update(700.0, scale());
        assert_eq!(candidate.start(), d(2024, 1, 12));
    }

    #[test]
    fn test_resize_start() {
        let mut state = begin_drag(&item(), DragMode::ResizeStart, 500.0).unwrap();
        let candidate = state.update(300.0, scale());
        assert_eq!(candidate.start(), d(2024, 1, 8));
        assert_eq!(candidate.end(), d(2024, 1, 12));
    }

    #[test]
    fn test_resize_start_clamps_at_end() {
        let mut state = begin_drag(&item(), DragMode::ResizeStart, 500.0).unwrap();
        let valid = state.update(600.0, scale());
        assert_eq!(valid.start(), d(2024, 1, 11));

        // Two days right would put start on the end date.
        let rejected = state.update(700.0, scale());
        assert_eq!(rejected, valid);
        let rejected = state.update(2000.0, scale());
        assert_eq!(rejected, valid);
        assert!(state.candidate().start() < state.candidate().end());
    }

    #[test]
    fn test_resize_end_clamps_at_start() {
        let mut state = begin_drag(&item(), DragMode::ResizeEnd, 500.0).unwrap();
        let valid = state.update(400.0, scale());
        assert_eq!(valid.end(), d(2024, 1, 11));

        let rejected = state.update(300.0, scale());
        assert_eq!(rejected, valid);
        assert_eq!(state.candidate().end(), d(2024, 1, 11));
    }

    #[test]
    fn test_resize_end_extends() {
        let mut state = begin_drag(&item(), DragMode::ResizeEnd, 500.0).unwrap();
        let candidate = state.update(940.0, scale());
        assert_eq!(candidate.start(), d(2024, 1, 10));
        assert_eq!(candidate.end(), d(2024, 1, 16));
    }

    #[test]
    fn test_sub_day_movement_rounds_to_zero() {
        let mut state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        state.update(549.0, scale());
        assert_eq!(state.pending_change(), None);
    }

    #[test]
    fn test_huge_pointer_delta_saturates() {
        let mut state = begin_drag(&item(), DragMode::Move, 0.0).unwrap();
        let candidate = state.update(1e300, scale());
        assert_eq!(candidate.end(), NaiveDate::MAX);

        let candidate = state.update(-1e300, scale());
        assert_eq!(candidate.start(), NaiveDate::MIN);
    }

    #[test]
    fn test_collapsed_timeline_width_saturates() {
        let collapsed = RenderWindow::new(d(2024, 1, 1), 4).day_scale(1e-12);
        let mut state = begin_drag(&item(), DragMode::ResizeEnd, 0.0).unwrap();
        let candidate = state.update(300.0, collapsed);
        assert_eq!(candidate.start(), d(2024, 1, 10));
        assert_eq!(candidate.end(), NaiveDate::MAX);

        let candidate = state.update(-300.0, collapsed);
        assert_eq!(candidate.end(), NaiveDate::MAX);
    }

    #[tokio::test]
    async fn test_end_drag_zero_delta_is_noop() {
        let repo = LocalRepository::with_items(vec![item()]);
        let state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        let outcome = end_drag(state, &repo).await.unwrap();
        assert_eq!(outcome, CommitOutcome::Unchanged);
        assert_eq!(repo.update_count(), 0);
    }

    #[tokio::test]
    async fn test_end_drag_commits_candidate() {
        let repo = LocalRepository::with_items(vec![item()]);
        let mut state = begin_drag(&item(), DragMode::Move, 500.0).unwrap();
        let candidate = state.update(700.0, scale());
        let outcome = end_drag(state, &repo).await.unwrap();
        assert_eq!(outcome, CommitOutcome::Committed(candidate));
        assert_eq!(repo.update_count(), 1);
    }

    #[tokio::test]
    async fn test_end_drag_failure_reports_reference() {
        let repo = LocalRepository::with_items(vec![item()]);
        repo.fail_next_updates(1);
        let mut state = begin_drag(&item(), DragMode::ResizeEnd, 500.0).unwrap();
        state.update(800.0, scale());
        let reference = state.reference();
        let failure = end_drag(state, &repo).await.unwrap_err();
        assert_eq!(failure.reverted_to, reference);
        assert_eq!(repo.update_count(), 0);
    }
}
