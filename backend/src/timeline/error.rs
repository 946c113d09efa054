//! Error types for timeline layout and interaction.

use chrono::NaiveDate;

use crate::db::repository::RepositoryError;
use crate::models::{DateRange, ItemId};

/// Errors raised by packing, projection and the drag controller.
///
/// Apart from [`TimelineError::Fetch`] these are programming errors on the
/// caller's side: input should have been validated before it got here.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// `start > end` on an item handed to the packer or controller.
    #[error("Invalid range for item {item_id}: start {start} is after end {end}")]
    InvalidRange {
        item_id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The item lacks a start or end date.
    #[error("Item {item_id} is not scheduled")]
    Unscheduled { item_id: ItemId },

    /// The id is not part of the current item snapshot.
    #[error("Unknown item {item_id}")]
    UnknownItem { item_id: ItemId },

    /// A second drag was started while one is active.
    #[error("A drag on item {item_id} is already in progress")]
    DragInProgress { item_id: ItemId },

    #[error("No drag in progress")]
    NoActiveDrag,

    /// Loading the item set failed.
    #[error("Failed to fetch scheduled items: {0}")]
    Fetch(#[source] RepositoryError),

    /// Persisting a drag result failed; the display has been reverted.
    #[error(transparent)]
    Commit(#[from] CommitFailure),
}

/// The external update collaborator rejected a candidate range.
///
/// Carries the range the display was reverted to so the caller can show it
/// alongside the notification. No retry is attempted.
#[derive(Debug, thiserror::Error)]
#[error("Failed to commit new dates {attempted} for item {item_id}: {source}")]
pub struct CommitFailure {
    pub item_id: ItemId,
    pub attempted: DateRange,
    pub reverted_to: DateRange,
    #[source]
    pub source: RepositoryError,
}

impl CommitFailure {
    /// Whether the underlying repository error is transient.
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
