//! Commit boundary between the drag controller and persistence.

use async_trait::async_trait;
use log::warn;

use super::error::CommitFailure;
use crate::db::repository::{RepositoryResult, ScheduledItemRepository};
use crate::db::services;
use crate::models::{DateRange, ItemId};

/// Something that can persist a rescheduled date range.
///
/// Every [`ScheduledItemRepository`] is a committer; tests and alternative
/// hosts may provide their own.
#[async_trait]
pub trait ItemDatesCommitter: Send + Sync {
    async fn commit_dates(&self, item_id: &ItemId, range: DateRange) -> RepositoryResult<()>;
}

#[async_trait]
impl<R> ItemDatesCommitter for R
where
    R: ScheduledItemRepository + ?Sized,
{
    async fn commit_dates(&self, item_id: &ItemId, range: DateRange) -> RepositoryResult<()> {
        services::update_item_dates(self, item_id, range.start(), range.end()).await
    }
}

/// Hand `candidate` to the committer.
///
/// On failure the returned [`CommitFailure`] names `reference` as the range
/// the display must revert to. There is no retry; the user re-drags.
pub async fn commit<C>(
    committer: &C,
    item_id: &ItemId,
    candidate: DateRange,
    reference: DateRange,
) -> Result<(), CommitFailure>
where
    C: ItemDatesCommitter + ?Sized,
{
    committer
        .commit_dates(item_id, candidate)
        .await
        .map_err(|source| {
            warn!(
                "Commit of {} for item {} failed, reverting to {}: {}",
                candidate, item_id, reference, source
            );
            CommitFailure {
                item_id: item_id.clone(),
                attempted: candidate,
                reverted_to: reference,
                source,
            }
        })
}
