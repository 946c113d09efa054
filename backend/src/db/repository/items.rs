//! Repository trait for scheduled production items.
//!
//! This is the data-access collaborator behind the timeline: it supplies the
//! working set on every render cycle and owns the single mutation used when
//! an item is rescheduled.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{ItemId, ScheduledItem};

/// Repository trait for scheduled item operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduledItemRepository: Send + Sync {
    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch the full working set of items, scheduled or not.
    async fn fetch_scheduled_items(&self) -> RepositoryResult<Vec<ScheduledItem>>;

    /// Fetch a single item.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no item has this id
    async fn get_scheduled_item(&self, item_id: &ItemId) -> RepositoryResult<ScheduledItem>;

    /// Persist new start and end dates for an item.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - If `start > end`
    /// * `Err(RepositoryError::NotFound)` - If no item has this id
    async fn update_item_dates(
        &self,
        item_id: &ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<()>;
}
