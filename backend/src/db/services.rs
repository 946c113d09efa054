//! High-level data-access service layer.
//!
//! Repository-agnostic wrappers around [`ScheduledItemRepository`]. They add
//! operation context to errors and enforce the update contract (valid range,
//! known id) regardless of which backend is plugged in.
//!
//! # Usage
//!
//! ```no_run
//! use prod_timeline::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let items = services::fetch_scheduled_items(&repo).await?;
//!     println!("Found {} items", items.len());
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::{info, warn};

use super::repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduledItemRepository};
use crate::models::{ItemId, ScheduledItem};

/// Check if the backing store is healthy.
pub async fn health_check<R: ScheduledItemRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Fetch the working set of items.
pub async fn fetch_scheduled_items<R: ScheduledItemRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ScheduledItem>> {
    repo.fetch_scheduled_items()
        .await
        .map_err(|e| e.with_operation("fetch_scheduled_items"))
}

/// Fetch one item by id.
pub async fn get_scheduled_item<R: ScheduledItemRepository + ?Sized>(
    repo: &R,
    item_id: &ItemId,
) -> RepositoryResult<ScheduledItem> {
    repo.get_scheduled_item(item_id)
        .await
        .map_err(|e| e.with_operation("get_scheduled_item"))
}

/// Persist new dates for an item.
///
/// Rejects `start > end` before reaching the repository so every backend
/// shares the same validation error.
pub async fn update_item_dates<R: ScheduledItemRepository + ?Sized>(
    repo: &R,
    item_id: &ItemId,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<()> {
    if start > end {
        warn!(
            "Rejected date update for {}: start {} after end {}",
            item_id, start, end
        );
        return Err(RepositoryError::validation_with_context(
            format!("start {} is after end {}", start, end),
            ErrorContext::new("update_item_dates")
                .with_entity("scheduled_item")
                .with_entity_id(item_id),
        ));
    }

    repo.update_item_dates(item_id, start, end)
        .await
        .map_err(|e| {
            e.with_operation("update_item_dates")
                .with_entity("scheduled_item", item_id)
        })?;

    info!("Rescheduled item {} to {}..={}", item_id, start, end);
    Ok(())
}
