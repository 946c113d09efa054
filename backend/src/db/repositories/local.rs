//! In-memory local repository implementation.
//!
//! Stores the item set in memory, preserving insertion order so that the
//! lane packer sees the same input ordering on every fetch. Suitable for unit
//! testing and local development; fault injection hooks let tests exercise the
//! commit-failure paths.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use parking_lot::RwLock;

use crate::db::repository::*;
use crate::models::{ItemId, ScheduledItem};

/// In-memory local repository.
///
/// # Example
/// ```
/// use prod_timeline::db::repositories::LocalRepository;
/// use prod_timeline::models::ScheduledItem;
///
/// let repo = LocalRepository::new();
/// repo.insert_item(ScheduledItem::unscheduled("wo-1", "Cutting"));
/// assert_eq!(repo.item_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Debug)]
struct LocalData {
    items: Vec<ScheduledItem>,
    // Connection health
    is_healthy: bool,
    // Remaining update calls to fail before accepting writes again
    failing_updates: usize,
    // Successful update_item_dates calls
    update_count: usize,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_healthy: true,
            failing_updates: 0,
            update_count: 0,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = ScheduledItem>) -> Self {
        let repo = Self::new();
        for item in items {
            repo.insert_item(item);
        }
        repo
    }

    /// Load items from a JSON file containing an array of items.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigurationError {
                message: format!("Failed to read seed file: {}", e),
                context: ErrorContext::new("from_seed_file")
                    .with_details(path.display().to_string()),
            }
        })?;
        let items: Vec<ScheduledItem> = serde_json::from_str(&content)?;
        debug!("Seeded {} items from {}", items.len(), path.display());
        Ok(Self::with_items(items))
    }

    /// Insert an item, replacing any existing item with the same id in place.
    pub fn insert_item(&self, item: ScheduledItem) {
        let mut data = self.data.write();
        match data.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => data.items.push(item),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make the next `count` calls to `update_item_dates` fail with a
    /// retryable connection error.
    pub fn fail_next_updates(&self, count: usize) {
        self.data.write().failing_updates = count;
    }

    /// Number of successful date updates applied so far.
    pub fn update_count(&self) -> usize {
        self.data.read().update_count
    }

    pub fn item_count(&self) -> usize {
        self.data.read().items.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Data store is not healthy")
                .with_operation(operation));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduledItemRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_scheduled_items(&self) -> RepositoryResult<Vec<ScheduledItem>> {
        self.check_health("fetch_scheduled_items")?;
        Ok(self.data.read().items.clone())
    }

    async fn get_scheduled_item(&self, item_id: &ItemId) -> RepositoryResult<ScheduledItem> {
        self.check_health("get_scheduled_item")?;
        self.data
            .read()
            .items
            .iter()
            .find(|item| &item.id == item_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Scheduled item {} not found", item_id),
                    ErrorContext::new("get_scheduled_item")
                        .with_entity("scheduled_item")
                        .with_entity_id(item_id),
                )
            })
    }

    async fn update_item_dates(
        &self,
        item_id: &ItemId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<()> {
        self.check_health("update_item_dates")?;

        let context = ErrorContext::new("update_item_dates")
            .with_entity("scheduled_item")
            .with_entity_id(item_id);

        if start > end {
            return Err(RepositoryError::validation_with_context(
                format!("start {} is after end {}", start, end),
                context,
            ));
        }

        let mut data = self.data.write();
        if data.failing_updates > 0 {
            data.failing_updates -= 1;
            return Err(RepositoryError::ConnectionError {
                message: "Simulated update failure".to_string(),
                context: context.retryable(),
            });
        }

        let item = data
            .items
            .iter_mut()
            .find(|item| &item.id == item_id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Scheduled item {} not found", item_id),
                    context,
                )
            })?;

        item.start_date = Some(start);
        item.end_date = Some(end);
        data.update_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let repo = LocalRepository::with_items(vec![
            ScheduledItem::unscheduled("b", "B"),
            ScheduledItem::unscheduled("a", "A"),
        ]);
        let items = repo.fetch_scheduled_items().await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_insert_replaces_in_place() {
        let repo = LocalRepository::with_items(vec![
            ScheduledItem::unscheduled("a", "A"),
            ScheduledItem::unscheduled("b", "B"),
        ]);
        repo.insert_item(ScheduledItem::scheduled("a", "A2", d(2024, 1, 1), d(2024, 1, 2)));
        let items = repo.fetch_scheduled_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "A2");
    }

    #[tokio::test]
    async fn test_update_item_dates() {
        let repo = LocalRepository::with_items(vec![ScheduledItem::unscheduled("a", "A")]);
        repo.update_item_dates(&"a".into(), d(2024, 1, 3), d(2024, 1, 4))
            .await
            .unwrap();
        let item = repo.get_scheduled_item(&"a".into()).await.unwrap();
        assert_eq!(item.start_date, Some(d(2024, 1, 3)));
        assert_eq!(item.end_date, Some(d(2024, 1, 4)));
        assert_eq!(repo.update_count(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_inverted_range() {
        let repo = LocalRepository::with_items(vec![ScheduledItem::unscheduled("a", "A")]);
        let err = repo
            .update_item_dates(&"a".into(), d(2024, 1, 5), d(2024, 1, 4))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.update_count(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = LocalRepository::new();
        let err = repo
            .update_item_dates(&"ghost".into(), d(2024, 1, 1), d(2024, 1, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.context().entity_id.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn test_fail_next_updates() {
        let repo = LocalRepository::with_items(vec![ScheduledItem::unscheduled("a", "A")]);
        repo.fail_next_updates(1);
        let first = repo
            .update_item_dates(&"a".into(), d(2024, 1, 1), d(2024, 1, 2))
            .await;
        assert!(first.unwrap_err().is_retryable());
        repo.update_item_dates(&"a".into(), d(2024, 1, 1), d(2024, 1, 2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unhealthy_repository() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        let err = repo.fetch_scheduled_items().await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    }

    #[test]
    fn test_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "wo-1", "name": "Cutting",
                  "start_date": "2024-01-02", "end_date": "2024-01-04"}},
                {{"id": "wo-2", "name": "Painting"}}
            ]"#
        )
        .unwrap();
        let repo = LocalRepository::from_seed_file(file.path()).unwrap();
        assert_eq!(repo.item_count(), 2);
    }

    #[test]
    fn test_from_missing_seed_file() {
        let err = LocalRepository::from_seed_file("/nonexistent/items.json").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("from_seed_file"));
        assert_eq!(
            err.context().details.as_deref(),
            Some("/nonexistent/items.json")
        );
        assert!(err.to_string().contains("details=/nonexistent/items.json"));
    }
}
