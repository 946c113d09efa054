//! Repository factory for dependency injection.
//!
//! Creates repository instances from runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
use super::repository::{RepositoryError, RepositoryResult, ScheduledItemRepository};
use crate::config::RepositorySettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Empty in-memory repository
    Local,
    /// In-memory repository loaded from a JSON seed file
    Seeded,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "memory", "seeded").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "seeded" | "seed" => Ok(Self::Seeded),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use prod_timeline::db::RepositoryFactory;
///
/// let repo = RepositoryFactory::create_local();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository from the `[repository]` settings.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConfigurationError)` - If the type is unknown,
    ///   or `seeded` is selected without a readable seed file
    pub fn create(
        settings: &RepositorySettings,
    ) -> RepositoryResult<Arc<dyn ScheduledItemRepository>> {
        let repo_type: RepositoryType = settings.repo_type.parse().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Seeded => {
                let path = settings.seed_file.as_ref().ok_or_else(|| {
                    RepositoryError::configuration("Seeded repository requires seed_file")
                })?;
                let repo = LocalRepository::from_seed_file(path)?;
                info!(
                    "Loaded {} scheduled items from {}",
                    repo.item_count(),
                    path.display()
                );
                Ok(Arc::new(repo))
            }
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn ScheduledItemRepository> {
        Arc::new(LocalRepository::new())
    }
}
