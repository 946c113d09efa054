//! Repository trait definitions for data access.
//!
//! - [`error`]: Error types for repository operations
//! - [`items`]: Fetch and update operations for scheduled items

pub mod error;
pub mod items;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use items::ScheduledItemRepository;
