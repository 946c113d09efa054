//! Data-access layer for scheduled items.
//!
//! The timeline core never talks to storage directly. It goes through the
//! [`ScheduledItemRepository`] trait, which supplies the item set and owns the
//! single mutation (rescheduling an item's dates).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Timeline session / HTTP handlers                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - validation, error context│
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │        (in-memory, optionally seeded)         │
//!     └──────────────────────────────────────────────┘
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduledItemRepository};
