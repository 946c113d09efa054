//! # Production Timeline
//!
//! Scheduling core for a production timeline: work items with start and end
//! dates are packed into non-overlapping lanes, projected onto a visible
//! window of whole weeks, and rescheduled through drag and resize gestures
//! whose result is committed to a repository.
//!
//! ## Architecture
//!
//! - [`models`]: Item, identifier and date-range types, calendar helpers
//! - [`timeline`]: Lane packing, window projection, drag controller, commit
//!   boundary and the stateful [`timeline::TimelineSession`]
//! - [`db`]: Repository trait, in-memory implementation and service wrappers
//! - [`services`]: Timeline datasets for stateless callers
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum REST API (feature `http-server`)
//!
//! The library logs through the `log` facade; the server binary installs a
//! `tracing` subscriber.

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod timeline;

#[cfg(feature = "http-server")]
pub mod http;
