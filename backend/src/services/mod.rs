//! Service layer for timeline orchestration.
//!
//! Services sit between the repository layer and the HTTP handlers: they
//! fetch data, run the timeline computations and shape the results.

pub mod timeline;

pub use timeline::{compute_timeline_data, get_timeline_layout, reschedule_item, TimelineLayoutData};
