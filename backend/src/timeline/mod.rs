//! Production scheduling timeline.
//!
//! The pieces, leaves first:
//!
//! - [`lanes`]: greedy first-fit lane packing of dated items
//! - [`window`]: projection of date ranges onto the visible window
//! - [`drag`]: move/resize interaction turning pointer deltas into candidate dates
//! - [`commit`]: hand-off of candidate dates to the persistence collaborator
//! - [`layout`]: lanes and projection combined into drawable bars
//! - [`cache`]: fingerprint-keyed memoization of the packing
//! - [`session`]: the stateful host tying a repository to one timeline view
//!
//! Packing and projection are pure and synchronous. The only suspension points
//! are the commit and the refetch that follows it.

pub mod cache;
pub mod commit;
pub mod drag;
pub mod error;
pub mod lanes;
pub mod layout;
pub mod session;
pub mod window;

pub use cache::{layout_fingerprint, LaneCache};
pub use commit::{commit, ItemDatesCommitter};
pub use drag::{begin_drag, end_drag, CommitOutcome, DragMode, DragState};
pub use error::{CommitFailure, TimelineError};
pub use lanes::{pack_lanes, partition_valid, LanePacking};
pub use layout::{build_layout, TimelineBar, TimelineLayout};
pub use session::TimelineSession;
pub use window::{project, project_range, DayScale, Geometry, RenderWindow};
