//! Domain models for the production timeline.

pub mod item;
pub mod time;

pub use item::*;
pub use time::*;
