//! Core types for eventcal.
//!
//! This crate holds everything the front-end renders from:
//! - `Event` and the owning `EventStore`
//! - `filter` for past/upcoming classification against a reference "now"
//! - `grid` for month grids with leading blanks and per-day event buckets
//!
//! "Now" is always passed in by the caller; nothing in here reads the clock.

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod store;

pub use error::{EventCalError, EventCalResult};
pub use event::{Event, EventId};
pub use filter::{FilterMode, filter};
pub use grid::{Cell, DayCell, MonthView, build_grid, days_in_month, first_weekday_offset};
pub use store::EventStore;
