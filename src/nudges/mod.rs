//! Client nudge module.
//!
//! A nudge is a scheduled reminder from a coach to a client, either a
//! one-off pinned to a calendar date or a weekly-recurring pattern. The
//! resolver half of this module (`day_matcher`, `selector`, `datetime`)
//! is pure selection/ordering logic over in-memory snapshots; the
//! storage half (`store`, `service`) persists records and feeds the
//! resolver.

pub mod datetime;
pub mod day_matcher;
mod models;
mod schema;
pub mod selector;
mod service;
mod store;

pub use day_matcher::matches;
pub use models::{DayFilter, NudgeRecord, PageRequest, Schedule, Weekday, ALL_WEEKDAYS};
pub use schema::{NudgeSchema, NUDGE_VERSIONED_SCHEMAS};
pub use selector::{select_recent, select_recurring};
pub use service::NudgeService;
pub use store::{NudgeStore, SqliteNudgeStore};
