//! # quest-goal
//!
//! Goal tracking engine for Eternal Quest.
//!
//! A [`Tracker`] owns an ordered list of [`Goal`]s and a running score.
//! Recording an event against a goal applies that goal's completion rule
//! and adds the resulting point delta to the score. Tracker state can be
//! saved to and restored from a flat JSON record without losing any
//! goal's progress.
//!
//! ## Key components
//!
//! - [`Goal`] — one objective with one of four completion rules
//!   (Simple, Eternal, Checklist, Negative)
//! - [`Tracker`] — goal list plus cumulative score and level
//! - [`codec`] — the flat record format and replay-based reconstruction
//! - [`TrackerStore`] — JSON file persistence for a Tracker
//! - [`QuestConfig`] — where a project keeps its tracker and activity log
//! - [`QuestEvent`] / [`EventDispatcher`] — activity events and their sinks

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod store;
pub mod tracker;

pub use codec::{GoalRecord, TrackerRecord};
pub use config::QuestConfig;
pub use error::QuestError;
pub use events::{ActivitySink, EventDispatcher, LogSink, QuestEvent};
pub use goal::{Goal, GoalProgress, GoalType};
pub use store::TrackerStore;
pub use tracker::Tracker;
