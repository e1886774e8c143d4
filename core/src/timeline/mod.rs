//! Event timeline store
//!
//! Owns every event observed during one match. Events are addressed by stable
//! [`EventId`]s so later corrections (site letters, synthesized lifecycle
//! events) patch the one authoritative copy.

mod game_event;
mod store;


pub use game_event::{EventKind, GameEvent, TimelineRecord};
pub use store::{EventId, EventTimeline};
