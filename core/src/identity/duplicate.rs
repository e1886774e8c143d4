use std::fmt;

use hashbrown::HashMap;

use crate::demo_event::PlayerSnapshot;
use crate::ticks::TickCounter;

/// Decides whether an unseen connection id is a reconnect of a tracked one.
pub trait DuplicateDetector: fmt::Debug {
    /// Tracked connection id that belongs to the same participant as `candidate`
    fn find_duplicate(&self, candidate: &PlayerSnapshot, tracked: &HashMap<i32, TickCounter>) -> Option<i32>;
}

/// Same display name as a tracked connection. Lowest id wins when several match.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatch;

impl DuplicateDetector for NameMatch {
    fn find_duplicate(&self, candidate: &PlayerSnapshot, tracked: &HashMap<i32, TickCounter>) -> Option<i32> {
        tracked
            .iter()
            .filter(|(_, counter)| counter.detected_name == candidate.name)
            .map(|(id, _)| *id)
            .min()
    }
}
