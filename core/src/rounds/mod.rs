//! Round boundary reconstruction.
//!
//! The reconstructor keeps the RoundEnded / RoundOfficiallyEnded /
//! FreezetimeEnded triad balanced while events stream in. [`current_round`]
//! derives the round number the session tags in-round events with.

mod min_rounds;
mod reconstructor;

#[cfg(test)]
mod tests;

pub use min_rounds::min_rounds_for_win;
pub use reconstructor::{ESTIMATED_LENGTH_PADDING, LifecycleCounts, RoundFlow, RoundReconstructor};

use demostats_types::GameMode;

use crate::demo_event::TeamRoster;
use crate::timeline::{EventKind, EventTimeline};

/// Round number for in-round events.
///
/// Zero until a round-1 roster with players on both sides exists (warmup),
/// then officially-ended count + 1. Survival mode counts one higher.
pub fn current_round(timeline: &EventTimeline, game_mode: GameMode) -> i32 {
    let started = timeline
        .records::<TeamRoster>()
        .find(|roster| roster.round == 1)
        .is_some_and(TeamRoster::both_sides_populated);

    let mut round = if started {
        timeline.count(EventKind::RoundOfficiallyEnded) as i32 + 1
    } else {
        0
    };

    if game_mode.is_survival() {
        round += 1;
    }
    round
}
