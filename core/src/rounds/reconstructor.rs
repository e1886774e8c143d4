//! Round lifecycle state machine.
//!
//! Every round should produce one RoundEnded, one RoundOfficiallyEnded and one
//! FreezetimeEnded. The engine drops or reorders these, so each handler first
//! compares the three counts and synthesizes whatever is lagging:
//! - RoundEnded: backfill official ends, then freezetime ends
//! - RoundOfficiallyEnded: backfill round ends, then freezetime ends
//! - FreezetimeEnded: detect the end of a finished match, else backfill both
//!
//! Synthesized events go through the same handlers before the triggering call
//! returns, so the timeline is always consistent when control leaves here.

use demostats_types::{GameMode, TestType};

use super::min_rounds::min_rounds_for_win;
use crate::demo_event::{
    FeedbackMessage, FreezetimeEnded, MatchStarted, PlayerSnapshot, RoundEnded,
    RoundOfficiallyEnded, TeamEquipment, TeamRoster,
};
use crate::timeline::{EventKind, EventTimeline};

/// Added to a RoundEnded length when estimating a missing official end
pub const ESTIMATED_LENGTH_PADDING: f64 = 4.0;

/// Whether ingestion should continue after a lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundFlow {
    Continue,
    /// A finished match was detected; later events must be discarded
    Halt,
}

/// Stored counts of the three lifecycle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleCounts {
    pub ended: usize,
    pub officially_ended: usize,
    pub freezetime_ended: usize,
}

impl LifecycleCounts {
    pub fn of(timeline: &EventTimeline) -> Self {
        Self {
            ended: timeline.count(EventKind::RoundEnded),
            officially_ended: timeline.count(EventKind::RoundOfficiallyEnded),
            freezetime_ended: timeline.count(EventKind::FreezetimeEnded),
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.ended == self.officially_ended && self.officially_ended == self.freezetime_ended
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoundReconstructor {
    min_rounds_for_win: Option<usize>,
}

impl RoundReconstructor {
    pub fn new(game_mode: GameMode, test_type: TestType) -> Self {
        Self {
            min_rounds_for_win: min_rounds_for_win(game_mode, test_type),
        }
    }

    pub fn min_rounds_for_win(&self) -> Option<usize> {
        self.min_rounds_for_win
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Match start
    // ═══════════════════════════════════════════════════════════════════════

    /// Reset the timeline, keeping feedback messages as warmup (round 0) chatter
    pub fn on_match_started(&self, timeline: &mut EventTimeline, event: MatchStarted) {
        let archived: Vec<FeedbackMessage> = timeline
            .records::<FeedbackMessage>()
            .cloned()
            .map(|mut message| {
                message.round = 0;
                message.time_in_round = 0.0;
                message
            })
            .collect();

        tracing::info!(
            map = %event.map_name,
            discarded = timeline.len(),
            kept_feedback = archived.len(),
            "Match started, resetting timeline"
        );

        timeline.reset();
        timeline.push(event);
        for message in archived {
            timeline.push(message);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle handlers
    // ═══════════════════════════════════════════════════════════════════════

    pub fn on_round_ended(&self, timeline: &mut EventTimeline, participants: &[PlayerSnapshot], event: RoundEnded) {
        // Official ends lagging behind round ends
        loop {
            let counts = LifecycleCounts::of(timeline);
            if counts.ended <= counts.officially_ended {
                break;
            }
            let Some(lagging) = timeline.nth::<RoundEnded>(counts.officially_ended) else {
                break;
            };
            let synthesized = RoundOfficiallyEnded {
                winner: lagging.winner,
                reason: lagging.reason,
                message: lagging.message.clone(),
                length: lagging.length + ESTIMATED_LENGTH_PADDING,
            };
            tracing::debug!(round = counts.officially_ended + 1, "Synthesizing missing RoundOfficiallyEnded");
            self.on_round_officially_ended(timeline, participants, synthesized);
        }

        self.backfill_freezetimes(timeline, participants, |c| c.ended >= c.freezetime_ended);

        timeline.push(event);
    }

    pub fn on_round_officially_ended(
        &self,
        timeline: &mut EventTimeline,
        participants: &[PlayerSnapshot],
        mut event: RoundOfficiallyEnded,
    ) {
        // Round ends lagging behind official ends
        loop {
            let counts = LifecycleCounts::of(timeline);
            if counts.officially_ended < counts.ended {
                break;
            }
            tracing::debug!(round = counts.ended + 1, "Synthesizing missing RoundEnded");
            self.on_round_ended(timeline, participants, RoundEnded::unknown());
        }

        self.backfill_freezetimes(timeline, participants, |c| c.officially_ended >= c.freezetime_ended);

        // Outcome comes from the matching RoundEnded; the official payload is only trusted for timing
        let index = timeline.count(EventKind::RoundOfficiallyEnded);
        if let Some(ended) = timeline.nth::<RoundEnded>(index) {
            event.copy_outcome(ended);
        }

        timeline.push(event);
    }

    pub fn on_freezetime_ended(
        &self,
        timeline: &mut EventTimeline,
        participants: &[PlayerSnapshot],
        event: FreezetimeEnded,
    ) -> RoundFlow {
        let counts = LifecycleCounts::of(timeline);

        // Best-effort end-of-match detection: a freezetime for a round that will never be played
        if let Some(min_rounds) = self.min_rounds_for_win
            && counts.freezetime_ended == counts.officially_ended + 1
            && counts.freezetime_ended == counts.ended
            && counts.ended >= min_rounds
        {
            if let Some(last) = timeline.nth::<RoundEnded>(counts.officially_ended) {
                let final_end = RoundOfficiallyEnded {
                    winner: last.winner,
                    reason: last.reason,
                    message: last.message.clone(),
                    length: last.length + ESTIMATED_LENGTH_PADDING,
                };
                self.on_round_officially_ended(timeline, participants, final_end);
            }
            tracing::info!(rounds = counts.ended, min_rounds, "Match finished, halting ingestion");
            return RoundFlow::Halt;
        }

        loop {
            let counts = LifecycleCounts::of(timeline);
            if counts.freezetime_ended <= counts.ended {
                break;
            }
            tracing::debug!(round = counts.ended + 1, "Synthesizing missing RoundEnded");
            self.on_round_ended(timeline, participants, RoundEnded::unknown());
        }

        loop {
            let counts = LifecycleCounts::of(timeline);
            if counts.freezetime_ended <= counts.officially_ended {
                break;
            }
            let Some(lagging) = timeline.nth::<RoundEnded>(counts.officially_ended) else {
                break;
            };
            let synthesized = RoundOfficiallyEnded {
                winner: lagging.winner,
                reason: lagging.reason,
                message: lagging.message.clone(),
                length: lagging.length + ESTIMATED_LENGTH_PADDING,
            };
            tracing::debug!(round = counts.officially_ended + 1, "Synthesizing missing RoundOfficiallyEnded");
            self.on_round_officially_ended(timeline, participants, synthesized);
        }

        self.store_freezetime(timeline, participants, event);
        RoundFlow::Continue
    }

    /// Close a round that ended without an official end once the stream is exhausted
    pub fn close_open_round(&self, timeline: &mut EventTimeline, participants: &[PlayerSnapshot]) {
        let counts = LifecycleCounts::of(timeline);
        if counts.ended <= counts.officially_ended {
            return;
        }
        if let Some(last) = timeline.nth::<RoundEnded>(counts.officially_ended) {
            let synthesized = RoundOfficiallyEnded {
                winner: last.winner,
                reason: last.reason,
                message: last.message.clone(),
                length: last.length + ESTIMATED_LENGTH_PADDING,
            };
            tracing::debug!(round = counts.ended, "Closing final round without an official end");
            self.on_round_officially_ended(timeline, participants, synthesized);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Helpers
    // ═══════════════════════════════════════════════════════════════════════

    fn backfill_freezetimes<F>(&self, timeline: &mut EventTimeline, participants: &[PlayerSnapshot], lagging: F)
    where
        F: Fn(&LifecycleCounts) -> bool,
    {
        while lagging(&LifecycleCounts::of(timeline)) {
            self.store_freezetime(timeline, participants, FreezetimeEnded::synthesized());
            let round = timeline.count(EventKind::FreezetimeEnded) as i32;
            tracing::debug!(round, "Synthesized missing FreezetimeEnded");
            retime_feedback(timeline, round);
        }
    }

    /// Store a freezetime end with the roster and equipment snapshot for the upcoming round
    fn store_freezetime(&self, timeline: &mut EventTimeline, participants: &[PlayerSnapshot], event: FreezetimeEnded) {
        timeline.push(event);

        let round = timeline.count(EventKind::RoundOfficiallyEnded) as i32 + 1;
        let roster = TeamRoster::from_participants(round, participants);
        let equipment = TeamEquipment::from_roster(&roster);
        timeline.push(roster);
        timeline.push(equipment);
    }
}

/// In-round time of feedback sent during a round whose freezetime end was never seen is unknowable
fn retime_feedback(timeline: &mut EventTimeline, round: i32) {
    for id in timeline.record_ids::<FeedbackMessage>() {
        timeline.update_record::<FeedbackMessage, _>(id, |message| {
            if message.round == round {
                message.time_in_round = FreezetimeEnded::UNKNOWN_TIME;
            }
        });
    }
}
