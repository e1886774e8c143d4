//! Match session: the single owner of all per-match state.
//!
//! The decoder pushes events into [`MatchSession::process_event`] (or hands an
//! iterator to [`MatchSession::run`]); [`MatchSession::finish`] runs the
//! aggregator and returns the report. Sessions share nothing with each other.

mod error;
mod processor;
mod report;


pub use error::SessionError;
pub use processor::EventOutcome;
pub use report::{MatchReport, SessionStatus};

use crate::context::{NoTriggers, SessionConfig, TriggerLookup};
use crate::demo_event::{DemoEvent, PlayerSnapshot};
use crate::identity::{DuplicateDetector, PlayerIdentityResolver};
use crate::rounds::{RoundReconstructor, current_round};
use crate::stats::StatsAggregator;
use crate::ticks::TickAccumulator;
use crate::timeline::{EventKind, EventTimeline};

#[derive(Debug)]
pub struct MatchSession {
    config: SessionConfig,
    timeline: EventTimeline,
    identities: PlayerIdentityResolver,
    reconstructor: RoundReconstructor,
    ticks: TickAccumulator,
    /// Last participant list the decoder reported; used for synthesized freezetimes
    participants: Vec<PlayerSnapshot>,
    triggers: Box<dyn TriggerLookup>,
    status: SessionStatus,
    events_applied: u64,
    events_discarded: u64,
}

impl MatchSession {
    pub fn new(config: SessionConfig) -> Self {
        let reconstructor = RoundReconstructor::new(config.game_mode, config.test_type);
        Self {
            config,
            timeline: EventTimeline::new(),
            identities: PlayerIdentityResolver::new(),
            reconstructor,
            ticks: TickAccumulator::new(),
            participants: Vec::new(),
            triggers: Box::new(NoTriggers),
            status: SessionStatus::Running,
            events_applied: 0,
            events_discarded: 0,
        }
    }

    pub fn with_triggers(mut self, triggers: Box<dyn TriggerLookup>) -> Self {
        self.triggers = triggers;
        self
    }

    /// Replace the reconnect heuristic. Only meaningful before the first event.
    pub fn with_detector(mut self, detector: Box<dyn DuplicateDetector>) -> Self {
        self.identities = PlayerIdentityResolver::with_detector(detector);
        self
    }

    // --- Lifecycle ---

    /// Feed every event from the decoder until it is exhausted, fails, or the match ends.
    pub fn run<I, E>(&mut self, events: I) -> Result<SessionStatus, SessionError>
    where
        I: IntoIterator<Item = Result<DemoEvent, E>>,
        E: std::error::Error + Send + Sync + 'static,
    {
        for item in events {
            match item {
                Ok(event) => {
                    if self.process_event(event) == EventOutcome::Halted {
                        break;
                    }
                }
                Err(err) => {
                    self.status = SessionStatus::Failed;
                    tracing::warn!(
                        error = %err,
                        events_applied = self.events_applied,
                        "Replay decoder failed, session marked incomplete"
                    );
                    return Err(SessionError::Decode {
                        events_applied: self.events_applied,
                        source: Box::new(err),
                    });
                }
            }
        }
        Ok(self.status)
    }

    /// Caller-initiated stop; later events are discarded
    pub fn abort(&mut self) {
        if self.status == SessionStatus::Running {
            tracing::info!(events_applied = self.events_applied, "Session aborted");
            self.status = SessionStatus::Aborted;
        }
    }

    /// Run the aggregator over the finished timeline
    pub fn finish(mut self) -> MatchReport {
        if self.status == SessionStatus::Running {
            self.reconstructor.close_open_round(&mut self.timeline, &self.participants);
        }

        let aggregator = StatsAggregator::new(&self.config, &self.identities, self.triggers.as_ref());
        let stats = aggregator.aggregate(&mut self.timeline, self.status.is_complete());
        let player_positions = self
            .config
            .parse_player_positions
            .then(|| aggregator.player_positions(&self.timeline));

        tracing::info!(
            rounds = self.timeline.count(EventKind::RoundOfficiallyEnded),
            status = ?self.status,
            applied = self.events_applied,
            discarded = self.events_discarded,
            "Session finished"
        );

        MatchReport {
            stats,
            player_positions,
            status: self.status,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timeline(&self) -> &EventTimeline {
        &self.timeline
    }

    pub fn identities(&self) -> &PlayerIdentityResolver {
        &self.identities
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_round(&self) -> i32 {
        current_round(&self.timeline, self.config.game_mode)
    }

    pub fn ticks_processed(&self) -> u64 {
        self.ticks.ticks_processed()
    }
}
