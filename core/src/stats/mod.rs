//! Derived statistics aggregator.
//!
//! Runs once over a finished timeline. Site and hostage letters are resolved
//! first and patched into the timeline; every table that reports a letter is
//! built afterwards from the corrected records.

mod first_damage;
mod grenades;
mod map_info;
mod players;
mod positions;
mod rounds;
mod sites;
mod teams;

#[cfg(test)]
mod tests;

pub use map_info::infer_game_mode;
pub use rounds::{Half, SideAlternation};
pub use sites::{SiteNotes, disambiguate_sites};

use demostats_types::{AllStats, GameMode, PlayerPositionsStats, VersionNumber};

use crate::context::{SessionConfig, TriggerLookup};
use crate::demo_event::{MatchStarted, PlayerSnapshot, TeamRoster};
use crate::identity::PlayerIdentityResolver;
use crate::timeline::{EventKind, EventTimeline};

/// Builds every output table from one match's timeline.
pub struct StatsAggregator<'a> {
    config: &'a SessionConfig,
    identities: &'a PlayerIdentityResolver,
    triggers: &'a dyn TriggerLookup,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(
        config: &'a SessionConfig,
        identities: &'a PlayerIdentityResolver,
        triggers: &'a dyn TriggerLookup,
    ) -> Self {
        Self {
            config,
            identities,
            triggers,
        }
    }

    /// Resolve site letters in place, then build the statistics document.
    ///
    /// `complete` is false when the session ended on a decode failure or an abort.
    pub fn aggregate(&self, timeline: &mut EventTimeline, complete: bool) -> AllStats {
        let notes = disambiguate_sites(timeline, self.triggers);
        let timeline = &*timeline;

        let game_mode = self.game_mode(timeline);
        let survival = game_mode.is_survival();
        let alternation = SideAlternation::from_timeline(timeline, self.config.overtime_half_length);
        let (grenades_total_stats, grenades_specific_stats) = self.grenade_stats(timeline);

        let stats = AllStats {
            version_number: VersionNumber {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            supported_gamemodes: GameMode::supported(),
            map_info: self.map_info(timeline, game_mode),
            complete,
            player_stats: self.player_stats(timeline),
            winners_stats: (!survival).then(|| self.winners_stats(timeline, &alternation)),
            rounds_stats: self.rounds_stats(timeline, &alternation, &notes),
            bombsite_stats: (!survival).then(|| self.bombsite_stats(timeline)),
            hostage_stats: (!survival).then(|| self.hostage_stats(timeline)),
            rescue_zone_stats: self.rescue_zone_stats(),
            grenades_total_stats,
            grenades_specific_stats,
            kills_stats: self.kills_stats(timeline),
            feedback_messages: self.feedback_messages(timeline),
            chicken_stats: self.config.parse_chickens.then(|| self.chicken_stats(timeline)),
            team_stats: (!survival).then(|| self.team_stats(timeline, &alternation)),
            first_damage_stats: self.first_damage_stats(timeline),
        };

        tracing::debug!(
            game_mode = %game_mode,
            rounds = stats.rounds_stats.len(),
            players = stats.player_stats.len(),
            kills = stats.kills_stats.len(),
            complete,
            "Aggregated match stats"
        );
        stats
    }

    /// Positions document; empty when sampling produced nothing
    pub fn player_positions(&self, timeline: &EventTimeline) -> PlayerPositionsStats {
        PlayerPositionsStats {
            demo_name: self.config.demo_stem(),
            player_position_by_round: self.positions_by_round(timeline),
        }
    }

    /// Configured mode, or the one inferred from rosters and triggers
    pub fn game_mode(&self, timeline: &EventTimeline) -> GameMode {
        if self.config.game_mode != GameMode::Unknown {
            return self.config.game_mode;
        }
        let rosters: Vec<&TeamRoster> = timeline.records::<TeamRoster>().collect();
        let has_bombsites = timeline
            .records::<MatchStarted>()
            .any(|started| started.has_bombsites);
        infer_game_mode(&rosters, self.triggers, has_bombsites)
    }

    // --- Helpers ---

    /// Account id for a player: resolver mapping, then the snapshot, then the
    /// first tracked connection with the same name. Zero when nothing matches.
    fn account(&self, player: &PlayerSnapshot) -> i64 {
        match self.identities.account_for(player) {
            0 => self.identities.account_for_name(&player.name).unwrap_or(0),
            account => account,
        }
    }

    fn rounds_officially_ended(timeline: &EventTimeline) -> i32 {
        timeline.count(EventKind::RoundOfficiallyEnded) as i32
    }
}
