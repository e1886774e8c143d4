use demostats_types::{ChickenStats, FeedbackMessageStats, GameMode, MapInfo};

use super::StatsAggregator;
use crate::context::TriggerLookup;
use crate::demo_event::{
    ChickenKilled, FeedbackMessage, MatchStarted, SiteLetter, Team, TeamRoster,
};
use crate::timeline::EventTimeline;

/// Guess the game mode from roster sizes and map triggers.
///
/// More than ten terrorists against an empty CT side, or two hostages on a
/// map without bombsites, is survival. Otherwise more than two a side is a
/// full-team mode and anything smaller is wingman.
pub fn infer_game_mode(rosters: &[&TeamRoster], triggers: &dyn TriggerLookup, has_bombsites: bool) -> GameMode {
    let crowded_terrorists = rosters.iter().any(|r| r.terrorists.len() > 10);
    let empty_ct = rosters.iter().any(|r| r.counter_terrorists.is_empty());
    let both_hostages = triggers.hostage_index(SiteLetter::A).is_some() && triggers.hostage_index(SiteLetter::B).is_some();

    if (crowded_terrorists && empty_ct) || (both_hostages && !has_bombsites) {
        return GameMode::DangerZone;
    }

    let full_teams = rosters.iter().any(|r| r.terrorists.len() > 2)
        && rosters.iter().any(|r| r.counter_terrorists.len() > 2);
    let bombsites = has_bombsites || triggers.has_bombsite_triggers();
    let hostages = triggers.has_hostages();

    match (full_teams, bombsites, hostages) {
        (true, true, _) => GameMode::Defuse,
        (true, false, true) => GameMode::Hostage,
        (false, true, _) => GameMode::WingmanDefuse,
        (false, false, true) => GameMode::WingmanHostage,
        _ => GameMode::Unknown,
    }
}

impl StatsAggregator<'_> {
    /// Map path from the match start is `workshop/<id>/<name>` for workshop maps
    pub(super) fn map_info(&self, timeline: &EventTimeline, game_mode: GameMode) -> MapInfo {
        let map_path = timeline
            .last::<MatchStarted>()
            .map(|started| started.map_name.as_str())
            .unwrap_or_default();
        let parts: Vec<&str> = map_path.split('/').collect();
        let (map_name, workshop_id) = match parts.as_slice() {
            [_, workshop_id, map_name, ..] => (map_name.to_string(), workshop_id.to_string()),
            _ => (self.config.map_name.clone(), "unknown".to_string()),
        };

        MapInfo {
            map_name,
            workshop_id,
            demo_name: self.config.demo_stem(),
            game_mode: game_mode.as_str().to_string(),
            test_type: self.config.test_type.as_str().to_string(),
            test_date: self.config.test_date,
        }
    }

    /// Feedback rows; a missing side is looked up in that round's roster
    pub(super) fn feedback_messages(&self, timeline: &EventTimeline) -> Vec<FeedbackMessageStats> {
        timeline
            .records::<FeedbackMessage>()
            .map(|message| {
                let team_name = match &message.team_name {
                    Some(team) if message.steam_id != 0 => Some(team.clone()),
                    current => self
                        .roster_side(timeline, message)
                        .map(|team| team.feedback_name().to_string())
                        .or_else(|| current.clone()),
                };
                FeedbackMessageStats {
                    round: message.round,
                    steam_id: message.steam_id,
                    team_name,
                    x_position: message.position.x,
                    y_position: message.position.y,
                    z_position: message.position.z,
                    x_last_alive_position: message.last_alive_position.map(|p| p.x),
                    y_last_alive_position: message.last_alive_position.map(|p| p.y),
                    z_last_alive_position: message.last_alive_position.map(|p| p.z),
                    x_view: message.view_x,
                    y_view: message.view_y,
                    set_pos_command: message.set_pos_command.clone(),
                    time_in_round: message.time_in_round,
                    message: message.message.clone(),
                }
            })
            .collect()
    }

    /// Sender's side in the message's round; `None` before the first roster (warmup)
    fn roster_side(&self, timeline: &EventTimeline, message: &FeedbackMessage) -> Option<Team> {
        let roster = timeline.records::<TeamRoster>().find(|r| r.round == message.round)?;
        let sender = match message.steam_id {
            0 => self.identities.account_for_name(&message.sender_name).unwrap_or(0),
            account => account,
        };
        let on = |team: Team| roster.side(team).iter().any(|p| self.account(p) == sender);

        Some(if sender != 0 && on(Team::Terrorist) {
            Team::Terrorist
        } else if sender != 0 && on(Team::CounterTerrorist) {
            Team::CounterTerrorist
        } else {
            Team::Spectate
        })
    }

    pub(super) fn chicken_stats(&self, timeline: &EventTimeline) -> ChickenStats {
        ChickenStats {
            killed: timeline.count_of::<ChickenKilled>() as i32,
        }
    }
}
