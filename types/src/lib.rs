//! Shared statistics and configuration types for demostats
//!
//! This crate holds the serializable data contract the match aggregator emits
//! into. Formatting and persisting these tables is left to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Match Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Game mode of a match. Drives the minimum-rounds table and which tables are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Defuse,
    Hostage,
    WingmanDefuse,
    WingmanHostage,
    DangerZone,
    #[default]
    Unknown,
}

impl GameMode {
    /// Survival-style mode: no teams, no bombsites, no winners table
    pub fn is_survival(&self) -> bool {
        matches!(self, GameMode::DangerZone)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Defuse => "defuse",
            GameMode::Hostage => "hostage",
            GameMode::WingmanDefuse => "wingmandefuse",
            GameMode::WingmanHostage => "wingmanhostage",
            GameMode::DangerZone => "dangerzone",
            GameMode::Unknown => "unknown",
        }
    }

    /// Every mode a report can be labelled with, `unknown` last
    pub fn supported() -> Vec<String> {
        [
            GameMode::Defuse,
            GameMode::Hostage,
            GameMode::WingmanDefuse,
            GameMode::WingmanHostage,
            GameMode::DangerZone,
            GameMode::Unknown,
        ]
        .iter()
        .map(|m| m.as_str().to_string())
        .collect()
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ladder tier the match was played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Casual,
    Competitive,
    Unknown,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Casual => "casual",
            TestType::Competitive => "competitive",
            TestType::Unknown => "unknown",
        }
    }

    /// Largest roster a side may legitimately field before stray members are filtered
    pub fn max_players_per_side(&self) -> Option<usize> {
        match self {
            TestType::Competitive => Some(5),
            TestType::Casual => Some(10),
            TestType::Unknown => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Full statistics document for one processed match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllStats {
    pub version_number: VersionNumber,
    pub supported_gamemodes: Vec<String>,
    pub map_info: MapInfo,
    /// False when the session ended on a decode failure or caller abort
    pub complete: bool,
    pub player_stats: Vec<PlayerStats>,
    pub winners_stats: Option<WinnersStats>,
    pub rounds_stats: Vec<RoundsStats>,
    pub bombsite_stats: Option<Vec<BombsiteStats>>,
    pub hostage_stats: Option<Vec<HostageStats>>,
    pub rescue_zone_stats: Vec<RescueZoneStats>,
    pub grenades_total_stats: Vec<GrenadesTotalStats>,
    pub grenades_specific_stats: Vec<GrenadesSpecificStats>,
    pub kills_stats: Vec<KillsStats>,
    pub feedback_messages: Vec<FeedbackMessageStats>,
    pub chicken_stats: Option<ChickenStats>,
    pub team_stats: Option<Vec<TeamStats>>,
    pub first_damage_stats: Vec<FirstDamageStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionNumber {
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapInfo {
    pub map_name: String,
    #[serde(rename = "WorkshopID")]
    pub workshop_id: String,
    pub demo_name: String,
    pub game_mode: String,
    pub test_type: String,
    pub test_date: Option<NaiveDate>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-player Tables
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerStats {
    pub player_name: String,
    #[serde(rename = "SteamID")]
    pub steam_id: i64,
    pub kills: i64,
    pub kills_including_bots: i64,
    pub deaths: i64,
    pub deaths_including_bots: i64,
    pub headshots: i64,
    pub headshots_including_bots: i64,
    pub assists: i64,
    pub assists_including_bots: i64,
    #[serde(rename = "MVPs")]
    pub mvps: i64,
    pub shots: i64,
    pub plants: i64,
    pub defuses: i64,
    pub rescues: i64,
    pub ticks_alive: u64,
    pub ticks_on_server: u64,
    pub ticks_playing: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KillsStats {
    pub round: i32,
    pub time_in_round: f64,
    pub weapon: String,
    pub weapon_class: String,
    pub weapon_type: String,
    #[serde(rename = "KillerSteamID")]
    pub killer_steam_id: i64,
    pub killer_bot_takeover: bool,
    pub x_position_kill: f64,
    pub y_position_kill: f64,
    pub z_position_kill: f64,
    #[serde(rename = "VictimSteamID")]
    pub victim_steam_id: i64,
    pub victim_bot_takeover: bool,
    pub x_position_death: f64,
    pub y_position_death: f64,
    pub z_position_death: f64,
    #[serde(rename = "AssisterSteamID")]
    pub assister_steam_id: i64,
    pub assister_bot_takeover: bool,
    pub first_kill_of_the_round: bool,
    pub suicide: bool,
    pub team_kill: bool,
    pub penetrations_count: i32,
    pub headshot: bool,
    pub assisted_flash: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeedbackMessageStats {
    pub round: i32,
    #[serde(rename = "SteamID")]
    pub steam_id: i64,
    pub team_name: Option<String>,
    pub x_position: f64,
    pub y_position: f64,
    pub z_position: f64,
    pub x_last_alive_position: Option<f64>,
    pub y_last_alive_position: Option<f64>,
    pub z_last_alive_position: Option<f64>,
    pub x_view: f32,
    pub y_view: f32,
    pub set_pos_command: String,
    /// Seconds since freezetime ended; -1 when that moment is unknown
    pub time_in_round: f64,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Round Tables
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoundsStats {
    pub round: i32,
    pub half: String,
    pub overtime: i32,
    pub length: f64,
    pub winners: String,
    pub win_method: String,
    pub bombsite_planted_at: Option<String>,
    pub bomb_plant_position_x: Option<f64>,
    pub bomb_plant_position_y: Option<f64>,
    pub bomb_plant_position_z: Option<f64>,
    pub bombsite_error_message: Option<String>,
    pub picked_up_hostage_a: bool,
    pub picked_up_hostage_b: bool,
    pub picked_up_all_hostages: bool,
    pub hostage_a_picked_up_error_message: Option<String>,
    pub hostage_b_picked_up_error_message: Option<String>,
    pub rescued_hostage_a: bool,
    pub rescued_hostage_b: bool,
    pub rescued_all_hostages: bool,
    pub rescued_hostage_a_position_x: Option<f64>,
    pub rescued_hostage_a_position_y: Option<f64>,
    pub rescued_hostage_a_position_z: Option<f64>,
    pub rescued_hostage_b_position_x: Option<f64>,
    pub rescued_hostage_b_position_y: Option<f64>,
    pub rescued_hostage_b_position_z: Option<f64>,
    pub time_in_round_planted: Option<f64>,
    pub time_in_round_exploded: Option<f64>,
    pub time_in_round_defused: Option<f64>,
    pub time_in_round_rescued_hostage_a: Option<f64>,
    pub time_in_round_rescued_hostage_b: Option<f64>,
    pub team_alpha_player_count: i32,
    pub team_beta_player_count: i32,
    pub team_alpha_equip_value: i32,
    pub team_beta_equip_value: i32,
    pub team_alpha_expenditure: i32,
    pub team_beta_expenditure: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WinnersStats {
    pub winning_team: String,
    pub team_alpha_rounds: i32,
    pub team_beta_rounds: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeamStats {
    pub round: i32,
    pub team_alpha: Vec<i64>,
    pub team_alpha_kills: i32,
    pub team_alpha_deaths: i32,
    pub team_alpha_assists: i32,
    pub team_alpha_flash_assists: i32,
    pub team_alpha_headshots: i32,
    pub team_alpha_teamkills: i32,
    pub team_alpha_suicides: i32,
    pub team_alpha_wallbang_kills: i32,
    pub team_alpha_wallbangs_total_for_all_kills: i32,
    pub team_alpha_wallbangs_most_in_one_kill: i32,
    pub team_alpha_shots_fired: i32,
    pub team_bravo: Vec<i64>,
    pub team_bravo_kills: i32,
    pub team_bravo_deaths: i32,
    pub team_bravo_assists: i32,
    pub team_bravo_flash_assists: i32,
    pub team_bravo_headshots: i32,
    pub team_bravo_teamkills: i32,
    pub team_bravo_suicides: i32,
    pub team_bravo_wallbang_kills: i32,
    pub team_bravo_wallbangs_total_for_all_kills: i32,
    pub team_bravo_wallbangs_most_in_one_kill: i32,
    pub team_bravo_shots_fired: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FirstDamageStats {
    pub round: i32,
    pub first_damage_to_enemy_by_players: Vec<DamageGivenByPlayerInRound>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DamageGivenByPlayerInRound {
    pub time_in_round: f64,
    pub team_side_shooter: String,
    #[serde(rename = "SteamIDShooter")]
    pub steam_id_shooter: i64,
    pub x_position_shooter: f64,
    pub y_position_shooter: f64,
    pub z_position_shooter: f64,
    pub team_side_victim: String,
    #[serde(rename = "SteamIDVictim")]
    pub steam_id_victim: i64,
    pub x_position_victim: f64,
    pub y_position_victim: f64,
    pub z_position_victim: f64,
    pub weapon: String,
    pub weapon_class: String,
    pub weapon_type: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Objective Tables
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned bounds of a trigger volume
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneBounds {
    pub x_position_min: f64,
    pub y_position_min: f64,
    pub z_position_min: f64,
    pub x_position_max: f64,
    pub y_position_max: f64,
    pub z_position_max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BombsiteStats {
    pub bombsite: char,
    pub plants: i32,
    pub explosions: i32,
    pub defuses: i32,
    #[serde(flatten)]
    pub bounds: Option<ZoneBounds>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostageStats {
    pub hostage: char,
    pub hostage_index: Option<i32>,
    pub picked_ups: i32,
    pub rescues: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RescueZoneStats {
    #[serde(flatten)]
    pub bounds: ZoneBounds,
}

// ─────────────────────────────────────────────────────────────────────────────
// Grenades & Misc
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GrenadesTotalStats {
    pub nade_type: String,
    pub amount_used: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GrenadesSpecificStats {
    pub nade_type: String,
    #[serde(rename = "SteamID")]
    pub steam_id: i64,
    pub x_position: f64,
    pub y_position: f64,
    pub z_position: f64,
    pub num_players_flashed: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChickenStats {
    pub killed: i32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Player Positions Document
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerPositionsStats {
    pub demo_name: String,
    pub player_position_by_round: Vec<PlayerPositionByRound>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerPositionByRound {
    pub round: i32,
    pub player_position_by_time_in_round: Vec<PlayerPositionByTimeInRound>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerPositionByTimeInRound {
    pub time_in_round: i32,
    #[serde(rename = "PlayerPositionBySteamID")]
    pub player_position_by_steam_id: Vec<PlayerPositionBySteamId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerPositionBySteamId {
    #[serde(rename = "SteamID")]
    pub steam_id: i64,
    pub team_side: String,
    pub x_position: i32,
    pub y_position: i32,
    pub z_position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_serializes_lowercase() {
        let json = serde_json::to_string(&GameMode::WingmanDefuse).unwrap();
        assert_eq!(json, "\"wingmandefuse\"");
        let mode: GameMode = serde_json::from_str("\"dangerzone\"").unwrap();
        assert!(mode.is_survival());
    }

    #[test]
    fn test_all_stats_field_names() {
        let stats = AllStats {
            winners_stats: Some(WinnersStats {
                winning_team: "Team Alpha".to_string(),
                team_alpha_rounds: 2,
                team_beta_rounds: 0,
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["winnersStats"]["TeamAlphaRounds"], 2);
        assert_eq!(value["winnersStats"]["WinningTeam"], "Team Alpha");
        assert!(value.get("roundsStats").is_some());
    }

    #[test]
    fn test_bombsite_bounds_flatten() {
        let stats = BombsiteStats {
            bombsite: 'A',
            plants: 1,
            explosions: 0,
            defuses: 0,
            bounds: Some(ZoneBounds { x_position_max: 12.0, ..Default::default() }),
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["Bombsite"], "A");
        assert_eq!(value["XPositionMax"], 12.0);
    }

    #[test]
    fn test_supported_modes_end_with_unknown() {
        let modes = GameMode::supported();
        assert_eq!(modes.len(), 6);
        assert_eq!(modes[0], "defuse");
        assert_eq!(modes[5], "unknown");
    }
}
