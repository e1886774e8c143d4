use super::player::{PlayerSnapshot, Team};

/// Why a round ended, as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundEndReason {
    TargetBombed,
    VIPEscaped,
    VIPKilled,
    TerroristsEscaped,
    CTStoppedEscape,
    TerroristsStopped,
    BombDefused,
    CTsWin,
    TerroristsWin,
    Draw,
    HostagesRescued,
    TargetSaved,
    HostagesNotRescued,
    TerroristsNotEscaped,
    VIPNotEscaped,
    GameStart,
    TerroristsSurrender,
    CTSurrender,
    SurvivalWin,
    #[default]
    Unknown,
}

impl RoundEndReason {
    /// Win method label for the rounds table; `None` for reasons that don't decide a round
    pub fn win_method(&self) -> Option<&'static str> {
        match self {
            RoundEndReason::TerroristsWin => Some("T Kills"),
            RoundEndReason::CTsWin => Some("CT Kills"),
            RoundEndReason::TargetBombed => Some("Bombed"),
            RoundEndReason::BombDefused => Some("Defused"),
            RoundEndReason::HostagesRescued => Some("HostagesRescued"),
            RoundEndReason::HostagesNotRescued => Some("HostagesNotRescued"),
            RoundEndReason::TargetSaved => Some("TSaved"),
            RoundEndReason::SurvivalWin => Some("Danger Zone Won"),
            RoundEndReason::Unknown => Some("Unknown"),
            _ => None,
        }
    }
}

/// Fresh match start; carries the map path the server loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStarted {
    pub map_name: String,
    pub has_bombsites: bool,
}

/// The moment a winning condition was met
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundEnded {
    pub winner: Team,
    pub reason: RoundEndReason,
    pub message: String,
    pub length: f64,
}

impl RoundEnded {
    /// Placeholder for a round whose end was never observed
    pub fn unknown() -> Self {
        Self {
            winner: Team::Unknown,
            reason: RoundEndReason::Unknown,
            message: "Unknown".to_string(),
            length: 0.0,
        }
    }
}

/// Administrative close of a round. Timing is authoritative, outcome is copied from [`RoundEnded`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundOfficiallyEnded {
    pub winner: Team,
    pub reason: RoundEndReason,
    pub message: String,
    pub length: f64,
}

impl RoundOfficiallyEnded {
    pub fn copy_outcome(&mut self, ended: &RoundEnded) {
        self.winner = ended.winner;
        self.reason = ended.reason;
        self.message = ended.message.clone();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FreezetimeEnded {
    /// Demo time the freezetime ended; -1 when synthesized
    pub time_end: f64,
}

impl FreezetimeEnded {
    pub const UNKNOWN_TIME: f64 = -1.0;

    pub fn synthesized() -> Self {
        Self {
            time_end: Self::UNKNOWN_TIME,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.time_end == Self::UNKNOWN_TIME
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwitchSides {
    /// Last round played before the teams swapped sides
    pub round_before_switch: i32,
}

/// Roster observed when freezetime ended; authoritative side assignment for the round
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRoster {
    pub round: i32,
    pub terrorists: Vec<PlayerSnapshot>,
    pub counter_terrorists: Vec<PlayerSnapshot>,
}

impl TeamRoster {
    pub fn from_participants(round: i32, participants: &[PlayerSnapshot]) -> Self {
        let side = |team: Team| {
            participants
                .iter()
                .filter(|p| p.team == team)
                .cloned()
                .collect::<Vec<_>>()
        };
        Self {
            round,
            terrorists: side(Team::Terrorist),
            counter_terrorists: side(Team::CounterTerrorist),
        }
    }

    pub fn side(&self, team: Team) -> &[PlayerSnapshot] {
        match team {
            Team::Terrorist => &self.terrorists,
            Team::CounterTerrorist => &self.counter_terrorists,
            _ => &[],
        }
    }

    pub fn both_sides_populated(&self) -> bool {
        !self.terrorists.is_empty() && !self.counter_terrorists.is_empty()
    }
}

/// Equipment value and spend per side, taken at freezetime end
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamEquipment {
    pub round: i32,
    pub t_equip_value: i32,
    pub ct_equip_value: i32,
    pub t_expenditure: i32,
    pub ct_expenditure: i32,
}

impl TeamEquipment {
    pub fn from_roster(roster: &TeamRoster) -> Self {
        let value = |players: &[PlayerSnapshot]| players.iter().map(|p| p.current_equipment_value).sum::<i32>();
        let spent = |players: &[PlayerSnapshot]| players.iter().map(PlayerSnapshot::expenditure).sum::<i32>();
        Self {
            round: roster.round,
            t_equip_value: value(&roster.terrorists),
            ct_equip_value: value(&roster.counter_terrorists),
            t_expenditure: spent(&roster.terrorists),
            ct_expenditure: spent(&roster.counter_terrorists),
        }
    }
}
