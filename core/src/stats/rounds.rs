//! Round outcome table and win totals.
//!
//! Teams are reported as Alpha/Beta rather than by side. Alpha plays
//! Terrorist in the first half and every side swap flips that, including
//! each overtime half.

use demostats_types::{RoundsStats, WinnersStats};

use super::StatsAggregator;
use super::sites::SiteNotes;
use crate::demo_event::{
    BombDefused, BombExploded, BombPlanted, HostagePickedUp, HostageRescued, RoundOfficiallyEnded,
    SiteLetter, SwitchSides, Team, TeamEquipment, TeamRoster,
};
use crate::timeline::EventTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub fn as_str(&self) -> &'static str {
        match self {
            Half::First => "First",
            Half::Second => "Second",
        }
    }
}

/// Side-swap history of a match, as the last round played before each swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideAlternation {
    switches: Vec<i32>,
    overtime_half_length: i32,
}

impl SideAlternation {
    pub fn new(switches: Vec<i32>, overtime_half_length: u32) -> Self {
        Self {
            switches,
            overtime_half_length: overtime_half_length.max(1) as i32,
        }
    }

    pub fn from_timeline(timeline: &EventTimeline, overtime_half_length: u32) -> Self {
        let switches = timeline
            .records::<SwitchSides>()
            .map(|s| s.round_before_switch)
            .collect();
        Self::new(switches, overtime_half_length)
    }

    /// Half and overtime number of the round at zero-based `index`. Overtime 0 is regulation.
    pub fn half_and_overtime(&self, index: usize) -> (Half, i32) {
        let index = index as i32;

        if let [_, regulation_end, rest @ ..] = self.switches.as_slice()
            && index >= *regulation_end
        {
            let per_half = match rest.first() {
                Some(next) if next > regulation_end => next - regulation_end,
                _ => self.overtime_half_length,
            };
            let into_overtime = index + 1 - regulation_end;
            let overtime = ceil_div(into_overtime, per_half * 2);
            let half = if ceil_div(into_overtime, per_half) % 2 == 1 {
                Half::First
            } else {
                Half::Second
            };
            return (half, overtime);
        }

        match self.switches.first() {
            Some(first) if index >= *first => (Half::Second, 0),
            _ => (Half::First, 0),
        }
    }

    /// Whether Terrorists are Team Alpha for the round at `index`
    pub fn is_normal_order(&self, index: usize) -> bool {
        let (half, overtime) = self.half_and_overtime(index);
        (half == Half::First) == (overtime % 2 == 0)
    }

    /// In-game sides of Team Alpha and Team Beta for the round at `index`
    pub fn sides(&self, index: usize) -> (Team, Team) {
        if self.is_normal_order(index) {
            (Team::Terrorist, Team::CounterTerrorist)
        } else {
            (Team::CounterTerrorist, Team::Terrorist)
        }
    }
}

fn ceil_div(value: i32, divisor: i32) -> i32 {
    (value + divisor - 1) / divisor
}

/// Official ends that made it into the rounds table, with their zero-based index
fn decided_rounds(timeline: &EventTimeline) -> impl Iterator<Item = (usize, &RoundOfficiallyEnded)> {
    timeline
        .records::<RoundOfficiallyEnded>()
        .enumerate()
        .filter(|(_, official)| {
            official.reason.win_method().is_some()
                && matches!(
                    official.winner,
                    Team::Terrorist | Team::CounterTerrorist | Team::Unknown
                )
        })
}

impl StatsAggregator<'_> {
    pub(super) fn rounds_stats(
        &self,
        timeline: &EventTimeline,
        alternation: &SideAlternation,
        notes: &SiteNotes,
    ) -> Vec<RoundsStats> {
        decided_rounds(timeline)
            .map(|(index, official)| round_row(timeline, alternation, notes, index, official))
            .collect()
    }

    pub(super) fn winners_stats(&self, timeline: &EventTimeline, alternation: &SideAlternation) -> WinnersStats {
        let mut alpha = 0;
        let mut beta = 0;

        for (index, official) in decided_rounds(timeline) {
            if !official.winner.is_playing() {
                continue;
            }
            let (alpha_side, _) = alternation.sides(index);
            if official.winner == alpha_side {
                alpha += 1;
            } else {
                beta += 1;
            }
        }

        let winning_team = match alpha.cmp(&beta) {
            std::cmp::Ordering::Greater => "Team Alpha",
            std::cmp::Ordering::Equal => "Draw",
            std::cmp::Ordering::Less => "Team Bravo",
        };

        WinnersStats {
            winning_team: winning_team.to_string(),
            team_alpha_rounds: alpha,
            team_beta_rounds: beta,
        }
    }
}

fn round_row(
    timeline: &EventTimeline,
    alternation: &SideAlternation,
    notes: &SiteNotes,
    index: usize,
    official: &RoundOfficiallyEnded,
) -> RoundsStats {
    let round = index as i32 + 1;
    let (half, overtime) = alternation.half_and_overtime(index);
    let (alpha, beta) = alternation.sides(index);

    let roster = timeline.records::<TeamRoster>().find(|r| r.round == round);
    let players = |side: Team| roster.map_or(0, |r| r.side(side).len() as i32);

    let equipment = timeline
        .records::<TeamEquipment>()
        .find(|e| e.round == round)
        .copied()
        .unwrap_or_default();
    let equip_value = |side: Team| match side {
        Team::Terrorist => equipment.t_equip_value,
        _ => equipment.ct_equip_value,
    };
    let expenditure = |side: Team| match side {
        Team::Terrorist => equipment.t_expenditure,
        _ => equipment.ct_expenditure,
    };

    // Letters were settled by disambiguation, so the three records agree when present
    let plant = timeline.records::<BombPlanted>().find(|p| p.round == round);
    let explosion = timeline.records::<BombExploded>().find(|e| e.round == round);
    let defuse = timeline.records::<BombDefused>().find(|d| d.round == round);
    let bombsite = defuse
        .map(|d| d.site)
        .or(explosion.map(|e| e.site))
        .or(plant.map(|p| p.site));
    let plant_position = plant.and_then(BombPlanted::position);

    let pickup = |hostage: SiteLetter| {
        timeline
            .records::<HostagePickedUp>()
            .find(|p| p.round == round && p.hostage == hostage)
    };
    let rescue = |hostage: SiteLetter| {
        timeline
            .records::<HostageRescued>()
            .find(|r| r.round == round && r.hostage == hostage)
    };
    let (picked_up_a, picked_up_b) = (pickup(SiteLetter::A).is_some(), pickup(SiteLetter::B).is_some());
    let (rescue_a, rescue_b) = (rescue(SiteLetter::A), rescue(SiteLetter::B));
    let rescue_a_position = rescue_a.and_then(HostageRescued::position);
    let rescue_b_position = rescue_b.and_then(HostageRescued::position);

    RoundsStats {
        round,
        half: half.as_str().to_string(),
        overtime,
        length: official.length,
        winners: official.winner.as_str().to_string(),
        win_method: official.reason.win_method().unwrap_or("Unknown").to_string(),
        bombsite_planted_at: bombsite.map(|site| site.to_string()),
        bomb_plant_position_x: plant_position.map(|p| p.x),
        bomb_plant_position_y: plant_position.map(|p| p.y),
        bomb_plant_position_z: plant_position.map(|p| p.z),
        bombsite_error_message: notes.bombsite(round).map(str::to_string),
        picked_up_hostage_a: picked_up_a,
        picked_up_hostage_b: picked_up_b,
        picked_up_all_hostages: picked_up_a && picked_up_b,
        hostage_a_picked_up_error_message: notes.hostage_pickup(round, SiteLetter::A).map(str::to_string),
        hostage_b_picked_up_error_message: notes.hostage_pickup(round, SiteLetter::B).map(str::to_string),
        rescued_hostage_a: rescue_a.is_some(),
        rescued_hostage_b: rescue_b.is_some(),
        rescued_all_hostages: rescue_a.is_some() && rescue_b.is_some(),
        rescued_hostage_a_position_x: rescue_a_position.map(|p| p.x),
        rescued_hostage_a_position_y: rescue_a_position.map(|p| p.y),
        rescued_hostage_a_position_z: rescue_a_position.map(|p| p.z),
        rescued_hostage_b_position_x: rescue_b_position.map(|p| p.x),
        rescued_hostage_b_position_y: rescue_b_position.map(|p| p.y),
        rescued_hostage_b_position_z: rescue_b_position.map(|p| p.z),
        time_in_round_planted: plant.map(|p| p.time_in_round),
        time_in_round_exploded: explosion.map(|e| e.time_in_round),
        time_in_round_defused: defuse.map(|d| d.time_in_round),
        time_in_round_rescued_hostage_a: rescue_a.map(|r| r.time_in_round),
        time_in_round_rescued_hostage_b: rescue_b.map(|r| r.time_in_round),
        team_alpha_player_count: players(alpha),
        team_beta_player_count: players(beta),
        team_alpha_equip_value: equip_value(alpha),
        team_beta_equip_value: equip_value(beta),
        team_alpha_expenditure: expenditure(alpha),
        team_beta_expenditure: expenditure(beta),
    }
}
