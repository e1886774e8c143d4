use demostats_types::TeamStats;
use hashbrown::HashSet;

use super::{SideAlternation, StatsAggregator};
use crate::demo_event::{PlayerKilled, PlayerSnapshot, ShotFired, TeamRoster};
use crate::timeline::EventTimeline;

/// Per-round counters for one alternation-normalized team
#[derive(Debug, Default, PartialEq)]
struct SideTally {
    kills: i32,
    deaths: i32,
    assists: i32,
    flash_assists: i32,
    headshots: i32,
    teamkills: i32,
    suicides: i32,
    wallbang_kills: i32,
    wallbangs_total: i32,
    wallbangs_most: i32,
    shots_fired: i32,
}

impl StatsAggregator<'_> {
    pub(super) fn team_stats(&self, timeline: &EventTimeline, alternation: &SideAlternation) -> Vec<TeamStats> {
        let last_round = Self::rounds_officially_ended(timeline);
        let mut seen = HashSet::new();

        timeline
            .records::<TeamRoster>()
            .filter(|roster| roster.round >= 1 && roster.round <= last_round)
            .filter(|roster| seen.insert(roster.round))
            .map(|roster| self.team_row(timeline, alternation, roster))
            .collect()
    }

    fn team_row(&self, timeline: &EventTimeline, alternation: &SideAlternation, roster: &TeamRoster) -> TeamStats {
        let round = roster.round;
        let (alpha_side, bravo_side) = alternation.sides((round - 1) as usize);
        let alpha = self.members(roster.side(alpha_side));
        let bravo = self.members(roster.side(bravo_side));

        let kills: Vec<&PlayerKilled> = timeline
            .records::<PlayerKilled>()
            .filter(|k| k.round == round)
            .collect();
        let shots: Vec<&ShotFired> = timeline
            .records::<ShotFired>()
            .filter(|s| s.round == round)
            .collect();

        let a = self.tally_side(&alpha, &kills, &shots);
        let b = self.tally_side(&bravo, &kills, &shots);

        TeamStats {
            round,
            team_alpha: alpha,
            team_alpha_kills: a.kills - (a.teamkills + a.suicides),
            team_alpha_deaths: a.deaths,
            team_alpha_assists: a.assists,
            team_alpha_flash_assists: a.flash_assists,
            team_alpha_headshots: a.headshots,
            team_alpha_teamkills: a.teamkills,
            team_alpha_suicides: a.suicides,
            team_alpha_wallbang_kills: a.wallbang_kills,
            team_alpha_wallbangs_total_for_all_kills: a.wallbangs_total,
            team_alpha_wallbangs_most_in_one_kill: a.wallbangs_most,
            team_alpha_shots_fired: a.shots_fired,
            team_bravo: bravo,
            team_bravo_kills: b.kills - (b.teamkills + b.suicides),
            team_bravo_deaths: b.deaths,
            team_bravo_assists: b.assists,
            team_bravo_flash_assists: b.flash_assists,
            team_bravo_headshots: b.headshots,
            team_bravo_teamkills: b.teamkills,
            team_bravo_suicides: b.suicides,
            team_bravo_wallbang_kills: b.wallbang_kills,
            team_bravo_wallbangs_total_for_all_kills: b.wallbangs_total,
            team_bravo_wallbangs_most_in_one_kill: b.wallbangs_most,
            team_bravo_shots_fired: b.shots_fired,
        }
    }

    /// Account ids on one side. An oversized side drops members the resolver never saw.
    fn members(&self, players: &[PlayerSnapshot]) -> Vec<i64> {
        let mut members: Vec<i64> = players.iter().map(|p| self.account(p)).collect();

        if let Some(max) = self.config.test_type.max_players_per_side()
            && members.len() > max
        {
            let before = members.len();
            members.retain(|id| self.identities.is_known_account(*id));
            tracing::debug!(before, after = members.len(), max, "Dropped stray roster members");
        }
        members
    }

    fn tally_side(&self, members: &[i64], kills: &[&PlayerKilled], shots: &[&ShotFired]) -> SideTally {
        let on_side = |player: Option<&PlayerSnapshot>| -> Option<i64> {
            let account = self.account(player?);
            (account != 0 && members.contains(&account)).then_some(account)
        };

        let mut tally = SideTally::default();
        for kill in kills {
            let killer = on_side(kill.killer.as_ref());
            let victim = on_side(kill.victim.as_ref());

            if killer.is_some() {
                tally.kills += 1;
                if kill.headshot {
                    tally.headshots += 1;
                }
                if kill.penetrated_objects > 0 {
                    tally.wallbang_kills += 1;
                }
                tally.wallbangs_total += kill.penetrated_objects;
                tally.wallbangs_most = tally.wallbangs_most.max(kill.penetrated_objects);
            }
            if victim.is_some() {
                tally.deaths += 1;
            }
            if on_side(kill.assister.as_ref()).is_some() {
                tally.assists += 1;
                if kill.assisted_flash {
                    tally.flash_assists += 1;
                }
            }
            if let (Some(killer), Some(victim)) = (killer, victim)
                && killer != victim
            {
                tally.teamkills += 1;
            }
            if killer.is_some() && kill.victim.is_some() && kill.suicide {
                tally.suicides += 1;
            }
        }

        tally.shots_fired = shots
            .iter()
            .filter(|s| on_side(s.shooter.as_ref()).is_some())
            .count() as i32;
        tally
    }
}
