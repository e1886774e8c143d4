use demostats_types::{KillsStats, PlayerStats};
use hashbrown::{HashMap, HashSet};

use super::StatsAggregator;
use crate::demo_event::{
    BombDefused, BombPlanted, EquipmentElement, HostageRescued, PlayerKilled, PlayerSnapshot,
    RoundMvp, ShotFired,
};
use crate::timeline::EventTimeline;

/// Raw counters for one account. `*_as_bot` counts actions taken while a bot
/// stood in for the player; they are excluded from headline numbers.
#[derive(Debug, Default)]
struct Tally {
    name: String,
    kills: i64,
    kills_as_bot: i64,
    deaths: i64,
    deaths_as_bot: i64,
    headshots: i64,
    headshots_as_bot: i64,
    assists: i64,
    assists_as_bot: i64,
    mvps: i64,
    shots: i64,
    plants: i64,
    defuses: i64,
    rescues: i64,
}

/// Tallies keyed by account id, in first-seen order
#[derive(Debug, Default)]
struct Tallies {
    order: Vec<i64>,
    by_account: HashMap<i64, Tally>,
}

impl Tallies {
    fn entry(&mut self, account: i64, name: &str) -> Option<&mut Tally> {
        if account == 0 {
            return None;
        }
        if !self.by_account.contains_key(&account) {
            self.order.push(account);
        }
        Some(self.by_account.entry(account).or_insert_with(|| Tally {
            name: name.to_string(),
            ..Default::default()
        }))
    }
}

impl StatsAggregator<'_> {
    /// Tally for an event's player; sentinels and unidentified players are skipped
    fn tally_for<'t>(&self, tallies: &'t mut Tallies, player: Option<&PlayerSnapshot>) -> Option<&'t mut Tally> {
        let player = player.filter(|p| !p.is_sentinel())?;
        tallies.entry(self.account(player), &player.name)
    }

    pub(super) fn player_stats(&self, timeline: &EventTimeline) -> Vec<PlayerStats> {
        let mut tallies = Tallies::default();

        for kill in timeline.records::<PlayerKilled>() {
            if let Some(tally) = self.tally_for(&mut tallies, kill.killer.as_ref()) {
                // A suicide cancels its kill; a team kill costs one more
                let mut credit = 1;
                if kill.suicide {
                    credit -= 1;
                }
                if kill.team_kill {
                    credit -= 2;
                }
                tally.kills += credit;
                if kill.killer_bot_takeover {
                    tally.kills_as_bot += credit;
                }
                if kill.headshot {
                    tally.headshots += 1;
                    if kill.killer_bot_takeover {
                        tally.headshots_as_bot += 1;
                    }
                }
            }
            if let Some(tally) = self.tally_for(&mut tallies, kill.victim.as_ref()) {
                tally.deaths += 1;
                if kill.victim_bot_takeover {
                    tally.deaths_as_bot += 1;
                }
            }
            if let Some(tally) = self.tally_for(&mut tallies, kill.assister.as_ref()) {
                tally.assists += 1;
                if kill.assister_bot_takeover {
                    tally.assists_as_bot += 1;
                }
            }
        }

        for mvp in timeline.records::<RoundMvp>() {
            if let Some(tally) = self.tally_for(&mut tallies, mvp.player.as_ref()) {
                tally.mvps += 1;
            }
        }
        for shot in timeline.records::<ShotFired>() {
            if let Some(tally) = self.tally_for(&mut tallies, shot.shooter.as_ref()) {
                tally.shots += 1;
            }
        }
        for plant in timeline.records::<BombPlanted>() {
            if let Some(tally) = self.tally_for(&mut tallies, plant.player.as_ref()) {
                tally.plants += 1;
            }
        }
        for defuse in timeline.records::<BombDefused>() {
            if let Some(tally) = self.tally_for(&mut tallies, defuse.player.as_ref()) {
                tally.defuses += 1;
            }
        }
        for rescue in timeline.records::<HostageRescued>() {
            if let Some(tally) = self.tally_for(&mut tallies, rescue.player.as_ref()) {
                tally.rescues += 1;
            }
        }

        let Tallies { order, mut by_account } = tallies;
        order
            .into_iter()
            .filter_map(|account| {
                let tally = by_account.remove(&account)?;
                let ticks = self.identities.ticks_for_account(account).cloned().unwrap_or_default();
                Some(PlayerStats {
                    player_name: tally.name,
                    steam_id: account,
                    kills: tally.kills - tally.kills_as_bot,
                    kills_including_bots: tally.kills,
                    deaths: tally.deaths - tally.deaths_as_bot,
                    deaths_including_bots: tally.deaths,
                    headshots: tally.headshots - tally.headshots_as_bot,
                    headshots_including_bots: tally.headshots,
                    assists: tally.assists - tally.assists_as_bot,
                    assists_including_bots: tally.assists,
                    mvps: tally.mvps,
                    shots: tally.shots,
                    plants: tally.plants,
                    defuses: tally.defuses,
                    rescues: tally.rescues,
                    ticks_alive: ticks.ticks_alive,
                    ticks_on_server: ticks.ticks_on_server,
                    ticks_playing: ticks.ticks_playing,
                })
            })
            .collect()
    }

    /// One row per kill with a known victim
    pub(super) fn kills_stats(&self, timeline: &EventTimeline) -> Vec<KillsStats> {
        let mut opened_rounds = HashSet::new();

        timeline
            .records::<PlayerKilled>()
            .filter_map(|kill| {
                let victim = kill.victim.as_ref()?;
                let death_position = victim.last_alive_position.unwrap_or(victim.position);
                let kill_position = kill
                    .killer
                    .as_ref()
                    .map(|k| k.last_alive_position.unwrap_or(k.position))
                    .unwrap_or_default();

                let (weapon_class, weapon_type) = if kill.weapon.weapon == EquipmentElement::Unknown {
                    ("Unknown".to_string(), "Unknown".to_string())
                } else {
                    (kill.weapon.class.to_string(), kill.weapon.subclass_name.clone())
                };

                Some(KillsStats {
                    round: kill.round,
                    time_in_round: kill.time_in_round,
                    weapon: kill.weapon.display_name(),
                    weapon_class,
                    weapon_type,
                    killer_steam_id: kill.killer.as_ref().map_or(0, |p| self.account(p)),
                    killer_bot_takeover: kill.killer_bot_takeover,
                    x_position_kill: kill_position.x,
                    y_position_kill: kill_position.y,
                    z_position_kill: kill_position.z,
                    victim_steam_id: self.account(victim),
                    victim_bot_takeover: kill.victim_bot_takeover,
                    x_position_death: death_position.x,
                    y_position_death: death_position.y,
                    z_position_death: death_position.z,
                    assister_steam_id: kill.assister.as_ref().map_or(0, |p| self.account(p)),
                    assister_bot_takeover: kill.assister_bot_takeover,
                    first_kill_of_the_round: opened_rounds.insert(kill.round),
                    suicide: kill.suicide,
                    team_kill: kill.team_kill,
                    penetrations_count: kill.penetrated_objects,
                    headshot: kill.headshot,
                    assisted_flash: kill.assisted_flash,
                })
            })
            .collect()
    }
}
