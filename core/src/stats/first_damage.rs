use demostats_types::{DamageGivenByPlayerInRound, FirstDamageStats};

use super::StatsAggregator;
use crate::demo_event::{EquipmentClass, EquipmentElement, PlayerHurt};
use crate::timeline::EventTimeline;

/// Gunfire only: no grenades, gear, bomb or world damage
fn is_weapon_damage(hurt: &PlayerHurt) -> bool {
    !matches!(
        hurt.weapon.class,
        EquipmentClass::Grenade | EquipmentClass::Equipment | EquipmentClass::Unknown
    ) && !matches!(
        hurt.weapon.weapon,
        EquipmentElement::Unknown | EquipmentElement::Bomb | EquipmentElement::World
    )
}

impl StatsAggregator<'_> {
    /// Earliest weapon damage each attacker dealt to another player, per finished round
    pub(super) fn first_damage_stats(&self, timeline: &EventTimeline) -> Vec<FirstDamageStats> {
        let last_round = Self::rounds_officially_ended(timeline);

        (1..=last_round)
            .filter(|round| timeline.records::<PlayerHurt>().any(|h| h.round == *round))
            .map(|round| FirstDamageStats {
                round,
                first_damage_to_enemy_by_players: self.first_damage_in_round(timeline, round),
            })
            .collect()
    }

    fn first_damage_in_round(&self, timeline: &EventTimeline, round: i32) -> Vec<DamageGivenByPlayerInRound> {
        let mut hits: Vec<(i64, &PlayerHurt)> = timeline
            .records::<PlayerHurt>()
            .filter(|h| h.round == round && is_weapon_damage(h))
            .filter_map(|hurt| {
                let attacker = self.account(hurt.attacker.as_ref()?);
                let victim = hurt.player.as_ref()?;
                (attacker != 0 && victim.steam_id != 0 && attacker != self.account(victim))
                    .then_some((attacker, hurt))
            })
            .collect();
        hits.sort_by(|a, b| a.1.time_in_round.total_cmp(&b.1.time_in_round));

        let mut seen = Vec::new();
        let mut rows = Vec::new();
        for (attacker, hurt) in hits {
            if seen.contains(&attacker) {
                continue;
            }
            seen.push(attacker);

            let (Some(shooter), Some(victim)) = (&hurt.attacker, &hurt.player) else {
                continue;
            };
            rows.push(DamageGivenByPlayerInRound {
                time_in_round: hurt.time_in_round,
                team_side_shooter: shooter.team.as_str().to_string(),
                steam_id_shooter: attacker,
                x_position_shooter: shooter.position.x,
                y_position_shooter: shooter.position.y,
                z_position_shooter: shooter.position.z,
                team_side_victim: victim.team.as_str().to_string(),
                steam_id_victim: self.account(victim),
                x_position_victim: victim.position.x,
                y_position_victim: victim.position.y,
                z_position_victim: victim.position.z,
                weapon: hurt.weapon.display_name(),
                weapon_class: hurt.weapon.class.to_string(),
                weapon_type: hurt.weapon.subclass_name.clone(),
            });
        }
        rows
    }
}
