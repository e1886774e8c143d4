use demostats_types::{GrenadesSpecificStats, GrenadesTotalStats};

use super::StatsAggregator;
use crate::demo_event::{EquipmentElement, NadeThrow};
use crate::timeline::EventTimeline;

impl StatsAggregator<'_> {
    /// Totals per grenade type in first-seen order, then one row per grenade
    pub(super) fn grenade_stats(
        &self,
        timeline: &EventTimeline,
    ) -> (Vec<GrenadesTotalStats>, Vec<GrenadesSpecificStats>) {
        let mut groups: Vec<(EquipmentElement, Vec<&NadeThrow>)> = Vec::new();
        for nade in timeline.records::<NadeThrow>().filter(|n| n.nade_type.is_grenade()) {
            match groups.iter_mut().find(|(kind, _)| *kind == nade.nade_type) {
                Some((_, nades)) => nades.push(nade),
                None => groups.push((nade.nade_type, vec![nade])),
            }
        }

        let totals = groups
            .iter()
            .map(|(kind, nades)| GrenadesTotalStats {
                nade_type: kind.to_string(),
                amount_used: nades.len() as i32,
            })
            .collect();

        let specific = groups
            .iter()
            .flat_map(|(_, nades)| nades.iter())
            .map(|nade| GrenadesSpecificStats {
                nade_type: nade.nade_type.to_string(),
                steam_id: nade.thrown_by.as_ref().map_or(0, |p| self.account(p)),
                x_position: nade.position.x,
                y_position: nade.position.y,
                z_position: nade.position.z,
                num_players_flashed: (nade.nade_type == EquipmentElement::Flash)
                    .then(|| nade.flashed_players.len() as i32),
            })
            .collect();

        (totals, specific)
    }
}
