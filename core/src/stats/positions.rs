use demostats_types::{PlayerPositionByRound, PlayerPositionBySteamId, PlayerPositionByTimeInRound};

use super::StatsAggregator;
use crate::demo_event::{PlayerKilled, PlayerPositionSample};
use crate::timeline::EventTimeline;

impl StatsAggregator<'_> {
    /// Samples grouped round -> time in round -> player, skipping anyone already dead
    pub(super) fn positions_by_round(&self, timeline: &EventTimeline) -> Vec<PlayerPositionByRound> {
        let last_round = Self::rounds_officially_ended(timeline);
        let mut rounds: Vec<PlayerPositionByRound> = Vec::new();

        for sample in timeline
            .records::<PlayerPositionSample>()
            .filter(|s| s.round > 0 && s.round <= last_round)
        {
            let by_round = match rounds.iter().position(|r| r.round == sample.round) {
                Some(i) => &mut rounds[i],
                None => {
                    rounds.push(PlayerPositionByRound {
                        round: sample.round,
                        ..Default::default()
                    });
                    let last = rounds.len() - 1;
                    &mut rounds[last]
                }
            };

            let times = &mut by_round.player_position_by_time_in_round;
            let by_time = match times.iter().position(|t| t.time_in_round == sample.time_in_round) {
                Some(i) => &mut times[i],
                None => {
                    times.push(PlayerPositionByTimeInRound {
                        time_in_round: sample.time_in_round,
                        ..Default::default()
                    });
                    let last = times.len() - 1;
                    &mut times[last]
                }
            };

            if !died_before(timeline, sample) {
                by_time.player_position_by_steam_id.push(PlayerPositionBySteamId {
                    steam_id: sample.steam_id,
                    team_side: sample.team_side.clone(),
                    x_position: sample.position.x as i32,
                    y_position: sample.position.y as i32,
                    z_position: sample.position.z as i32,
                });
            }
        }

        rounds
    }
}

/// The sampled player was killed at or before the sample's time in round
fn died_before(timeline: &EventTimeline, sample: &PlayerPositionSample) -> bool {
    timeline.records::<PlayerKilled>().any(|kill| {
        kill.round == sample.round
            && kill.time_in_round <= f64::from(sample.time_in_round)
            && kill
                .victim
                .as_ref()
                .is_some_and(|v| v.steam_id != 0 && v.steam_id == sample.steam_id)
    })
}
