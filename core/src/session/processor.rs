use super::{MatchSession, SessionStatus};
use crate::demo_event::{
    ChickenKilled, DemoEvent, DisconnectedPlayer, FeedbackMessage, FreezetimeEnded, PlayerKilled,
    PlayerPositionSample, PlayerSnapshot, ShotFired, SwitchSides, is_feedback_message,
};
use crate::rounds::RoundFlow;
use crate::timeline::EventKind;

/// What the session did with one delivered event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// Filtered out, or delivered after the session stopped accepting events
    Discarded,
    /// This event ended the match; everything after it is discarded
    Halted,
}

impl MatchSession {
    /// Apply one decoder event. Synthesized lifecycle events are stored before this returns.
    pub fn process_event(&mut self, event: DemoEvent) -> EventOutcome {
        if !self.status.is_running() {
            tracing::trace!(event = event.name(), status = ?self.status, "Discarding event after termination");
            self.events_discarded += 1;
            return EventOutcome::Discarded;
        }

        for player in event.players() {
            self.identities.bind(player);
        }

        let outcome = match event {
            // ═══════════════════════════════════════════════════════════════════════
            // Match & round lifecycle
            // ═══════════════════════════════════════════════════════════════════════
            DemoEvent::MatchStarted(started) => {
                self.reconstructor.on_match_started(&mut self.timeline, started);
                EventOutcome::Applied
            }
            DemoEvent::RoundEnded(ended) => {
                self.reconstructor
                    .on_round_ended(&mut self.timeline, &self.participants, ended);
                EventOutcome::Applied
            }
            DemoEvent::RoundOfficiallyEnded(official) => {
                self.reconstructor
                    .on_round_officially_ended(&mut self.timeline, &self.participants, official);
                EventOutcome::Applied
            }
            DemoEvent::FreezetimeEnded { time_end, participants } => {
                self.participants = participants;
                let flow = self.reconstructor.on_freezetime_ended(
                    &mut self.timeline,
                    &self.participants,
                    FreezetimeEnded { time_end },
                );
                match flow {
                    RoundFlow::Continue => EventOutcome::Applied,
                    RoundFlow::Halt => EventOutcome::Halted,
                }
            }
            DemoEvent::SwitchSides => {
                // Phase end fires before the round's official end
                let round_before_switch = self.rounds_officially_ended() + 1;
                self.timeline.push(SwitchSides { round_before_switch });
                EventOutcome::Applied
            }

            // ═══════════════════════════════════════════════════════════════════════
            // Participants
            // ═══════════════════════════════════════════════════════════════════════
            DemoEvent::PlayerBind(_) => EventOutcome::Applied,
            DemoEvent::PlayerDisconnected(player) => {
                if player.is_sentinel() {
                    EventOutcome::Discarded
                } else {
                    let round = self.current_round() - 1;
                    self.timeline.push(DisconnectedPlayer { round, player });
                    EventOutcome::Applied
                }
            }
            DemoEvent::TickDone { participants } => {
                self.ticks.on_tick_done(&mut self.identities, &participants);
                self.participants = participants;
                EventOutcome::Applied
            }

            // ═══════════════════════════════════════════════════════════════════════
            // Combat
            // ═══════════════════════════════════════════════════════════════════════
            DemoEvent::PlayerKilled(mut kill) => {
                kill.round = self.current_round();
                self.timeline.push(kill);
                EventOutcome::Applied
            }
            DemoEvent::PlayerHurt(mut hurt) => {
                hurt.round = self.current_round();
                // The engine sends no death event for a bomb kill
                if hurt.possibly_killed_by_bomb_explosion
                    && let Some(victim) = &hurt.player
                    && !self.has_died_in_round(victim, hurt.round)
                {
                    tracing::debug!(round = hurt.round, victim = %victim.name, "Synthesizing bomb kill");
                    self.timeline.push(hurt.to_bomb_kill());
                }
                self.timeline.push(hurt);
                EventOutcome::Applied
            }
            DemoEvent::RoundMvp(mvp) => {
                self.timeline.push(mvp);
                EventOutcome::Applied
            }
            DemoEvent::WeaponFired {
                time_in_round,
                shooter,
                weapon,
            } => {
                let team_side = shooter.as_ref().map(|p| p.team).unwrap_or_default();
                self.timeline.push(ShotFired {
                    round: self.current_round(),
                    time_in_round,
                    shooter,
                    team_side,
                    weapon,
                });
                EventOutcome::Applied
            }
            DemoEvent::Nade(nade) => {
                self.timeline.push(nade);
                EventOutcome::Applied
            }

            // ═══════════════════════════════════════════════════════════════════════
            // Objectives (tagged with the round in progress, warmup included)
            // ═══════════════════════════════════════════════════════════════════════
            DemoEvent::BombPlanted(mut plant) => {
                plant.round = self.rounds_officially_ended() + 1;
                self.timeline.push(plant);
                EventOutcome::Applied
            }
            DemoEvent::BombExploded(mut explosion) => {
                explosion.round = self.rounds_officially_ended() + 1;
                self.timeline.push(explosion);
                EventOutcome::Applied
            }
            DemoEvent::BombDefused(mut defuse) => {
                defuse.round = self.rounds_officially_ended() + 1;
                if let Some(player) = &defuse.player {
                    defuse.has_kit = player.has_defuse_kit;
                }
                self.timeline.push(defuse);
                EventOutcome::Applied
            }
            DemoEvent::HostagePickedUp(mut pickup) => {
                pickup.round = self.rounds_officially_ended() + 1;
                self.timeline.push(pickup);
                EventOutcome::Applied
            }
            DemoEvent::HostageRescued(mut rescue) => {
                rescue.round = self.rounds_officially_ended() + 1;
                self.timeline.push(rescue);
                EventOutcome::Applied
            }

            // ═══════════════════════════════════════════════════════════════════════
            // Sampling & chatter
            // ═══════════════════════════════════════════════════════════════════════
            DemoEvent::ChatMessage {
                sender,
                text,
                current_time,
            } => self.handle_chat(sender, text, current_time),
            DemoEvent::PlayerPositions { current_time, players } => {
                self.handle_positions(current_time, &players)
            }
            DemoEvent::ChickenKilled => {
                if self.config.parse_chickens {
                    self.timeline.push(ChickenKilled);
                    EventOutcome::Applied
                } else {
                    EventOutcome::Discarded
                }
            }
        };

        match outcome {
            EventOutcome::Applied => self.events_applied += 1,
            EventOutcome::Discarded => self.events_discarded += 1,
            EventOutcome::Halted => {
                self.events_applied += 1;
                self.status = SessionStatus::Halted;
            }
        }
        outcome
    }

    fn handle_chat(&mut self, sender: Option<PlayerSnapshot>, text: String, current_time: f64) -> EventOutcome {
        if !is_feedback_message(&text) {
            return EventOutcome::Discarded;
        }

        // Zero while in freezetime
        let time_in_round = if self.timeline.count(EventKind::FreezetimeEnded) > self.rounds_officially_ended() as usize {
            self.timeline
                .last::<FreezetimeEnded>()
                .map_or(0.0, |freeze| current_time - freeze.time_end)
        } else {
            0.0
        };

        let message = match &sender {
            Some(player) => FeedbackMessage {
                round: self.current_round(),
                steam_id: player.steam_id,
                sender_name: player.name.clone(),
                team_name: Some(player.team.feedback_name().to_string()),
                position: player.position,
                last_alive_position: player.last_alive_position.filter(|_| player.is_alive),
                view_x: player.view_direction_x,
                view_y: player.view_direction_y,
                set_pos_command: player.setpos_command(),
                time_in_round,
                message: text,
            },
            None => FeedbackMessage {
                round: self.current_round(),
                time_in_round,
                message: text,
                ..Default::default()
            },
        };

        tracing::debug!(round = message.round, steam_id = message.steam_id, "Feedback message");
        self.timeline.push(message);
        EventOutcome::Applied
    }

    fn handle_positions(&mut self, current_time: f64, players: &[PlayerSnapshot]) -> EventOutcome {
        if !self.config.parse_player_positions {
            return EventOutcome::Discarded;
        }
        let Some(freeze) = self.timeline.last::<FreezetimeEnded>().copied() else {
            return EventOutcome::Discarded;
        };

        let round = self.current_round();
        let freezetime_ended_this_round = self.timeline.count(EventKind::FreezetimeEnded) >= round.max(0) as usize;
        if round <= 0 || !freezetime_ended_this_round {
            return EventOutcome::Discarded;
        }

        let samples: Vec<PlayerPositionSample> = players
            .iter()
            .filter(|p| p.steam_id > 0 && p.team.is_playing() && !self.has_died_in_round(p, round))
            .map(|p| PlayerPositionSample {
                round,
                time_in_round: current_time as i32 - freeze.time_end as i32,
                team_side: p.team.side_tag().to_string(),
                steam_id: p.steam_id,
                position: p.position,
            })
            .collect();

        if samples.is_empty() {
            return EventOutcome::Discarded;
        }
        for sample in samples {
            self.timeline.push(sample);
        }
        EventOutcome::Applied
    }

    // --- Helpers ---

    fn rounds_officially_ended(&self) -> i32 {
        self.timeline.count(EventKind::RoundOfficiallyEnded) as i32
    }

    /// A kill in `round` already names this player as the victim
    fn has_died_in_round(&self, player: &PlayerSnapshot, round: i32) -> bool {
        let connection = self.identities.resolve(player.user_id);
        self.timeline
            .records::<PlayerKilled>()
            .filter(|kill| kill.round == round)
            .filter_map(|kill| kill.victim.as_ref())
            .any(|victim| {
                (player.steam_id != 0 && victim.steam_id == player.steam_id)
                    || self.identities.resolve(victim.user_id) == connection
            })
    }
}
