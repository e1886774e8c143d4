//! Per-connection liveness counters, advanced once per simulation tick.

use crate::demo_event::PlayerSnapshot;
use crate::identity::PlayerIdentityResolver;

const MISSING_NAME: &str = "NOT FOUND";

/// Three monotonically increasing counters for one connection id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickCounter {
    /// Display name seen when the id was first bound; used for reconnect detection
    pub detected_name: String,
    pub ticks_alive: u64,
    pub ticks_on_server: u64,
    pub ticks_playing: u64,
}

impl TickCounter {
    pub fn new(name: &str) -> Self {
        let detected_name = if name.trim().is_empty() {
            MISSING_NAME.to_string()
        } else {
            name.to_string()
        };
        Self {
            detected_name,
            ..Default::default()
        }
    }

    pub fn increment(&mut self, status: TickStatus) {
        match status {
            TickStatus::Alive => self.ticks_alive += 1,
            TickStatus::OnServer => self.ticks_on_server += 1,
            TickStatus::Playing => self.ticks_playing += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Alive,
    OnServer,
    Playing,
}

/// Routes tick-completed notifications into the identity resolver's counters.
#[derive(Debug, Clone, Default)]
pub struct TickAccumulator {
    ticks_processed: u64,
}

impl TickAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playing participants gain a playing tick (and an alive tick when alive);
    /// every connected participant gains an on-server tick.
    pub fn on_tick_done(&mut self, identities: &mut PlayerIdentityResolver, participants: &[PlayerSnapshot]) {
        self.ticks_processed += 1;

        for player in participants.iter().filter(|p| p.is_playing()) {
            identities.record_tick(player, TickStatus::Playing);
            if player.is_alive {
                identities.record_tick(player, TickStatus::Alive);
            }
        }

        for player in participants.iter().filter(|p| !p.disconnected) {
            identities.record_tick(player, TickStatus::OnServer);
        }
    }

    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_event::Team;

    #[test]
    fn test_blank_name_is_flagged() {
        assert_eq!(TickCounter::new("  ").detected_name, "NOT FOUND");
        assert_eq!(TickCounter::new("JimWood").detected_name, "JimWood");
    }

    #[test]
    fn test_tick_increments_by_status() {
        let mut identities = PlayerIdentityResolver::new();
        let mut ticks = TickAccumulator::new();

        let alive = PlayerSnapshot::new(1, 100, "Alive", Team::Terrorist);
        let mut dead = PlayerSnapshot::new(2, 200, "Dead", Team::CounterTerrorist);
        dead.is_alive = false;
        let spectator = PlayerSnapshot::new(3, 300, "Watcher", Team::Spectate);
        let mut gone = PlayerSnapshot::new(4, 400, "Gone", Team::Spectate);
        gone.disconnected = true;

        let participants = vec![alive, dead, spectator, gone];
        ticks.on_tick_done(&mut identities, &participants);
        ticks.on_tick_done(&mut identities, &participants);

        let alive = identities.ticks(1).unwrap();
        assert_eq!((alive.ticks_playing, alive.ticks_alive, alive.ticks_on_server), (2, 2, 2));

        let dead = identities.ticks(2).unwrap();
        assert_eq!((dead.ticks_playing, dead.ticks_alive, dead.ticks_on_server), (2, 0, 2));

        let spectator = identities.ticks(3).unwrap();
        assert_eq!((spectator.ticks_playing, spectator.ticks_on_server), (0, 2));

        assert!(identities.ticks(4).is_none());
        assert_eq!(ticks.ticks_processed(), 2);
    }

    #[test]
    fn test_sentinels_never_accumulate() {
        let mut identities = PlayerIdentityResolver::new();
        let mut ticks = TickAccumulator::new();
        let proxy = PlayerSnapshot::new(9, 0, "GOTV", Team::Spectate);

        ticks.on_tick_done(&mut identities, &[proxy]);
        assert!(identities.ticks(9).is_none());
    }
}
