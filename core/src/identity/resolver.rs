use hashbrown::HashMap;

use super::duplicate::{DuplicateDetector, NameMatch};
use super::redirect::Redirects;
use crate::demo_event::PlayerSnapshot;
use crate::ticks::{TickCounter, TickStatus};

/// Unifies volatile connection ids with stable account ids across reconnects.
#[derive(Debug)]
pub struct PlayerIdentityResolver {
    ticks: HashMap<i32, TickCounter>,
    lookups: HashMap<i32, i64>,
    redirects: Redirects,
    detector: Box<dyn DuplicateDetector>,
}

impl Default for PlayerIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerIdentityResolver {
    pub fn new() -> Self {
        Self::with_detector(Box::new(NameMatch))
    }

    pub fn with_detector(detector: Box<dyn DuplicateDetector>) -> Self {
        Self {
            ticks: HashMap::new(),
            lookups: HashMap::new(),
            redirects: Redirects::new(),
            detector,
        }
    }

    /// Register the identity carried by an event.
    ///
    /// Returns false for sentinel pseudo-players, which are never tracked.
    pub fn bind(&mut self, player: &PlayerSnapshot) -> bool {
        if player.is_sentinel() {
            return false;
        }

        let user_id = player.user_id;
        let mut retired_by_ticks = None;

        if !self.ticks.contains_key(&user_id) {
            match self.detector.find_duplicate(player, &self.ticks) {
                Some(old_id) => {
                    let carried = self.ticks.get(&old_id).cloned().unwrap_or_default();
                    self.ticks.insert(user_id, carried);
                    retired_by_ticks = Some(old_id);
                    tracing::debug!(old_id, new_id = user_id, name = %player.name, "Reconnect detected");
                }
                None => {
                    // A reused id belongs to the new player, not its old target
                    if let Some(stale) = self.redirects.unlink(user_id) {
                        tracing::debug!(user_id, stale, name = %player.name, "Connection id reused");
                    }
                    self.ticks.insert(user_id, TickCounter::new(&player.name));
                }
            }
        }

        let mut retired_by_lookup = None;

        if !self.lookups.contains_key(&user_id) {
            // One live connection per account: an older id holding this account is retired
            let duplicate = self
                .connection_for_account(player.steam_id)
                .or_else(|| retired_by_ticks.filter(|id| self.lookups.contains_key(id)));

            if player.steam_id != 0 {
                self.lookups.insert(user_id, player.steam_id);
            } else if let Some(account) = duplicate.and_then(|id| self.lookups.get(&id).copied()) {
                self.lookups.insert(user_id, account);
            }

            retired_by_lookup = duplicate;
        }

        if let Some(old_id) = retired_by_ticks {
            self.ticks.remove(&old_id);
        }
        if let Some(old_id) = retired_by_lookup {
            self.lookups.remove(&old_id);
        }

        if let Some(retired) = retired_by_lookup.or(retired_by_ticks) {
            self.redirects.link(retired, user_id);
        }

        true
    }

    /// Bind, then advance one counter for the player's current connection id
    pub fn record_tick(&mut self, player: &PlayerSnapshot, status: TickStatus) {
        if self.bind(player)
            && let Some(counter) = self.ticks.get_mut(&player.user_id)
        {
            counter.increment(status);
        }
    }

    // --- Lookups ---

    /// Final connection id after following every redirect
    pub fn resolve(&self, user_id: i32) -> i32 {
        self.redirects.resolve(user_id)
    }

    /// Account id for a connection id, after redirect resolution
    pub fn account_id(&self, user_id: i32) -> Option<i64> {
        self.lookups.get(&self.resolve(user_id)).copied()
    }

    /// Account id for an event's player, falling back to the snapshot's own id
    pub fn account_for(&self, player: &PlayerSnapshot) -> i64 {
        self.account_id(player.user_id).unwrap_or(player.steam_id)
    }

    /// Account id of the tracked connection first seen under `name`
    pub fn account_for_name(&self, name: &str) -> Option<i64> {
        self.ticks
            .iter()
            .filter(|(_, counter)| counter.detected_name == name)
            .map(|(id, _)| *id)
            .min()
            .and_then(|id| self.lookups.get(&id).copied())
    }

    pub fn ticks(&self, user_id: i32) -> Option<&TickCounter> {
        self.ticks.get(&self.resolve(user_id))
    }

    /// Counters of the live connection mapped to an account
    pub fn ticks_for_account(&self, steam_id: i64) -> Option<&TickCounter> {
        self.connection_for_account(steam_id)
            .and_then(|id| self.ticks.get(&id))
    }

    pub fn is_known_account(&self, steam_id: i64) -> bool {
        steam_id != 0 && self.lookups.values().any(|s| *s == steam_id)
    }

    pub fn redirects(&self) -> &Redirects {
        &self.redirects
    }

    pub fn tracked_count(&self) -> usize {
        self.ticks.len()
    }

    fn connection_for_account(&self, steam_id: i64) -> Option<i32> {
        if steam_id == 0 {
            return None;
        }
        self.lookups
            .iter()
            .filter(|(_, account)| **account == steam_id)
            .map(|(id, _)| *id)
            .min()
    }
}
