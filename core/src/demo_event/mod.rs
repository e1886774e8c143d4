//! Event model pushed by the external replay decoder.
//!
//! One [`DemoEvent`] is delivered per observed occurrence, in simulation order.
//! Payload structs double as the stored records in the timeline; fields marked
//! "assigned on ingest" are filled in by the session, not the decoder.

mod chat;
mod combat;
pub mod equipment;
mod objective;
mod player;
mod round;

pub use chat::{FeedbackMessage, PlayerPositionSample, is_feedback_message};
pub use combat::{
    ChickenKilled, DisconnectedPlayer, HitGroup, NadeKind, NadeThrow, PlayerHurt, PlayerKilled,
    RoundMvp, ShotFired,
};
pub use equipment::{Equipment, EquipmentClass, EquipmentElement};
pub use objective::{
    BombDefused, BombExploded, BombPlanted, HostagePickedUp, HostageRescued, SiteLetter,
};
pub use player::{PlayerSnapshot, SPECTATOR_PROXY_NAME, Team, UNCONNECTED_NAME, Vector};
pub use round::{
    FreezetimeEnded, MatchStarted, RoundEndReason, RoundEnded, RoundOfficiallyEnded, SwitchSides,
    TeamEquipment, TeamRoster,
};

/// Every notification the decoder can deliver
#[derive(Debug, Clone, PartialEq)]
pub enum DemoEvent {
    MatchStarted(MatchStarted),
    /// A participant connected or had its identity refreshed
    PlayerBind(PlayerSnapshot),
    PlayerDisconnected(PlayerSnapshot),
    RoundEnded(RoundEnded),
    RoundOfficiallyEnded(RoundOfficiallyEnded),
    FreezetimeEnded {
        time_end: f64,
        /// Players on a side at the moment freezetime ended
        participants: Vec<PlayerSnapshot>,
    },
    SwitchSides,
    PlayerKilled(PlayerKilled),
    PlayerHurt(PlayerHurt),
    RoundMvp(RoundMvp),
    BombPlanted(BombPlanted),
    BombExploded(BombExploded),
    BombDefused(BombDefused),
    HostagePickedUp(HostagePickedUp),
    HostageRescued(HostageRescued),
    WeaponFired {
        time_in_round: f64,
        shooter: Option<PlayerSnapshot>,
        weapon: Equipment,
    },
    Nade(NadeThrow),
    /// End of a simulation tick; carries every connected participant
    TickDone {
        participants: Vec<PlayerSnapshot>,
    },
    ChatMessage {
        sender: Option<PlayerSnapshot>,
        text: String,
        current_time: f64,
    },
    PlayerPositions {
        current_time: f64,
        players: Vec<PlayerSnapshot>,
    },
    ChickenKilled,
}

impl DemoEvent {
    /// Every participant snapshot the event carries
    pub fn players(&self) -> Vec<&PlayerSnapshot> {
        match self {
            DemoEvent::PlayerBind(player) | DemoEvent::PlayerDisconnected(player) => vec![player],
            DemoEvent::PlayerKilled(kill) => [&kill.killer, &kill.victim, &kill.assister]
                .into_iter()
                .flatten()
                .collect(),
            DemoEvent::PlayerHurt(hurt) => [&hurt.player, &hurt.attacker].into_iter().flatten().collect(),
            DemoEvent::RoundMvp(RoundMvp { player, .. })
            | DemoEvent::BombPlanted(BombPlanted { player, .. })
            | DemoEvent::BombExploded(BombExploded { player, .. })
            | DemoEvent::BombDefused(BombDefused { player, .. })
            | DemoEvent::HostagePickedUp(HostagePickedUp { player, .. })
            | DemoEvent::HostageRescued(HostageRescued { player, .. })
            | DemoEvent::WeaponFired { shooter: player, .. }
            | DemoEvent::Nade(NadeThrow { thrown_by: player, .. })
            | DemoEvent::ChatMessage { sender: player, .. } => player.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Short name for log fields
    pub fn name(&self) -> &'static str {
        match self {
            DemoEvent::MatchStarted(_) => "MatchStarted",
            DemoEvent::PlayerBind(_) => "PlayerBind",
            DemoEvent::PlayerDisconnected(_) => "PlayerDisconnected",
            DemoEvent::RoundEnded(_) => "RoundEnded",
            DemoEvent::RoundOfficiallyEnded(_) => "RoundOfficiallyEnded",
            DemoEvent::FreezetimeEnded { .. } => "FreezetimeEnded",
            DemoEvent::SwitchSides => "SwitchSides",
            DemoEvent::PlayerKilled(_) => "PlayerKilled",
            DemoEvent::PlayerHurt(_) => "PlayerHurt",
            DemoEvent::RoundMvp(_) => "RoundMvp",
            DemoEvent::BombPlanted(_) => "BombPlanted",
            DemoEvent::BombExploded(_) => "BombExploded",
            DemoEvent::BombDefused(_) => "BombDefused",
            DemoEvent::HostagePickedUp(_) => "HostagePickedUp",
            DemoEvent::HostageRescued(_) => "HostageRescued",
            DemoEvent::WeaponFired { .. } => "WeaponFired",
            DemoEvent::Nade(_) => "Nade",
            DemoEvent::TickDone { .. } => "TickDone",
            DemoEvent::ChatMessage { .. } => "ChatMessage",
            DemoEvent::PlayerPositions { .. } => "PlayerPositions",
            DemoEvent::ChickenKilled => "ChickenKilled",
        }
    }
}
