use super::equipment::{Equipment, EquipmentElement};
use super::player::{PlayerSnapshot, Team, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitGroup {
    #[default]
    Generic,
    Head,
    Chest,
    Stomach,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Gear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerKilled {
    /// Assigned on ingest
    pub round: i32,
    pub time_in_round: f64,
    pub killer: Option<PlayerSnapshot>,
    pub victim: Option<PlayerSnapshot>,
    pub assister: Option<PlayerSnapshot>,
    pub weapon: Equipment,
    pub headshot: bool,
    pub suicide: bool,
    pub team_kill: bool,
    pub assisted_flash: bool,
    pub killer_bot_takeover: bool,
    pub victim_bot_takeover: bool,
    pub assister_bot_takeover: bool,
    pub penetrated_objects: i32,
}

impl PlayerKilled {
    pub fn killer_steam_id(&self) -> Option<i64> {
        self.killer.as_ref().map(|p| p.steam_id)
    }

    pub fn victim_steam_id(&self) -> Option<i64> {
        self.victim.as_ref().map(|p| p.steam_id)
    }

    pub fn assister_steam_id(&self) -> Option<i64> {
        self.assister.as_ref().map(|p| p.steam_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerHurt {
    /// Assigned on ingest
    pub round: i32,
    pub time_in_round: f64,
    /// The player who took damage
    pub player: Option<PlayerSnapshot>,
    pub attacker: Option<PlayerSnapshot>,
    pub health: i32,
    pub armor: i32,
    pub weapon: Equipment,
    pub health_damage: i32,
    pub armor_damage: i32,
    pub hitgroup: HitGroup,
    /// Engine hint that this damage came from the bomb and was lethal
    pub possibly_killed_by_bomb_explosion: bool,
}

impl PlayerHurt {
    /// Kill record for lethal bomb damage the engine never reported as a death
    pub fn to_bomb_kill(&self) -> PlayerKilled {
        PlayerKilled {
            round: self.round,
            time_in_round: self.time_in_round,
            killer: self.attacker.clone(),
            victim: self.player.clone(),
            assister: None,
            weapon: self.weapon.clone(),
            penetrated_objects: 0,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundMvp {
    pub player: Option<PlayerSnapshot>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisconnectedPlayer {
    /// Last round the player took part in
    pub round: i32,
    pub player: PlayerSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotFired {
    pub round: i32,
    pub time_in_round: f64,
    pub shooter: Option<PlayerSnapshot>,
    pub team_side: Team,
    pub weapon: Equipment,
}

/// The five grenade lifecycle notifications the decoder emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NadeKind {
    Fire,
    Smoke,
    Flash,
    Decoy,
    Explosive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NadeThrow {
    pub kind: NadeKind,
    pub nade_type: EquipmentElement,
    pub time_in_round: f64,
    pub thrown_by: Option<PlayerSnapshot>,
    pub position: Vector,
    /// Only populated for flashbangs
    pub flashed_players: Vec<PlayerSnapshot>,
}

impl NadeThrow {
    pub fn new(kind: NadeKind, nade_type: EquipmentElement, thrown_by: Option<PlayerSnapshot>, position: Vector) -> Self {
        Self {
            kind,
            nade_type,
            time_in_round: 0.0,
            thrown_by,
            position,
            flashed_players: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChickenKilled;
