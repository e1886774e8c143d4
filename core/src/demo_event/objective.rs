use std::fmt;

use super::player::{PlayerSnapshot, Vector};

/// Letter identity of a bombsite or hostage. Starts `Unresolved` when the
/// decoder could not match the trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiteLetter {
    A,
    B,
    #[default]
    Unresolved,
}

impl SiteLetter {
    pub fn as_char(&self) -> char {
        match self {
            SiteLetter::A => 'A',
            SiteLetter::B => 'B',
            SiteLetter::Unresolved => '?',
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SiteLetter::Unresolved)
    }
}

impl From<char> for SiteLetter {
    fn from(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'A' => SiteLetter::A,
            'B' => SiteLetter::B,
            _ => SiteLetter::Unresolved,
        }
    }
}

impl fmt::Display for SiteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BombPlanted {
    /// Assigned on ingest
    pub round: i32,
    pub time_in_round: f64,
    pub player: Option<PlayerSnapshot>,
    pub site: SiteLetter,
}

impl BombPlanted {
    /// Where the planter last stood alive
    pub fn position(&self) -> Option<Vector> {
        self.player.as_ref().and_then(|p| p.last_alive_position)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BombExploded {
    pub round: i32,
    pub time_in_round: f64,
    pub player: Option<PlayerSnapshot>,
    pub site: SiteLetter,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BombDefused {
    pub round: i32,
    pub time_in_round: f64,
    pub player: Option<PlayerSnapshot>,
    pub site: SiteLetter,
    pub has_kit: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostagePickedUp {
    pub round: i32,
    /// -1 when synthesized from a rescue
    pub time_in_round: f64,
    pub player: Option<PlayerSnapshot>,
    pub hostage: SiteLetter,
    pub hostage_index: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostageRescued {
    pub round: i32,
    pub time_in_round: f64,
    pub player: Option<PlayerSnapshot>,
    pub hostage: SiteLetter,
    pub hostage_index: i32,
    pub rescue_zone: i32,
}

impl HostageRescued {
    pub fn position(&self) -> Option<Vector> {
        self.player.as_ref().and_then(|p| p.last_alive_position)
    }

    /// Pickup assumed to have happened before this rescue; its time is unknown
    pub fn assumed_pickup(&self) -> HostagePickedUp {
        HostagePickedUp {
            round: self.round,
            time_in_round: -1.0,
            player: self.player.clone(),
            hostage: self.hostage,
            hostage_index: self.hostage_index,
        }
    }
}
