/// Placeholder name the engine gives a slot before a client finishes connecting
pub const UNCONNECTED_NAME: &str = "unconnected";
/// Name of the spectator relay proxy
pub const SPECTATOR_PROXY_NAME: &str = "GOTV";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    #[default]
    Spectate,
    Terrorist,
    CounterTerrorist,
    Unknown,
}

impl Team {
    /// Terrorist or CounterTerrorist
    pub fn is_playing(&self) -> bool {
        matches!(self, Team::Terrorist | Team::CounterTerrorist)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Spectate => "Spectate",
            Team::Terrorist => "Terrorist",
            Team::CounterTerrorist => "CounterTerrorist",
            Team::Unknown => "Unknown",
        }
    }

    /// Name used in feedback rows, where spectators are called "Spectator"
    pub fn feedback_name(&self) -> &'static str {
        match self {
            Team::Spectate => "Spectator",
            other => other.as_str(),
        }
    }

    /// Short side tag for position samples
    pub fn side_tag(&self) -> &'static str {
        match self {
            Team::Terrorist => "T",
            Team::CounterTerrorist => "CT",
            _ => "",
        }
    }
}

/// The decoder's view of one participant at the moment an event fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSnapshot {
    /// Connection id; volatile and reused across reconnects
    pub user_id: i32,
    /// Account id; zero for bots and some early samples
    pub steam_id: i64,
    pub name: String,
    pub team: Team,
    pub position: Vector,
    pub last_alive_position: Option<Vector>,
    pub view_direction_x: f32,
    pub view_direction_y: f32,
    pub is_alive: bool,
    pub disconnected: bool,
    pub current_equipment_value: i32,
    pub round_start_equipment_value: i32,
    pub has_defuse_kit: bool,
}

impl PlayerSnapshot {
    pub fn new(user_id: i32, steam_id: i64, name: impl Into<String>, team: Team) -> Self {
        Self {
            user_id,
            steam_id,
            name: name.into(),
            team,
            is_alive: true,
            ..Default::default()
        }
    }

    /// Pseudo-players that never take part in identity bookkeeping
    pub fn is_sentinel(&self) -> bool {
        self.name == UNCONNECTED_NAME || self.name == SPECTATOR_PROXY_NAME
    }

    pub fn is_playing(&self) -> bool {
        self.team.is_playing()
    }

    /// Console command that puts a spectator at this player's eye position
    pub fn setpos_command(&self) -> String {
        format!(
            "setpos {} {} {}; setang {} {}",
            self.position.x,
            self.position.y,
            self.position.z,
            self.view_direction_x,
            self.view_direction_y
        )
    }

    pub fn expenditure(&self) -> i32 {
        self.current_equipment_value - self.round_start_equipment_value
    }
}
