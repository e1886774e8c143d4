use demostats_types::{AllStats, PlayerPositionsStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Still accepting events
    Running,
    /// A finished match was detected; the tail of the stream was discarded
    Halted,
    Aborted,
    /// The decoder failed part way through
    Failed,
}

impl SessionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionStatus::Running)
    }

    /// Whether results cover the whole match
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Halted)
    }
}

/// Everything a session produces, handed to an external writer
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub stats: AllStats,
    /// Present when position sampling was enabled
    pub player_positions: Option<PlayerPositionsStats>,
    pub status: SessionStatus,
}
