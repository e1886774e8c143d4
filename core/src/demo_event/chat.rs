use super::player::Vector;

const FEEDBACK_PREFIXES: [&str; 4] = [">fb", ">feedback", "!fb", "!feedback"];

/// True when a chat line is a feedback command (case-insensitive prefix match)
pub fn is_feedback_message(text: &str) -> bool {
    let lower = text.to_lowercase();
    FEEDBACK_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// A chat line kept because it carried a feedback command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackMessage {
    /// Round 0 is warmup
    pub round: i32,
    pub steam_id: i64,
    pub sender_name: String,
    pub team_name: Option<String>,
    pub position: Vector,
    /// Only known while the sender is alive
    pub last_alive_position: Option<Vector>,
    pub view_x: f32,
    pub view_y: f32,
    pub set_pos_command: String,
    /// -1 when the round's freezetime end had to be synthesized
    pub time_in_round: f64,
    pub message: String,
}

/// One living, identified player's position at a sampled instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerPositionSample {
    pub round: i32,
    pub time_in_round: i32,
    pub team_side: String,
    pub steam_id: i64,
    pub position: Vector,
}
