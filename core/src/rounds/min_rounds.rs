use demostats_types::{GameMode, TestType};

/// Rounds a side must reach before a trailing freezetime can mean the match is over.
///
/// `None` disables end-of-match detection for that combination.
pub fn min_rounds_for_win(game_mode: GameMode, test_type: TestType) -> Option<usize> {
    use GameMode as M;
    use TestType as T;

    match (game_mode, test_type) {
        (M::WingmanDefuse | M::WingmanHostage, T::Casual | T::Competitive) => Some(9),
        (M::Defuse | M::Hostage | M::Unknown, T::Casual) => Some(11),
        (M::Defuse | M::Hostage | M::Unknown, T::Competitive) => Some(16),
        (M::DangerZone, T::Casual | T::Competitive) => Some(2),
        _ => None,
    }
}
