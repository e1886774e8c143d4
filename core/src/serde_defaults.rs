//! Common serde default value functions
//!
//! Used by the session configuration so omitted keys keep the stock behavior.

/// Default for parse toggles
pub fn default_true() -> bool {
    true
}

/// Rounds per overtime half when the switch events don't say otherwise
pub fn default_overtime_half_length() -> u32 {
    3
}
