pub mod context;
pub mod demo_event;
pub mod identity;
pub mod rounds;
pub mod serde_defaults;
pub mod session;
pub mod stats;
pub mod ticks;
pub mod timeline;

// Re-exports for convenience
pub use context::{ConfigError, NoTriggers, SessionConfig, StaticTriggers, TriggerLookup};
pub use demo_event::{DemoEvent, PlayerSnapshot, SiteLetter, Team};
pub use identity::{DuplicateDetector, PlayerIdentityResolver};
pub use session::{EventOutcome, MatchReport, MatchSession, SessionError, SessionStatus};
pub use stats::{StatsAggregator, disambiguate_sites, infer_game_mode};
pub use timeline::{EventId, EventKind, EventTimeline};

pub use demostats_types::{AllStats, GameMode, PlayerPositionsStats, TestType};
