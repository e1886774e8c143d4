//! Error types for match sessions

use thiserror::Error;

/// Errors that end a match session early
#[derive(Debug, Error)]
pub enum SessionError {
    /// The external decoder failed; results gathered so far stay available but incomplete
    #[error("replay decoder failed after {events_applied} events")]
    Decode {
        events_applied: u64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
