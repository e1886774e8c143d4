//! Player identity resolution
//!
//! Connection ids are volatile: a player who drops and rejoins comes back
//! under a new one. The resolver keeps tick counters and account mappings
//! continuous across that change and records a redirect from the retired id.
//! Stats attribution must go through [`PlayerIdentityResolver::resolve`] (or
//! [`PlayerIdentityResolver::account_id`]), never the raw id.

mod duplicate;
mod redirect;
mod resolver;


pub use duplicate::{DuplicateDetector, NameMatch};
pub use redirect::Redirects;
pub use resolver::PlayerIdentityResolver;
