//! External odds feed.
//!
//! One provider: The Odds API. The fetcher is a one-shot refresh of the
//! odds CSV, not part of the analyzer core.

pub mod theoddsapi;

pub use theoddsapi::{flatten_events, OddsApiClient};
