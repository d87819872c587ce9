//! Odds table — CSV loading and derived read-only queries.

pub mod analyzer;
pub mod loader;

pub use analyzer::{best_odds, upcoming_fights, value_bets};
pub use loader::{load_odds, write_odds};
