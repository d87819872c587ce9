//! RINGSIDE — Boxing Odds & Bet Ledger CLI
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod cli;
pub mod config;
pub mod feed;
pub mod ledger;
pub mod odds;
pub mod output;
pub mod types;
