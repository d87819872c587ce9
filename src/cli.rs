//! Command-line interface definition.
//!
//! Subcommand dispatch lives in `main.rs`; this module only declares the
//! clap surface so it can be unit-tested without running commands.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::types::BetResult;

/// Boxing betting odds and wager tracking.
#[derive(Parser, Debug)]
#[command(name = "ringside", version, about)]
pub struct Cli {
    /// Path to the odds CSV (overrides config).
    #[arg(long, global = true, value_name = "PATH")]
    pub odds_file: Option<PathBuf>,

    /// Path to the bets CSV (overrides config).
    #[arg(long, global = true, value_name = "PATH")]
    pub bets_file: Option<PathBuf>,

    /// Path to the config file.
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List upcoming fights.
    Fights,

    /// Show best available odds per fighter.
    Best,

    /// List potential value bets.
    Value {
        /// Minimum value margin (best − mean) / mean. Defaults to the
        /// configured strategy threshold.
        #[arg(long)]
        threshold: Option<Decimal>,
    },

    /// Record a bet in the ledger.
    AddBet {
        fighter: String,
        odds: Decimal,
        stake: Decimal,
        bookmaker: String,

        /// Outcome, if the bet has already settled.
        #[arg(long, value_enum)]
        result: Option<BetResult>,

        /// Gross payout, if settled.
        #[arg(long)]
        payout: Option<Decimal>,
    },

    /// Show bet history and profits.
    Summary,

    /// Fetch fresh odds from The Odds API into the odds CSV.
    FetchOdds,
}
