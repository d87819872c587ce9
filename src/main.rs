//! RINGSIDE — Boxing Odds & Bet Ledger CLI
//!
//! Entry point. Parses the command line, initialises structured logging,
//! loads configuration (with defaults when no config file exists), and
//! dispatches to the odds analyzer, the bet ledger, or the odds feed.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::debug;

use ringside::cli::{Cli, Commands};
use ringside::config::AppConfig;
use ringside::feed::{flatten_events, OddsApiClient};
use ringside::ledger::BetLedger;
use ringside::odds;
use ringside::output::print_table;
use ringside::types::Bet;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_logging();

    let cfg = AppConfig::load_or_default(&cli.config)?;

    // CLI flags override config paths
    let odds_path = cli.odds_file.unwrap_or_else(|| cfg.files.odds.clone());
    let bets_path = cli.bets_file.unwrap_or_else(|| cfg.files.bets.clone());

    match cli.command {
        Commands::Fights => {
            let rows = odds::load_odds(&odds_path)?;
            print_table(&odds::upcoming_fights(&rows));
        }

        Commands::Best => {
            let rows = odds::load_odds(&odds_path)?;
            print_table(&odds::best_odds(&rows));
        }

        Commands::Value { threshold } => {
            let threshold = threshold.unwrap_or(cfg.strategy.value_threshold);
            debug!(%threshold, "Scanning for value bets");
            let rows = odds::load_odds(&odds_path)?;
            print_table(&odds::value_bets(&rows, threshold));
        }

        Commands::AddBet { fighter, odds, stake, bookmaker, result, payout } => {
            let mut ledger = BetLedger::open(&bets_path)?;
            ledger.add_bet(Bet {
                date: Utc::now(),
                fighter,
                odds,
                stake,
                bookmaker,
                result,
                payout,
            })?;
            println!("Bet added");
        }

        Commands::Summary => {
            let ledger = BetLedger::open(&bets_path)?;
            print_table(&ledger.summary());
        }

        Commands::FetchOdds => {
            let api_key = AppConfig::resolve_env(&cfg.odds_api.api_key_env)?;
            let client = OddsApiClient::new(api_key)?;
            let events = client
                .fetch_odds(&cfg.odds_api.sport_key, &cfg.odds_api.regions)
                .await?;
            let rows = flatten_events(&events);
            odds::write_odds(&odds_path, &rows)?;
            println!(
                "Fetched {} odds rows across {} events into {}",
                rows.len(),
                events.len(),
                odds_path.display()
            );
        }
    }

    Ok(())
}

/// Initialise the `tracing` subscriber.
///
/// Logs go to stderr so table output on stdout stays clean. Default level
/// is warn; raise with `RUST_LOG=ringside=debug`. `RINGSIDE_LOG_JSON`
/// switches to JSON output.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ringside=warn"));

    let json_logging = std::env::var("RINGSIDE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
