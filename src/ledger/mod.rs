//! Bet ledger — append-only CSV-backed store of placed bets.
//!
//! The CSV file is the database: single writer, single process,
//! last-writer-wins, no locking. Rows are never mutated or deleted once
//! written, so insertion order == file order == chronological-append order.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::{Bet, SummaryRow};

pub struct BetLedger {
    path: PathBuf,
    bets: Vec<Bet>,
}

impl BetLedger {
    /// Open a ledger, loading any bets already on disk.
    /// A missing file is an empty ledger, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "No bets file found, starting empty ledger");
            return Ok(Self { path, bets: Vec::new() });
        }

        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open bets file: {}", path.display()))?;

        let mut bets = Vec::new();
        for record in reader.deserialize() {
            let bet: Bet = record
                .with_context(|| format!("Malformed bet row in {}", path.display()))?;
            bets.push(bet);
        }

        debug!(path = %path.display(), bets = bets.len(), "Ledger loaded");
        Ok(Self { path, bets })
    }

    /// Path of the backing CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded bets in append order.
    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    /// Append a bet to the backing file (creating it with a header when
    /// absent) and to the in-memory list.
    pub fn add_bet(&mut self, bet: Bet) -> Result<()> {
        let write_header = !self.path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open bets file: {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(&bet)
            .with_context(|| format!("Failed to write bet to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush bets file: {}", self.path.display()))?;

        info!(
            fighter = %bet.fighter,
            odds = %bet.odds,
            stake = %bet.stake,
            bookmaker = %bet.bookmaker,
            "Bet recorded"
        );
        self.bets.push(bet);
        Ok(())
    }

    /// Bet history with per-bet profits in ledger order, followed by a
    /// trailing TOTAL row holding the sum of all profits.
    pub fn summary(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(self.bets.len() + 1);
        let mut total = Decimal::ZERO;

        for bet in &self.bets {
            let profit = bet.profit();
            total += profit;
            rows.push(SummaryRow {
                date: bet.date.format("%Y-%m-%d").to_string(),
                fighter: bet.fighter.clone(),
                odds: Some(bet.odds),
                stake: Some(bet.stake),
                bookmaker: bet.bookmaker.clone(),
                result: bet.result.map(|r| r.to_string()).unwrap_or_default(),
                payout: Some(bet.payout.unwrap_or(Decimal::ZERO)),
                profit: profit.round_dp(2),
            });
        }

        rows.push(SummaryRow {
            date: "TOTAL".to_string(),
            fighter: String::new(),
            odds: None,
            stake: None,
            bookmaker: String::new(),
            result: String::new(),
            payout: None,
            profit: total.round_dp(2),
        });

        rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BetResult;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn temp_path() -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("ringside_test_bets_{}.csv", uuid::Uuid::new_v4()));
        p
    }

    fn settled_bet(fighter: &str, stake: Decimal, payout: Decimal) -> Bet {
        Bet {
            date: Utc::now(),
            fighter: fighter.to_string(),
            odds: dec!(2.0),
            stake,
            bookmaker: "BookA".to_string(),
            result: Some(if payout > stake { BetResult::Win } else { BetResult::Loss }),
            payout: Some(payout),
        }
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let ledger = BetLedger::open("/tmp/ringside_no_such_bets.csv").unwrap();
        assert!(ledger.bets().is_empty());
    }

    #[test]
    fn test_add_bet_creates_file_with_header() {
        let path = temp_path();
        let mut ledger = BetLedger::open(&path).unwrap();
        ledger.add_bet(Bet::sample("Fury", dec!(10))).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("date,fighter,odds,stake,bookmaker,result,payout"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_round_trip_preserves_bets() {
        let path = temp_path();
        let mut ledger = BetLedger::open(&path).unwrap();

        let bets = vec![
            settled_bet("Fury", dec!(10), dec!(25)),
            settled_bet("Usyk", dec!(20), dec!(0)),
            Bet::sample("Crawford", dec!(5)),
        ];
        for bet in &bets {
            ledger.add_bet(bet.clone()).unwrap();
        }

        let reloaded = BetLedger::open(&path).unwrap();
        assert_eq!(reloaded.bets().len(), 3);
        assert_eq!(reloaded.bets(), ledger.bets());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_preserves_existing_rows() {
        let path = temp_path();

        let mut ledger = BetLedger::open(&path).unwrap();
        ledger.add_bet(Bet::sample("Fury", dec!(10))).unwrap();
        drop(ledger);

        // Second process run: reopen and append.
        let mut ledger = BetLedger::open(&path).unwrap();
        assert_eq!(ledger.bets().len(), 1);
        ledger.add_bet(Bet::sample("Usyk", dec!(20))).unwrap();

        let reloaded = BetLedger::open(&path).unwrap();
        assert_eq!(reloaded.bets().len(), 2);
        assert_eq!(reloaded.bets()[0].fighter, "Fury");
        assert_eq!(reloaded.bets()[1].fighter, "Usyk");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_summary_total_is_sum_of_profits() {
        let path = temp_path();
        let mut ledger = BetLedger::open(&path).unwrap();
        ledger.add_bet(settled_bet("Fury", dec!(10), dec!(25))).unwrap(); // +15
        ledger.add_bet(settled_bet("Usyk", dec!(20), dec!(0))).unwrap(); // -20
        ledger.add_bet(Bet::sample("Crawford", dec!(5))).unwrap(); // -5 (unsettled)

        let rows = ledger.summary();
        assert_eq!(rows.len(), 4);

        let per_bet: Decimal = rows[..3].iter().map(|r| r.profit).sum();
        let total = &rows[3];
        assert_eq!(total.date, "TOTAL");
        assert_eq!(total.profit, per_bet);
        assert_eq!(total.profit, dec!(-10));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_summary_preserves_ledger_order() {
        let path = temp_path();
        let mut ledger = BetLedger::open(&path).unwrap();
        ledger.add_bet(Bet::sample("Fury", dec!(1))).unwrap();
        ledger.add_bet(Bet::sample("Usyk", dec!(2))).unwrap();
        ledger.add_bet(Bet::sample("Crawford", dec!(3))).unwrap();

        let rows = ledger.summary();
        let fighters: Vec<&str> = rows[..3].iter().map(|r| r.fighter.as_str()).collect();
        assert_eq!(fighters, vec!["Fury", "Usyk", "Crawford"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_summary_empty_ledger_is_total_only() {
        let ledger = BetLedger::open("/tmp/ringside_no_such_bets.csv").unwrap();
        let rows = ledger.summary();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "TOTAL");
        assert_eq!(rows[0].profit, Decimal::ZERO);
    }

    #[test]
    fn test_unsettled_fields_round_trip_empty() {
        let path = temp_path();
        let mut ledger = BetLedger::open(&path).unwrap();
        ledger.add_bet(Bet::sample("Fury", dec!(10))).unwrap();

        let reloaded = BetLedger::open(&path).unwrap();
        assert_eq!(reloaded.bets()[0].result, None);
        assert_eq!(reloaded.bets()[0].payout, None);

        std::fs::remove_file(&path).unwrap();
    }
}
