//! Shared types for the RINGSIDE utility.
//!
//! These types form the data model used across all modules: odds rows
//! loaded from CSV, bets recorded in the ledger, and the derived rows
//! produced by the analyzer and summary queries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

// ---------------------------------------------------------------------------
// Event time
// ---------------------------------------------------------------------------

/// Scheduled time of an event as it appears in the odds CSV.
///
/// The odds file is externally produced, so the `time` column is parsed as
/// ISO-8601 when possible and carried through as raw text otherwise.
/// Ordering is total: timestamps sort chronologically and before any raw
/// value; raw values sort lexically among themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    Timestamp(DateTime<Utc>),
    Raw(String),
}

/// Naive ISO-8601 shapes accepted in addition to full RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

impl FromStr for EventTime {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(EventTime::Timestamp(dt.with_timezone(&Utc)));
        }
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(EventTime::Timestamp(naive.and_utc()));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(EventTime::Timestamp(naive.and_utc()));
            }
        }
        Ok(EventTime::Raw(s.to_string()))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (EventTime::Timestamp(a), EventTime::Timestamp(b)) => a.cmp(b),
            (EventTime::Timestamp(_), EventTime::Raw(_)) => Ordering::Less,
            (EventTime::Raw(_), EventTime::Timestamp(_)) => Ordering::Greater,
            (EventTime::Raw(a), EventTime::Raw(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Timestamp(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            EventTime::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EventTime::Timestamp(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            EventTime::Raw(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible — unparseable input stays raw.
        Ok(s.parse().unwrap_or(EventTime::Raw(s)))
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EventTime::Timestamp(dt)
    }
}

// ---------------------------------------------------------------------------
// Odds rows
// ---------------------------------------------------------------------------

/// One quoted price in the odds table: a bookmaker's decimal odds for a
/// fighter in an event. Loaded fresh from CSV on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsRow {
    pub event_id: String,
    pub time: EventTime,
    pub fighter: String,
    pub bookmaker: String,
    /// Payout multiplier (stake × odds = gross return). Always > 0.
    pub decimal_odds: Decimal,
}

impl fmt::Display for OddsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} @ {} ({}) {}",
            self.event_id, self.fighter, self.decimal_odds, self.bookmaker, self.time,
        )
    }
}

// ---------------------------------------------------------------------------
// Bets
// ---------------------------------------------------------------------------

/// Outcome of a settled bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Win,
    Loss,
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Win => write!(f, "win"),
            BetResult::Loss => write!(f, "loss"),
        }
    }
}

/// A placed wager. Append-only once written to the ledger: never mutated
/// or deleted. `result` and `payout` are empty until the bet settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub date: DateTime<Utc>,
    pub fighter: String,
    pub odds: Decimal,
    pub stake: Decimal,
    pub bookmaker: String,
    pub result: Option<BetResult>,
    pub payout: Option<Decimal>,
}

impl Bet {
    /// Net profit: payout (0 while unsettled) minus stake.
    pub fn profit(&self) -> Decimal {
        self.payout.unwrap_or(Decimal::ZERO) - self.stake
    }

    /// Helper to build a test bet with sensible defaults.
    #[cfg(test)]
    pub fn sample(fighter: &str, stake: Decimal) -> Self {
        Bet {
            date: Utc::now(),
            fighter: fighter.to_string(),
            odds: rust_decimal_macros::dec!(2.0),
            stake,
            bookmaker: "BookA".to_string(),
            result: None,
            payout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived rows (analyzer and ledger summary output)
// ---------------------------------------------------------------------------

/// An upcoming event with the earliest quoted start time.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct UpcomingFight {
    pub event_id: String,
    pub time: EventTime,
}

/// The best available odds for a fighter in an event.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct BestOdds {
    pub event_id: String,
    pub time: EventTime,
    pub fighter: String,
    pub bookmaker: String,
    pub decimal_odds: Decimal,
}

/// A detected value bet: best available odds exceed the market average
/// by at least the configured margin.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct ValueBet {
    pub event_id: String,
    pub time: EventTime,
    pub fighter: String,
    /// Bookmaker quoting the best odds.
    pub bookmaker: String,
    pub avg_odds: Decimal,
    pub best_odds: Decimal,
    /// (best − mean) / mean, rounded to 4 dp.
    pub value_pct: Decimal,
}

/// One line of the ledger summary. The trailing aggregate line carries
/// `date == "TOTAL"` and only the profit column.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SummaryRow {
    pub date: String,
    pub fighter: String,
    #[tabled(display_with = "display_opt_decimal")]
    pub odds: Option<Decimal>,
    #[tabled(display_with = "display_opt_decimal")]
    pub stake: Option<Decimal>,
    pub bookmaker: String,
    pub result: String,
    #[tabled(display_with = "display_opt_decimal")]
    pub payout: Option<Decimal>,
    pub profit: Decimal,
}

/// Render an optional decimal column; empty cell when absent.
pub fn display_opt_decimal(value: &Option<Decimal>) -> String {
    match value {
        Some(d) => d.to_string(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for RINGSIDE. Config and I/O failures are
/// plain `anyhow` errors with context; only feed failures carry structure
/// (the status/body pair the CLI reports verbatim).
#[derive(Debug, thiserror::Error)]
pub enum RingsideError {
    #[error("Odds API error (HTTP {status}): {message}")]
    Feed { status: u16, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
