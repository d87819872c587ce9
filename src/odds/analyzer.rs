//! Read-only queries over the loaded odds table.
//!
//! Groups the flat odds rows by event and by (event, fighter) to answer
//! the three CLI questions: what is coming up, where are the best prices,
//! and which prices beat the market average by enough to be a value bet.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::types::{BestOdds, OddsRow, UpcomingFight, ValueBet};

/// Upcoming events with the earliest quoted time per event, sorted
/// ascending by that time. Equal times keep insertion order (stable sort).
pub fn upcoming_fights(rows: &[OddsRow]) -> Vec<UpcomingFight> {
    // Tables are small; a vec scan keeps first-seen order without an
    // order-preserving map.
    let mut fights: Vec<UpcomingFight> = Vec::new();

    for row in rows {
        match fights.iter_mut().find(|f| f.event_id == row.event_id) {
            Some(fight) => {
                if row.time < fight.time {
                    fight.time = row.time.clone();
                }
            }
            None => fights.push(UpcomingFight {
                event_id: row.event_id.clone(),
                time: row.time.clone(),
            }),
        }
    }

    fights.sort_by(|a, b| a.time.cmp(&b.time));
    fights
}

/// Best available odds per (event, fighter). Ties keep the first-seen
/// maximal row; output preserves first-appearance order of each pair.
pub fn best_odds(rows: &[OddsRow]) -> Vec<BestOdds> {
    let mut best: Vec<BestOdds> = Vec::new();

    for row in rows {
        match best
            .iter_mut()
            .find(|b| b.event_id == row.event_id && b.fighter == row.fighter)
        {
            Some(entry) => {
                if row.decimal_odds > entry.decimal_odds {
                    entry.time = row.time.clone();
                    entry.bookmaker = row.bookmaker.clone();
                    entry.decimal_odds = row.decimal_odds;
                }
            }
            None => best.push(BestOdds {
                event_id: row.event_id.clone(),
                time: row.time.clone(),
                fighter: row.fighter.clone(),
                bookmaker: row.bookmaker.clone(),
                decimal_odds: row.decimal_odds,
            }),
        }
    }

    best
}

/// Value bets: (event, fighter) pairs where the best quoted odds exceed
/// the arithmetic mean of all quotes by at least `threshold`, sorted
/// descending by the margin. A zero mean cannot produce a margin and the
/// pair is excluded rather than dividing by zero.
pub fn value_bets(rows: &[OddsRow], threshold: Decimal) -> Vec<ValueBet> {
    let mut groups: Vec<(&str, &str, Vec<&OddsRow>)> = Vec::new();

    for row in rows {
        match groups
            .iter_mut()
            .find(|(event_id, fighter, _)| *event_id == row.event_id && *fighter == row.fighter)
        {
            Some((_, _, members)) => members.push(row),
            None => groups.push((&row.event_id, &row.fighter, vec![row])),
        }
    }

    let mut results = Vec::new();

    for (event_id, fighter, members) in groups {
        let sum: Decimal = members.iter().map(|r| r.decimal_odds).sum();
        let mean = sum / Decimal::from(members.len());

        if mean.is_zero() {
            warn!(event_id, fighter, "Zero mean odds, skipping group");
            continue;
        }

        // First-seen maximal row wins ties.
        let mut best = members[0];
        for row in &members[1..] {
            if row.decimal_odds > best.decimal_odds {
                best = row;
            }
        }

        let value_pct = (best.decimal_odds - mean) / mean;
        if value_pct < threshold {
            debug!(
                event_id,
                fighter,
                value_pct = %value_pct.round_dp(4),
                threshold = %threshold,
                "Margin below threshold"
            );
            continue;
        }

        results.push(ValueBet {
            event_id: event_id.to_string(),
            time: best.time.clone(),
            fighter: fighter.to_string(),
            bookmaker: best.bookmaker.clone(),
            avg_odds: mean.round_dp(2),
            best_odds: best.decimal_odds,
            value_pct: value_pct.round_dp(4),
        });
    }

    results.sort_by(|a, b| b.value_pct.cmp(&a.value_pct));
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
