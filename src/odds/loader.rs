//! Odds table I/O.
//!
//! Loads the flat odds CSV (`event_id, time, fighter, bookmaker,
//! decimal_odds`) and writes it back out after a feed refresh. The file is
//! externally produced, so a missing file is an empty dataset rather than
//! an error; malformed numeric fields abort the command with a parse
//! failure — there is no partial recovery.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::types::OddsRow;

/// Load all odds rows from a CSV file.
/// Returns an empty vec if the file doesn't exist.
pub fn load_odds(path: &Path) -> Result<Vec<OddsRow>> {
    if !path.exists() {
        info!(path = %path.display(), "No odds file found, treating as empty dataset");
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open odds file: {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: OddsRow = record
            .with_context(|| format!("Malformed odds row in {}", path.display()))?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Odds loaded");
    Ok(rows)
}

/// Write the full odds table to a CSV file, replacing any existing content.
pub fn write_odds(path: &Path, rows: &[OddsRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create odds file: {}", path.display()))?;

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write odds row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush odds file: {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "Odds written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
