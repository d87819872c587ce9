//! The Odds API integration.
//!
//! Fetches head-to-head decimal odds for a sport (boxing by default) and
//! flattens the nested event/bookmaker/outcome response into the flat
//! `OddsRow` table the analyzer consumes.
//!
//! API docs: https://the-odds-api.com/liveapi/guides/v4/
//! Base URL: https://api.the-odds-api.com/v4
//! Auth: `apiKey` query parameter. Free tier: 500 req/month.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::types::{OddsRow, RingsideError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://api.the-odds-api.com/v4";

/// Head-to-head market key — the only market this utility tracks.
const MARKET_H2H: &str = "h2h";

// ---------------------------------------------------------------------------
// API response types (The Odds API JSON → Rust)
// ---------------------------------------------------------------------------

/// One event as returned by `/v4/sports/{sport}/odds`.
/// We only deserialize the fields we need.
#[derive(Debug, Clone, Deserialize)]
pub struct OddsEvent {
    pub id: String,
    pub commence_time: DateTime<Utc>,
    #[serde(default)]
    pub bookmakers: Vec<EventBookmaker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventBookmaker {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub markets: Vec<BookmakerMarket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookmakerMarket {
    pub key: String,
    #[serde(default)]
    pub outcomes: Vec<MarketOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketOutcome {
    /// Fighter name for h2h markets.
    pub name: String,
    /// Decimal odds.
    pub price: Decimal,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OddsApiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OddsApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, BASE_URL.to_string())
    }

    /// Construct against a non-default base URL (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("RINGSIDE/0.1.0")
            .build()
            .context("Failed to build odds API HTTP client")?;
        Ok(Self { http, api_key, base_url })
    }

    /// Fetch current h2h odds for a sport across the given regions.
    /// Non-2xx responses abort with status code and body text; no retries.
    pub async fn fetch_odds(&self, sport_key: &str, regions: &str) -> Result<Vec<OddsEvent>> {
        let url = format!("{}/sports/{}/odds", self.base_url, sport_key);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("regions", regions),
                ("markets", MARKET_H2H),
                ("oddsFormat", "decimal"),
            ])
            .send()
            .await
            .context("Odds API request failed")?;

        let status = response.status();

        // The Odds API reports remaining monthly quota in headers.
        if let Some(remaining) = response
            .headers()
            .get("x-requests-remaining")
            .and_then(|v| v.to_str().ok())
        {
            debug!(remaining, "Odds API quota");
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RingsideError::Feed {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let events: Vec<OddsEvent> = response
            .json()
            .await
            .context("Failed to parse odds API response")?;

        info!(sport_key, events = events.len(), "Odds fetched");
        Ok(events)
    }
}

/// Flatten API events into odds rows: one row per
/// (event, bookmaker, outcome) in the h2h market.
pub fn flatten_events(events: &[OddsEvent]) -> Vec<OddsRow> {
    let mut rows = Vec::new();

    for event in events {
        for bookmaker in &event.bookmakers {
            for market in &bookmaker.markets {
                if market.key != MARKET_H2H {
                    continue;
                }
                for outcome in &market.outcomes {
                    rows.push(OddsRow {
                        event_id: event.id.clone(),
                        time: event.commence_time.into(),
                        fighter: outcome.name.clone(),
                        bookmaker: bookmaker.title.clone(),
                        decimal_odds: outcome.price,
                    });
                }
            }
        }
    }

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_RESPONSE: &str = r#"[
        {
            "id": "e1f2",
            "sport_key": "boxing_boxing",
            "commence_time": "2026-09-12T21:00:00Z",
            "home_team": "Tyson Fury",
            "away_team": "Oleksandr Usyk",
            "bookmakers": [
                {
                    "key": "bet365",
                    "title": "Bet365",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                { "name": "Tyson Fury", "price": 2.1 },
                                { "name": "Oleksandr Usyk", "price": 1.75 }
                            ]
                        }
                    ]
                },
                {
                    "key": "williamhill",
                    "title": "William Hill",
                    "markets": [
                        {
                            "key": "h2h",
                            "outcomes": [
                                { "name": "Tyson Fury", "price": 2.25 },
                                { "name": "Oleksandr Usyk", "price": 1.7 }
                            ]
                        },
                        {
                            "key": "totals",
                            "outcomes": [
                                { "name": "Over", "price": 1.9 }
                            ]
                        }
                    ]
                }
            ]
        }
    ]"#;

    #[test]
    fn test_deserialize_events() {
        let events: Vec<OddsEvent> = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "e1f2");
        assert_eq!(events[0].bookmakers.len(), 2);
    }

    #[test]
    fn test_flatten_one_row_per_outcome() {
        let events: Vec<OddsEvent> = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let rows = flatten_events(&events);

        // 2 bookmakers × 2 h2h outcomes; the totals market is skipped.
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.event_id == "e1f2"));
    }

    #[test]
    fn test_flatten_carries_prices_and_bookmakers() {
        let events: Vec<OddsEvent> = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let rows = flatten_events(&events);

        let fury_best = rows
            .iter()
            .filter(|r| r.fighter == "Tyson Fury")
            .max_by_key(|r| r.decimal_odds)
            .unwrap();
        assert_eq!(fury_best.bookmaker, "William Hill");
        assert_eq!(fury_best.decimal_odds, dec!(2.25));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_events(&[]).is_empty());
    }

    #[test]
    fn test_client_builds() {
        let client = OddsApiClient::new("test-key".to_string());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_odds_reports_status_and_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // One-shot server rejecting the request the way the API rejects a
        // bad key.
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;

            let body = r#"{"message":"Invalid API key"}"#;
            let response = format!(
                "HTTP/1.1 401 Unauthorized\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        let client =
            OddsApiClient::with_base_url("bad-key".to_string(), format!("http://{addr}")).unwrap();
        let err = client.fetch_odds("boxing_boxing", "us").await.unwrap_err();

        match err.downcast_ref::<RingsideError>() {
            Some(RingsideError::Feed { status, message }) => {
                assert_eq!(*status, 401);
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("expected feed error, got: {other:?}"),
        }

        server.await.unwrap();
    }
}
