use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::config::AwesomeProviderConfig;
use crate::core::currency::CurrencyPair;
use crate::core::quote::{Quote, QuoteProvider};

/// Latest-quote client for the AwesomeAPI economy service.
///
/// Quotes are fetched fresh on every call; nothing is cached here.
pub struct AwesomeApiProvider {
    base_url: String,
    timeout: Duration,
}

impl AwesomeApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        AwesomeApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &AwesomeProviderConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }
}

// Every field arrives as a string, numbers included.
#[derive(Debug, Deserialize)]
struct AwesomeQuote {
    bid: Option<String>,
    ask: Option<String>,
    timestamp: Option<String>,
}

fn parse_decimal(field: &str, raw: &str, pair: &CurrencyPair) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| anyhow!("Invalid {} '{}' for currency pair: {}: {}", field, raw, pair, e))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

fn into_quote(pair: &CurrencyPair, mut payload: HashMap<String, AwesomeQuote>) -> Result<Quote> {
    let item = payload
        .remove(&pair.key())
        .ok_or_else(|| anyhow!("No quote data found for currency pair: {}", pair))?;

    let raw_bid = item
        .bid
        .ok_or_else(|| anyhow!("Missing bid for currency pair: {}", pair))?;
    let bid = parse_decimal("bid", &raw_bid, pair)?;
    if !(bid.is_finite() && bid > 0.0) {
        return Err(anyhow!(
            "Non-positive bid {} for currency pair: {}",
            bid,
            pair
        ));
    }

    // Only the bid is used for conversions; a bad ask is not fatal.
    let ask = item
        .ask
        .as_deref()
        .and_then(|raw| parse_decimal("ask", raw, pair).ok());
    let quoted_at = item.timestamp.as_deref().and_then(parse_timestamp);

    Ok(Quote {
        pair: *pair,
        bid,
        ask,
        quoted_at,
    })
}

#[async_trait]
impl QuoteProvider for AwesomeApiProvider {
    #[instrument(
        name = "AwesomeQuoteFetch",
        skip(self),
        fields(pair = %pair)
    )]
    async fn fetch_quote(&self, pair: &CurrencyPair) -> Result<Quote> {
        let url = format!("{}/json/last/{}", self.base_url, pair.code());
        debug!("Requesting quote from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("walletfx/1.0")
            .timeout(self.timeout)
            .build()?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;
        debug!(body = %text, "Received quote response");

        let payload: HashMap<String, AwesomeQuote> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        into_quote(pair, payload)
    }
}
