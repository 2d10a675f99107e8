//! Quote abstractions and core types

use crate::core::currency::CurrencyPair;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bid for one unit of `pair.base`, expressed in `pair.quote` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub pair: CurrencyPair,
    pub bid: f64,
    pub ask: Option<f64>,
    pub quoted_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetches a fresh quote. Implementations must never return a bid that is
    /// zero, negative or non-finite.
    async fn fetch_quote(&self, pair: &CurrencyPair) -> Result<Quote>;
}
