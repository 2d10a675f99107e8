//! Resolves the rate between any two wallet currencies.
//!
//! Every quote is a bid against the pivot currency, so a direct rate needs one
//! quote and a cross rate between two non-pivot currencies needs two.
use crate::core::conversion::{ConversionRequest, PendingConversion};
use crate::core::currency::{Currency, CurrencyPair};
use crate::core::error::RateError;
use crate::core::quote::QuoteProvider;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct RateResolver {
    provider: Arc<dyn QuoteProvider>,
}

impl RateResolver {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Returns how many `target` units one `source` unit buys.
    #[instrument(name = "ResolveRate", skip(self))]
    pub async fn resolve_rate(&self, source: Currency, target: Currency) -> Result<f64, RateError> {
        if source == target {
            return Err(RateError::SameCurrencySelected);
        }

        let rate = if target.is_pivot() {
            self.pivot_bid(source).await?
        } else if source.is_pivot() {
            1.0 / self.pivot_bid(target).await?
        } else {
            // Both legs are independent, fail on whichever errors first.
            let (source_bid, target_bid) =
                futures::try_join!(self.pivot_bid(source), self.pivot_bid(target))?;
            debug!(source_bid, target_bid, "Composing cross rate through pivot");
            source_bid * (1.0 / target_bid)
        };

        if !(rate.is_finite() && rate > 0.0) {
            return Err(RateError::QuoteUnavailable {
                pair: CurrencyPair::new(source, target),
                reason: format!("resolved rate {rate} is not positive"),
            });
        }

        info!(%source, %target, rate, "Resolved conversion rate");
        Ok(rate)
    }

    /// Resolves the rate for `request` and prices it into a pending conversion.
    pub async fn quote(&self, request: &ConversionRequest) -> Result<PendingConversion, RateError> {
        let rate = self.resolve_rate(request.source, request.target).await?;
        Ok(PendingConversion::new(request, rate))
    }

    /// Pivot units per one unit of `currency`.
    async fn pivot_bid(&self, currency: Currency) -> Result<f64, RateError> {
        let pair = CurrencyPair::against_pivot(currency);
        let quote = self
            .provider
            .fetch_quote(&pair)
            .await
            .map_err(|e| RateError::QuoteUnavailable {
                pair,
                reason: e.to_string(),
            })?;

        if !(quote.bid.is_finite() && quote.bid > 0.0) {
            return Err(RateError::QuoteUnavailable {
                pair,
                reason: format!("provider returned non-positive bid {}", quote.bid),
            });
        }
        debug!(%pair, bid = quote.bid, "Fetched pivot bid");
        Ok(quote.bid)
    }
}
