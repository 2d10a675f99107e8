//! A single user's conversion session.
//!
//! The session owns the wallet and the quote cache. Wallet mutation and the
//! cache take happen under the wallet lock, so a shared session cannot settle
//! the same quote twice or interleave two settlements.
use crate::core::cache::QuoteCache;
use crate::core::conversion::{ConversionRequest, PendingConversion};
use crate::core::error::{ConversionError, RateError, validate_amount};
use crate::core::rate::RateResolver;
use crate::core::report::Settlement;
use crate::core::settlement::settle;
use crate::core::wallet::{Wallet, ensure_balance};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct Session {
    wallet: Mutex<Wallet>,
    cache: QuoteCache,
    resolver: RateResolver,
}

impl Session {
    pub fn new(wallet: Wallet, resolver: RateResolver) -> Self {
        Self {
            wallet: Mutex::new(wallet),
            cache: QuoteCache::new(),
            resolver,
        }
    }

    pub async fn wallet(&self) -> Wallet {
        *self.wallet.lock().await
    }

    pub async fn pending(&self) -> Option<PendingConversion> {
        self.cache.peek().await
    }

    /// Validates `request`, resolves a fresh rate and caches the result as the
    /// pending conversion.
    ///
    /// A pending conversion for a different request is dropped up front. On a
    /// failed resolution the cache and the wallet are left as they were.
    pub async fn request_quote(
        &self,
        request: ConversionRequest,
    ) -> Result<PendingConversion, ConversionError> {
        self.cache.discard_if_stale(&request).await;

        validate_amount(request.amount)?;
        if request.source == request.target {
            return Err(RateError::SameCurrencySelected.into());
        }
        ensure_balance(&self.wallet().await, request.source, request.amount)?;

        let pending = match self.resolver.quote(&request).await {
            Ok(pending) => pending,
            Err(e) => {
                warn!(error = %e, "Quote resolution failed");
                return Err(e.into());
            }
        };
        self.cache.store(pending).await;

        info!(
            source = %pending.source,
            target = %pending.target,
            amount = pending.source_amount,
            quoted = pending.target_amount,
            rate = pending.rate,
            "Quote ready for confirmation"
        );
        Ok(pending)
    }

    /// Drops the pending conversion without settling it.
    pub async fn cancel(&self) -> Option<PendingConversion> {
        self.cache.take().await
    }

    /// Settles the pending conversion at its cached rate.
    ///
    /// The pending conversion is consumed even when settlement fails.
    pub async fn confirm(&self) -> Result<Settlement, ConversionError> {
        let mut wallet = self.wallet.lock().await;
        let pending = self
            .cache
            .take()
            .await
            .ok_or(ConversionError::NoPendingQuote)?;
        debug!(?pending, "Confirming pending conversion");

        let (next, settlement) = settle(&wallet, &pending)?;
        *wallet = next;
        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use crate::core::error::SettlementError;
    use crate::core::rate::tests::MockQuoteProvider;
    use std::sync::Arc;

    fn session_with(provider: MockQuoteProvider) -> (Session, Arc<MockQuoteProvider>) {
        let provider = Arc::new(provider);
        let resolver = RateResolver::new(provider.clone());
        (Session::new(Wallet::default(), resolver), provider)
    }

    fn standard_provider() -> MockQuoteProvider {
        MockQuoteProvider::new()
            .with_bid(Currency::Usd, 5.0)
            .with_bid(Currency::Btc, 300_000.0)
    }

    #[tokio::test]
    async fn test_quote_then_confirm() {
        let (session, _) = session_with(standard_provider());

        let pending = session
            .request_quote(ConversionRequest::new(Currency::Brl, Currency::Usd, 1000.0))
            .await
            .unwrap();
        assert!((pending.target_amount - 200.0).abs() < 1e-9);
        assert_eq!(session.wallet().await, Wallet::default());

        let settlement = session.confirm().await.unwrap();
        assert!((settlement.target_amount - 200.0).abs() < 1e-9);

        let wallet = session.wallet().await;
        assert!((wallet.brl - 99_000.0).abs() < 1e-9);
        assert!((wallet.usd - 50_200.0).abs() < 1e-9);
        assert_eq!(wallet.btc, 0.5);
        assert!(session.pending().await.is_none());
    }

    #[tokio::test]
    async fn test_confirm_twice_settles_once() {
        let (session, _) = session_with(standard_provider());

        session
            .request_quote(ConversionRequest::new(Currency::Usd, Currency::Brl, 100.0))
            .await
            .unwrap();
        session.confirm().await.unwrap();

        let second = session.confirm().await;
        assert!(matches!(second, Err(ConversionError::NoPendingQuote)));
        assert_eq!(session.wallet().await.usd, 49_900.0);
    }

    #[tokio::test]
    async fn test_confirm_without_quote() {
        let (session, _) = session_with(standard_provider());
        assert!(matches!(
            session.confirm().await,
            Err(ConversionError::NoPendingQuote)
        ));
    }

    #[tokio::test]
    async fn test_rejections_happen_before_fetch() {
        let (session, provider) = session_with(standard_provider());

        let same = session
            .request_quote(ConversionRequest::new(Currency::Usd, Currency::Usd, 10.0))
            .await;
        assert!(matches!(
            same,
            Err(ConversionError::Rate(RateError::SameCurrencySelected))
        ));

        let invalid = session
            .request_quote(ConversionRequest::new(Currency::Usd, Currency::Brl, -1.0))
            .await;
        assert!(matches!(invalid, Err(ConversionError::InvalidAmount(_))));

        let too_much = session
            .request_quote(ConversionRequest::new(Currency::Btc, Currency::Usd, 1.0))
            .await;
        assert!(matches!(
            too_much,
            Err(ConversionError::Settlement(
                SettlementError::InsufficientBalance { .. }
            ))
        ));

        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_untouched() {
        let (session, _) = session_with(
            MockQuoteProvider::new()
                .with_bid(Currency::Usd, 5.0)
                .with_error(Currency::Btc, "503 Service Unavailable"),
        );

        let result = session
            .request_quote(ConversionRequest::new(Currency::Usd, Currency::Btc, 100.0))
            .await;
        assert!(matches!(
            result,
            Err(ConversionError::Rate(RateError::QuoteUnavailable { .. }))
        ));
        assert_eq!(session.wallet().await, Wallet::default());
        assert!(session.pending().await.is_none());
    }

    #[tokio::test]
    async fn test_quote_for_other_pair_drops_previous_pending() {
        let (session, _) = session_with(
            MockQuoteProvider::new()
                .with_bid(Currency::Usd, 5.0)
                .with_error(Currency::Btc, "timeout"),
        );

        session
            .request_quote(ConversionRequest::new(Currency::Brl, Currency::Usd, 1000.0))
            .await
            .unwrap();
        assert!(
            session
                .request_quote(ConversionRequest::new(Currency::Brl, Currency::Btc, 1000.0))
                .await
                .is_err()
        );

        assert!(session.pending().await.is_none());
        assert!(matches!(
            session.confirm().await,
            Err(ConversionError::NoPendingQuote)
        ));
    }

    #[tokio::test]
    async fn test_failed_identical_requote_keeps_shown_quote() {
        let (session, provider) = session_with(standard_provider().failing_after(1));
        let request = ConversionRequest::new(Currency::Brl, Currency::Usd, 1000.0);

        let first = session.request_quote(request).await.unwrap();
        let again = session.request_quote(request).await;
        assert!(matches!(
            again,
            Err(ConversionError::Rate(RateError::QuoteUnavailable { .. }))
        ));
        assert_eq!(provider.call_count(), 2);
        assert_eq!(session.pending().await, Some(first));

        let settlement = session.confirm().await.unwrap();
        assert!((settlement.target_amount - 200.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_cancel_drops_pending() {
        let (session, _) = session_with(standard_provider());
        session
            .request_quote(ConversionRequest::new(Currency::Btc, Currency::Brl, 0.1))
            .await
            .unwrap();

        let cancelled = session.cancel().await.unwrap();
        assert_eq!(cancelled.source, Currency::Btc);
        assert!((cancelled.target_amount - 30_000.0).abs() < 1e-6);
        assert!(session.cancel().await.is_none());
        assert_eq!(session.wallet().await, Wallet::default());
    }

    #[tokio::test]
    async fn test_confirm_rechecks_balance() {
        let provider = Arc::new(standard_provider());
        let resolver = RateResolver::new(provider);
        let session = Session::new(Wallet::new(1000.0, 0.0, 0.0), resolver);

        session
            .request_quote(ConversionRequest::new(Currency::Brl, Currency::Usd, 1000.0))
            .await
            .unwrap();
        // Balance drops between quote and confirm.
        *session.wallet.lock().await = Wallet::new(500.0, 0.0, 0.0);

        let result = session.confirm().await;
        assert!(matches!(
            result,
            Err(ConversionError::Settlement(
                SettlementError::InsufficientBalance { .. }
            ))
        ));
        assert_eq!(session.wallet().await, Wallet::new(500.0, 0.0, 0.0));
        assert!(session.pending().await.is_none());
    }
}
