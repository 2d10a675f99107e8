//! Applies a pending conversion to a wallet.
use crate::core::conversion::PendingConversion;
use crate::core::error::SettlementError;
use crate::core::report::Settlement;
use crate::core::wallet::{Wallet, ensure_balance};
use tracing::info;

/// Settles `pending` against `wallet` and returns the resulting wallet.
///
/// The input wallet is never modified, so on error the caller still holds the
/// pre-settlement state. This is not idempotent: settling the same conversion
/// twice debits and credits twice.
pub fn settle(
    wallet: &Wallet,
    pending: &PendingConversion,
) -> Result<(Wallet, Settlement), SettlementError> {
    ensure_balance(wallet, pending.source, pending.source_amount)?;

    let next = wallet.with_transfer(
        pending.source,
        pending.source_amount,
        pending.target,
        pending.target_amount,
    );
    info!(
        source = %pending.source,
        target = %pending.target,
        debit = pending.source_amount,
        credit = pending.target_amount,
        "Settled conversion"
    );

    Ok((next, Settlement::from(pending)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversion::ConversionRequest;
    use crate::core::currency::Currency;

    #[test]
    fn test_settle_brl_to_usd() {
        let wallet = Wallet::default();
        let request = ConversionRequest::new(Currency::Brl, Currency::Usd, 1000.0);
        let pending = PendingConversion::new(&request, 1.0 / 5.0);

        let (next, receipt) = settle(&wallet, &pending).unwrap();

        assert!((next.brl - 99_000.0).abs() < 1e-9);
        assert!((next.usd - 50_200.0).abs() < 1e-9);
        assert_eq!(next.btc, 0.5);
        assert_eq!(receipt.source, Currency::Brl);
        assert_eq!(receipt.target, Currency::Usd);
        assert_eq!(receipt.source_amount, 1000.0);
        assert!((receipt.target_amount - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_settle_exact_balance_reaches_zero() {
        let wallet = Wallet::default();
        let request = ConversionRequest::new(Currency::Btc, Currency::Brl, 0.5);
        let pending = PendingConversion::new(&request, 300_000.0);

        let (next, _) = settle(&wallet, &pending).unwrap();
        assert_eq!(next.btc, 0.0);
        assert_eq!(next.brl, 250_000.0);
    }

    #[test]
    fn test_settle_insufficient_balance_leaves_wallet() {
        let wallet = Wallet::new(10.0, 0.0, 0.0);
        let before = wallet;
        let request = ConversionRequest::new(Currency::Brl, Currency::Usd, 10.5);
        let pending = PendingConversion::new(&request, 0.2);

        let result = settle(&wallet, &pending);
        assert!(matches!(
            result,
            Err(SettlementError::InsufficientBalance {
                currency: Currency::Brl,
                ..
            })
        ));
        assert_eq!(wallet, before);
    }

    #[test]
    fn test_settle_is_not_idempotent() {
        let wallet = Wallet::default();
        let request = ConversionRequest::new(Currency::Usd, Currency::Brl, 100.0);
        let pending = PendingConversion::new(&request, 5.0);

        let (once, _) = settle(&wallet, &pending).unwrap();
        let (twice, _) = settle(&once, &pending).unwrap();
        assert_eq!(twice.usd, 49_800.0);
        assert_eq!(twice.brl, 101_000.0);
    }

    #[test]
    fn test_settle_never_goes_negative() {
        let wallet = Wallet::new(100.0, 3.0, 0.01);
        for currency in Currency::ALL {
            let target = if currency == Currency::Brl {
                Currency::Usd
            } else {
                Currency::Brl
            };
            for amount in [0.001, 1.0, 3.0, 50.0, 100.0, 1000.0] {
                let request = ConversionRequest::new(currency, target, amount);
                let pending = PendingConversion::new(&request, 2.0);
                match settle(&wallet, &pending) {
                    Ok((next, _)) => assert!(next.balance(currency) >= 0.0),
                    Err(SettlementError::InsufficientBalance { .. }) => {
                        assert!(wallet.balance(currency) < amount)
                    }
                }
            }
        }
    }
}
