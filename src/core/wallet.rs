use crate::core::currency::Currency;
use crate::core::error::SettlementError;
use serde::{Deserialize, Serialize};

/// Balances for the three supported currencies. All balances stay non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub brl: f64,
    pub usd: f64,
    pub btc: f64,
}

impl Default for Wallet {
    fn default() -> Self {
        Wallet {
            brl: 100_000.0,
            usd: 50_000.0,
            btc: 0.5,
        }
    }
}

impl Wallet {
    pub fn new(brl: f64, usd: f64, btc: f64) -> Self {
        Wallet { brl, usd, btc }
    }

    pub fn balance(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Brl => self.brl,
            Currency::Usd => self.usd,
            Currency::Btc => self.btc,
        }
    }

    pub fn has_sufficient(&self, currency: Currency, amount: f64) -> bool {
        self.balance(currency) >= amount
    }

    fn balance_mut(&mut self, currency: Currency) -> &mut f64 {
        match currency {
            Currency::Brl => &mut self.brl,
            Currency::Usd => &mut self.usd,
            Currency::Btc => &mut self.btc,
        }
    }

    /// Returns a copy with `debit` taken from `source` and `credit` added to `target`.
    pub(crate) fn with_transfer(
        &self,
        source: Currency,
        debit: f64,
        target: Currency,
        credit: f64,
    ) -> Wallet {
        let mut next = *self;
        *next.balance_mut(source) -= debit;
        *next.balance_mut(target) += credit;
        next
    }
}

pub fn ensure_balance(
    wallet: &Wallet,
    currency: Currency,
    amount: f64,
) -> Result<(), SettlementError> {
    if wallet.has_sufficient(currency, amount) {
        Ok(())
    } else {
        Err(SettlementError::InsufficientBalance {
            currency,
            required: amount,
            available: wallet.balance(currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_balances() {
        let wallet = Wallet::default();
        assert_eq!(wallet.balance(Currency::Brl), 100_000.0);
        assert_eq!(wallet.balance(Currency::Usd), 50_000.0);
        assert_eq!(wallet.balance(Currency::Btc), 0.5);
    }

    #[test]
    fn test_with_transfer_leaves_original_untouched() {
        let wallet = Wallet::default();
        let next = wallet.with_transfer(Currency::Brl, 1000.0, Currency::Usd, 200.0);

        assert_eq!(next, Wallet::new(99_000.0, 50_200.0, 0.5));
        assert_eq!(wallet, Wallet::default());
    }

    #[test]
    fn test_ensure_balance() {
        let wallet = Wallet::default();
        assert!(ensure_balance(&wallet, Currency::Btc, 0.5).is_ok());

        match ensure_balance(&wallet, Currency::Btc, 0.6) {
            Err(SettlementError::InsufficientBalance {
                currency,
                required,
                available,
            }) => {
                assert_eq!(currency, Currency::Btc);
                assert_eq!(required, 0.6);
                assert_eq!(available, 0.5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
