//! Structured results handed to whatever renders them.

use crate::core::conversion::PendingConversion;
use crate::core::currency::Currency;
use crate::core::wallet::Wallet;
use serde::Serialize;

/// A resolved quote as shown to the user before confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteView {
    pub source: Currency,
    pub target: Currency,
    pub source_amount: f64,
    pub target_amount: f64,
    pub rate: f64,
}

impl From<&PendingConversion> for QuoteView {
    fn from(pending: &PendingConversion) -> Self {
        QuoteView {
            source: pending.source,
            target: pending.target,
            source_amount: pending.source_amount,
            target_amount: pending.target_amount,
            rate: pending.rate,
        }
    }
}

/// A completed transfer between two wallet balances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settlement {
    pub source: Currency,
    pub target: Currency,
    pub source_amount: f64,
    pub target_amount: f64,
}

impl From<&PendingConversion> for Settlement {
    fn from(pending: &PendingConversion) -> Self {
        Settlement {
            source: pending.source,
            target: pending.target,
            source_amount: pending.source_amount,
            target_amount: pending.target_amount,
        }
    }
}

pub trait DisplaySink {
    fn show_quote(&self, quote: &QuoteView);
    fn show_settlement(&self, settlement: &Settlement);
    fn show_wallet(&self, wallet: &Wallet);
    fn show_error(&self, message: &str);
}
