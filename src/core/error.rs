//! Typed errors for quoting and settling conversions.
//!
//! All of these are recoverable, user-facing conditions. The presentation
//! layer decides how to phrase them.

use crate::core::currency::{Currency, CurrencyPair};
use thiserror::Error;

/// Errors produced while resolving a conversion rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// Source and target currency are the same.
    #[error("Select two different currencies")]
    SameCurrencySelected,

    /// A required quote could not be fetched or parsed.
    #[error("Quote unavailable for {pair}: {reason}")]
    QuoteUnavailable { pair: CurrencyPair, reason: String },
}

/// Errors produced while settling a pending conversion against the wallet.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Insufficient {currency} balance: required {required}, available {available}")]
    InsufficientBalance {
        currency: Currency,
        required: f64,
        available: f64,
    },
}

/// Everything a session operation can fail with.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Amount is non-positive, non-finite or not a number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),

    #[error("No pending quote to confirm")]
    NoPendingQuote,
}

/// Parses user input into a strictly positive, finite amount.
pub fn parse_amount(input: &str) -> Result<f64, ConversionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::InvalidAmount(
            "enter an amount to convert".to_string(),
        ));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| ConversionError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(amount)
}

pub(crate) fn validate_amount(amount: f64) -> Result<f64, ConversionError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ConversionError::InvalidAmount(amount.to_string()))
    }
}
