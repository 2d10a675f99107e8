use crate::core::currency::Currency;
use serde::{Deserialize, Serialize};

/// What the user asked to convert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub source: Currency,
    pub target: Currency,
    pub amount: f64,
}

impl ConversionRequest {
    pub fn new(source: Currency, target: Currency, amount: f64) -> Self {
        Self {
            source,
            target,
            amount,
        }
    }
}

/// A resolved quote waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingConversion {
    pub source: Currency,
    pub target: Currency,
    pub source_amount: f64,
    pub target_amount: f64,
    /// Target units received per source unit.
    pub rate: f64,
}

impl PendingConversion {
    pub fn new(request: &ConversionRequest, rate: f64) -> Self {
        Self {
            source: request.source,
            target: request.target,
            source_amount: request.amount,
            target_amount: request.amount * rate,
            rate,
        }
    }

    /// Whether this conversion was quoted for exactly `request`.
    pub fn matches(&self, request: &ConversionRequest) -> bool {
        self.source == request.source
            && self.target == request.target
            && self.source_amount == request.amount
    }
}
