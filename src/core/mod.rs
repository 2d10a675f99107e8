//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod quote;
pub mod rate;
pub mod report;
pub mod session;
pub mod settlement;
pub mod wallet;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRequest, PendingConversion};
pub use currency::{Currency, CurrencyPair};
pub use error::{ConversionError, RateError, SettlementError};
pub use quote::{Quote, QuoteProvider};
pub use report::{DisplaySink, QuoteView, Settlement};
pub use session::Session;
pub use wallet::Wallet;
