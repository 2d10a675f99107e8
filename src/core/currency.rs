//! Currencies held by the wallet and the pairs they are quoted in.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Brazilian real, the pivot every other currency is quoted against.
    Brl,
    Usd,
    Btc,
}

impl Currency {
    /// All currencies in wallet display order.
    pub const ALL: [Currency; 3] = [Currency::Brl, Currency::Usd, Currency::Btc];

    /// The pivot currency cross-rates are composed through.
    pub const PIVOT: Currency = Currency::Brl;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Btc => "BTC",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Brl => "Real",
            Currency::Usd => "Dollar",
            Currency::Btc => "Bitcoin",
        }
    }

    /// Decimal places used when rendering amounts of this currency.
    pub fn precision(&self) -> usize {
        match self {
            Currency::Brl | Currency::Usd => 2,
            Currency::Btc => 4,
        }
    }

    /// Prefix symbol. Bitcoin has none and is rendered with a code suffix instead.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Brl => "R$",
            Currency::Usd => "$",
            Currency::Btc => "",
        }
    }

    pub fn is_pivot(&self) -> bool {
        *self == Self::PIVOT
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brl" | "real" => Ok(Currency::Brl),
            "usd" | "dollar" => Ok(Currency::Usd),
            "btc" | "bitcoin" => Ok(Currency::Btc),
            _ => Err(anyhow!("Unknown currency: {}", s)),
        }
    }
}

/// A pair quoted as units of `quote` per one unit of `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// The pair quoting `currency` in pivot units, e.g. USD-BRL.
    pub fn against_pivot(currency: Currency) -> Self {
        Self::new(currency, Currency::PIVOT)
    }

    /// Path form used in quote URLs, e.g. `USD-BRL`.
    pub fn code(&self) -> String {
        format!("{}-{}", self.base.code(), self.quote.code())
    }

    /// Key form used in quote payloads, e.g. `USDBRL`.
    pub fn key(&self) -> String {
        format!("{}{}", self.base.code(), self.quote.code())
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
