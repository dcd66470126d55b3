//! Fiat ↔ satoshi conversion with fixed exchange rates.
//!
//! Rates are hardcoded snapshots; a production deployment would refresh them
//! from a price feed.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 1 BTC = 100,000,000 sats.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("unsupported currency: {0}")]
    Unsupported(String),
}

/// A fiat currency with a known BTC exchange rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    /// Parse a currency code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, CurrencyError> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            _ => Err(CurrencyError::Unsupported(code.to_string())),
        }
    }

    /// The ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    /// BTC per one unit of this currency.
    pub fn btc_rate(&self) -> f64 {
        match self {
            Self::Usd => 0.000023,
            Self::Eur => 0.000025,
            Self::Gbp => 0.000029,
            Self::Jpy => 0.00000016,
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Convert a fiat amount to satoshis, rounding to the nearest sat.
pub fn fiat_to_sats(amount: f64, code: &str) -> Result<u64, CurrencyError> {
    let currency = Currency::from_code(code)?;
    let btc = amount * currency.btc_rate();
    Ok((btc * SATS_PER_BTC).round() as u64)
}

/// Convert satoshis to a fiat amount, rounded to 2 decimals.
pub fn sats_to_fiat(sats: u64, code: &str) -> Result<f64, CurrencyError> {
    let currency = Currency::from_code(code)?;
    let btc = sats as f64 / SATS_PER_BTC;
    let fiat = btc / currency.btc_rate();
    Ok((fiat * 100.0).round() / 100.0)
}

/// Format an integer with commas for thousands.
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a fiat amount with its currency symbol, e.g. `$1,234.50`.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;
    format!("{}{}.{:02}", currency.symbol(), format_number(whole), cents)
}
