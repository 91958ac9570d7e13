//! Money type for representing monetary values.
//!
//! Storefront prices arrive as integers in the smallest currency unit
//! (paise, cents). They stay integers until the moment they are rendered,
//! so no floating-point value ever reaches the display string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the display prefix used in front of an amount.
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::INR => "Rs. ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An amount in minor currency units, as sent by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money value from minor units.
    pub fn from_minor(amount: i64) -> Self {
        Self(amount)
    }

    /// The raw minor-unit amount.
    pub fn minor_units(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

/// How amounts are rendered for shoppers: a prefix followed by the major
/// units with a fixed number of decimals (`Rs. 1499.00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFormat {
    /// Text placed before the amount.
    pub prefix: String,
    /// Digits after the decimal point.
    pub decimal_places: u32,
}

impl MoneyFormat {
    /// Create a format with an explicit prefix and two decimals.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            decimal_places: 2,
        }
    }

    /// The conventional format for a currency.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            prefix: currency.prefix().to_string(),
            decimal_places: currency.decimal_places(),
        }
    }

    /// Render an amount.
    pub fn format(&self, money: Money) -> String {
        let amount = money.minor_units();
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();

        if self.decimal_places == 0 {
            return format!("{}{}{}", sign, self.prefix, abs);
        }

        let divisor = 10_u64.pow(self.decimal_places);
        let places = self.decimal_places as usize;
        format!(
            "{}{}{}.{:0places$}",
            sign,
            self.prefix,
            abs / divisor,
            abs % divisor
        )
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::for_currency(Currency::INR)
    }
}
