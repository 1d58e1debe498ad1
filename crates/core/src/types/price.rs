//! Type-safe price representation using decimal arithmetic.
//!
//! The AJAX storefront API reports prices as integers in the currency's
//! minor unit (`1250` means 12.50). Formatting is display-only: there is no
//! currency conversion and no tax computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal separator used when rendering a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecimalSeparator {
    /// `12.50`
    #[default]
    Period,
    /// `12,50`
    Comma,
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's minor unit (e.g., cents).
    pub amount_minor: i64,
    /// ISO 4217 currency code (e.g., "EUR").
    pub currency_code: String,
}

impl Price {
    /// Create a price from an amount in minor units.
    #[must_use]
    pub fn from_minor(amount_minor: i64, currency_code: impl Into<String>) -> Self {
        Self {
            amount_minor,
            currency_code: currency_code.into(),
        }
    }

    /// Amount in the currency's standard unit (e.g., euros, not cents).
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_minor, 2)
    }

    /// Format with two decimals followed by the currency code, e.g. `12,50EUR`.
    #[must_use]
    pub fn format(&self, separator: DecimalSeparator) -> String {
        let amount = format!("{:.2}", self.amount());
        let amount = match separator {
            DecimalSeparator::Period => amount,
            DecimalSeparator::Comma => amount.replace('.', ","),
        };
        format!("{amount}{}", self.currency_code)
    }
}
