//! Decimal-safe money handling.
//!
//! Upstream price fields arrive as decimal strings. They are parsed once,
//! at the conversion boundary, into [`rust_decimal::Decimal`] so that
//! grouping and export never accumulate binary floating point error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An unparseable price amount.
///
/// A malformed amount fails the whole conversion rather than being coerced
/// to zero, which would silently corrupt every total computed from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed price amount: {amount:?}")]
pub struct MalformedPriceError {
    /// The offending amount string.
    pub amount: String,
}

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse an upstream decimal string into a money value.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedPriceError`] if the amount is not a decimal
    /// number.
    pub fn parse(
        amount: &str,
        currency_code: impl Into<String>,
    ) -> Result<Self, MalformedPriceError> {
        let parsed = amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| MalformedPriceError {
                amount: amount.to_string(),
            })?;
        Ok(Self {
            amount: parsed,
            currency_code: currency_code.into(),
        })
    }
}

/// Format a decimal amount to two places for display and export.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
