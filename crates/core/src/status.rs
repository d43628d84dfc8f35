//! Order status codes and their French display labels.
//!
//! The upstream API reports statuses as SCREAMING_SNAKE_CASE codes. Known
//! codes translate to the merchant-facing French labels below; unknown
//! codes pass through unchanged so that new upstream values degrade to
//! their raw code instead of failing.

use serde::{Deserialize, Serialize};

/// Order financial (payment) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialStatus {
    /// No payment captured yet.
    Pending,
    /// Payment has been authorized but not captured.
    Authorized,
    /// Payment has been captured.
    Paid,
    /// Payment has been partially paid.
    PartiallyPaid,
    /// Payment has been partially refunded.
    PartiallyRefunded,
    /// Payment has been refunded.
    Refunded,
    /// Payment has been voided.
    Voided,
    /// Authorization has expired.
    Expired,
}

impl FinancialStatus {
    /// Parse an upstream status code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(Self::Pending),
            "AUTHORIZED" => Some(Self::Authorized),
            "PAID" => Some(Self::Paid),
            "PARTIALLY_PAID" => Some(Self::PartiallyPaid),
            "PARTIALLY_REFUNDED" => Some(Self::PartiallyRefunded),
            "REFUNDED" => Some(Self::Refunded),
            "VOIDED" => Some(Self::Voided),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }

    /// The upstream status code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Authorized => "AUTHORIZED",
            Self::Paid => "PAID",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::PartiallyRefunded => "PARTIALLY_REFUNDED",
            Self::Refunded => "REFUNDED",
            Self::Voided => "VOIDED",
            Self::Expired => "EXPIRED",
        }
    }

    /// French display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "En attente",
            Self::Authorized => "Autorisé",
            Self::Paid => "Payé",
            Self::PartiallyPaid => "Partiellement payé",
            Self::PartiallyRefunded => "Partiellement remboursé",
            Self::Refunded => "Remboursé",
            Self::Voided => "Annulé",
            Self::Expired => "Expiré",
        }
    }
}

/// Order fulfillment (delivery) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentStatus {
    /// No items have been fulfilled.
    Unfulfilled,
    /// Some items have been fulfilled.
    PartiallyFulfilled,
    /// All items have been fulfilled.
    Fulfilled,
    /// Scheduled for fulfillment.
    Scheduled,
    /// Fulfillment is on hold.
    OnHold,
}

impl FulfillmentStatus {
    /// Parse an upstream status code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "UNFULFILLED" => Some(Self::Unfulfilled),
            "PARTIALLY_FULFILLED" => Some(Self::PartiallyFulfilled),
            "FULFILLED" => Some(Self::Fulfilled),
            "SCHEDULED" => Some(Self::Scheduled),
            "ON_HOLD" => Some(Self::OnHold),
            _ => None,
        }
    }

    /// The upstream status code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unfulfilled => "UNFULFILLED",
            Self::PartiallyFulfilled => "PARTIALLY_FULFILLED",
            Self::Fulfilled => "FULFILLED",
            Self::Scheduled => "SCHEDULED",
            Self::OnHold => "ON_HOLD",
        }
    }

    /// French display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unfulfilled => "Non traitée",
            Self::PartiallyFulfilled => "Partiellement traitée",
            Self::Fulfilled => "Traitée",
            Self::Scheduled => "Planifiée",
            Self::OnHold => "En attente",
        }
    }
}

/// Translate a financial status code; unknown codes pass through unchanged.
#[must_use]
pub fn translate_financial_status(code: &str) -> &str {
    match FinancialStatus::from_code(code) {
        Some(status) => status.label(),
        None => code,
    }
}

/// Translate a fulfillment status code; unknown codes pass through unchanged.
#[must_use]
pub fn translate_fulfillment_status(code: &str) -> &str {
    match FulfillmentStatus::from_code(code) {
        Some(status) => status.label(),
        None => code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_labels() {
        assert_eq!(translate_financial_status("PAID"), "Payé");
        assert_eq!(translate_financial_status("PENDING"), "En attente");
        assert_eq!(
            translate_financial_status("PARTIALLY_REFUNDED"),
            "Partiellement remboursé"
        );
        assert_eq!(translate_financial_status("VOIDED"), "Annulé");
        assert_eq!(translate_financial_status("EXPIRED"), "Expiré");
    }

    #[test]
    fn test_fulfillment_labels() {
        assert_eq!(translate_fulfillment_status("UNFULFILLED"), "Non traitée");
        assert_eq!(translate_fulfillment_status("FULFILLED"), "Traitée");
        assert_eq!(translate_fulfillment_status("ON_HOLD"), "En attente");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        assert_eq!(translate_financial_status("SOME_NEW_STATE"), "SOME_NEW_STATE");
        assert_eq!(translate_fulfillment_status("IN_TRANSIT"), "IN_TRANSIT");
        assert_eq!(translate_fulfillment_status(""), "");
    }

    #[test]
    fn test_code_round_trip() {
        for status in [
            FinancialStatus::Pending,
            FinancialStatus::Authorized,
            FinancialStatus::Paid,
            FinancialStatus::PartiallyPaid,
            FinancialStatus::PartiallyRefunded,
            FinancialStatus::Refunded,
            FinancialStatus::Voided,
            FinancialStatus::Expired,
        ] {
            assert_eq!(FinancialStatus::from_code(status.code()), Some(status));
        }
        for status in [
            FulfillmentStatus::Unfulfilled,
            FulfillmentStatus::PartiallyFulfilled,
            FulfillmentStatus::Fulfilled,
            FulfillmentStatus::Scheduled,
            FulfillmentStatus::OnHold,
        ] {
            assert_eq!(FulfillmentStatus::from_code(status.code()), Some(status));
        }
    }
}
