//! The order view consumed by display and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bundles::{GroupingResult, LineItem, group_line_items};
use crate::money::Money;

/// An order as returned by the order-fetch collaborator.
///
/// Statuses are kept as raw upstream codes so that values introduced
/// upstream after this build still display (translated codes pass through
/// unchanged, see [`crate::status`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    /// Order ID (e.g. `gid://shopify/Order/123`).
    pub id: String,
    /// Order name (e.g. `#1001`).
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Financial status code.
    pub financial_status: Option<String>,
    /// Fulfillment status code.
    pub fulfillment_status: Option<String>,
    /// Shipping method title, if a shipping line exists.
    pub shipping_method: Option<String>,
    /// Order total.
    pub total: Money,
    /// Line items.
    pub line_items: Vec<LineItem>,
}

impl OrderView {
    /// Trailing numeric ID, for URLs (`gid://shopify/Order/123` → `123`).
    #[must_use]
    pub fn numeric_id(&self) -> &str {
        self.id.split('/').next_back().unwrap_or(&self.id)
    }

    /// Group this order's line items into bundles and standalone products.
    #[must_use]
    pub fn grouped(&self) -> GroupingResult {
        group_line_items(&self.line_items)
    }
}
