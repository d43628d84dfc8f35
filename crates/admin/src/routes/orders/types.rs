//! Type definitions and conversions for order views.

use bundleboard_core::{
    BundleAggregate, Direction, FinancialStatus, FulfillmentStatus, GroupingResult, OrderView,
    PageState, StandaloneProduct, money::format_amount, translate_financial_status,
    translate_fulfillment_status,
};
use chrono::NaiveDate;
use serde::Deserialize;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for the orders list.
///
/// This is the external URL contract: `cursor`, `direction` (`next`|`prev`),
/// `query`, `status`, `paymentStatus`, `dateFrom`, `dateTo` (ISO dates,
/// inclusive bounds). Everything arrives as raw strings: form submissions
/// send empty values for untouched fields, and unknown or unparseable
/// filter values degrade to "no filter" rather than rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Cursor for pagination.
    pub cursor: Option<String>,
    /// Paging direction relative to the cursor (`next`|`prev`).
    pub direction: Option<String>,
    /// Free-text search on the order name.
    pub query: Option<String>,
    /// Fulfillment status filter code.
    pub status: Option<String>,
    /// Financial status filter code.
    #[serde(rename = "paymentStatus")]
    pub payment_status: Option<String>,
    /// Created date lower bound, inclusive (ISO date).
    #[serde(rename = "dateFrom")]
    pub date_from: Option<String>,
    /// Created date upper bound, inclusive (ISO date).
    #[serde(rename = "dateTo")]
    pub date_to: Option<String>,
}

impl OrdersQuery {
    /// Assemble the page state carried by this URL.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        let direction = if self.direction.as_deref() == Some("prev") {
            Direction::Previous
        } else {
            Direction::Next
        };

        PageState {
            cursor: self.cursor.clone().filter(|c| !c.is_empty()),
            direction,
            query: self.query.clone().filter(|q| !q.is_empty()),
            status: self
                .status
                .as_deref()
                .and_then(FulfillmentStatus::from_code),
            payment_status: self
                .payment_status
                .as_deref()
                .and_then(FinancialStatus::from_code),
            date_from: parse_date(self.date_from.as_deref()),
            date_to: parse_date(self.date_to.as_deref()),
        }
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| v.parse().ok())
}

// =============================================================================
// URL Building
// =============================================================================

fn state_params(state: &PageState, include_cursor: bool) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if include_cursor && let Some(cursor) = &state.cursor {
        params.push(("cursor", cursor.clone()));
        params.push(("direction", state.direction.as_str().to_string()));
    }
    if let Some(query) = &state.query {
        params.push(("query", query.clone()));
    }
    if let Some(status) = state.status {
        params.push(("status", status.code().to_string()));
    }
    if let Some(status) = state.payment_status {
        params.push(("paymentStatus", status.code().to_string()));
    }
    if let Some(from) = state.date_from {
        params.push(("dateFrom", from.to_string()));
    }
    if let Some(to) = state.date_to {
        params.push(("dateTo", to.to_string()));
    }
    params
}

fn url_with_params(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let encoded: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    format!("{path}?{}", encoded.join("&"))
}

/// URL of the orders list for a page state (cursor included).
#[must_use]
pub fn list_url(state: &PageState) -> String {
    url_with_params("/orders", &state_params(state, true))
}

/// URL of the CSV export for the currently displayed page.
#[must_use]
pub fn export_url(state: &PageState) -> String {
    url_with_params("/orders/export.csv", &state_params(state, true))
}

// =============================================================================
// Table View Types
// =============================================================================

/// One selectable value in a status filter dropdown.
#[derive(Debug, Clone)]
pub struct FilterOption {
    /// URL parameter value (the upstream status code).
    pub value: &'static str,
    /// French display label.
    pub label: &'static str,
    /// Whether this value is currently selected.
    pub selected: bool,
}

/// The fulfillment status choices offered by the list filter.
#[must_use]
pub fn status_options(selected: Option<FulfillmentStatus>) -> Vec<FilterOption> {
    [
        FulfillmentStatus::Unfulfilled,
        FulfillmentStatus::PartiallyFulfilled,
        FulfillmentStatus::Fulfilled,
    ]
    .into_iter()
    .map(|status| FilterOption {
        value: status.code(),
        label: status.label(),
        selected: selected == Some(status),
    })
    .collect()
}

/// The payment status choices offered by the list filter.
#[must_use]
pub fn payment_status_options(selected: Option<FinancialStatus>) -> Vec<FilterOption> {
    [
        FinancialStatus::Pending,
        FinancialStatus::Authorized,
        FinancialStatus::Paid,
        FinancialStatus::PartiallyPaid,
        FinancialStatus::Refunded,
        FinancialStatus::PartiallyRefunded,
        FinancialStatus::Voided,
    ]
    .into_iter()
    .map(|status| FilterOption {
        value: status.code(),
        label: status.label(),
        selected: selected == Some(status),
    })
    .collect()
}

/// Order view for the list table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    /// Detail page URL.
    pub detail_url: String,
    /// Deep link into the Shopify admin.
    pub admin_url: String,
    /// Order name (e.g., "#1001").
    pub name: String,
    /// Creation date, fr-FR formatted.
    pub created_at: String,
    /// Payment status label.
    pub payment_status: String,
    /// Payment status badge class.
    pub payment_badge: String,
    /// Fulfillment status label.
    pub fulfillment_status: String,
    /// Fulfillment status badge class.
    pub fulfillment_badge: String,
    /// Shipping method (or the unspecified placeholder).
    pub shipping_method: String,
    /// Line item count label (e.g., "3 produits").
    pub items_label: String,
    /// Total with currency.
    pub total: String,
}

impl OrderRowView {
    /// Build a table row from an order.
    #[must_use]
    pub fn build(order: &OrderView, shop: &str) -> Self {
        let numeric_id = order.numeric_id();
        let financial_code = order.financial_status.as_deref().unwrap_or_default();
        let fulfillment_code = order.fulfillment_status.as_deref().unwrap_or_default();
        let item_count = order.line_items.len();

        Self {
            detail_url: format!("/orders/{numeric_id}"),
            admin_url: format!("https://{shop}/admin/orders/{numeric_id}"),
            name: order.name.clone(),
            created_at: order.created_at.format("%d/%m/%Y").to_string(),
            payment_status: translate_financial_status(financial_code).to_string(),
            payment_badge: payment_badge_class(financial_code).to_string(),
            fulfillment_status: translate_fulfillment_status(fulfillment_code).to_string(),
            fulfillment_badge: fulfillment_badge_class(fulfillment_code).to_string(),
            shipping_method: order
                .shipping_method
                .clone()
                .unwrap_or_else(|| "Non spécifié".to_string()),
            items_label: format!(
                "{item_count} produit{}",
                if item_count > 1 { "s" } else { "" }
            ),
            total: format!(
                "{} {}",
                format_amount(order.total.amount),
                order.total.currency_code
            ),
        }
    }
}

fn payment_badge_class(code: &str) -> &'static str {
    match code {
        "PAID" => "badge badge-success",
        "PENDING" => "badge badge-info",
        _ => "badge badge-attention",
    }
}

fn fulfillment_badge_class(code: &str) -> &'static str {
    if code == "FULFILLED" {
        "badge badge-success"
    } else {
        "badge badge-attention"
    }
}

// =============================================================================
// Detail View Types
// =============================================================================

/// One grouped entry on the detail page: a bundle or a standalone product.
#[derive(Debug, Clone)]
pub struct ProductEntryView {
    /// Whether this entry is a bundle.
    pub is_bundle: bool,
    /// Bundle name or product title.
    pub name: String,
    /// Quantity suffix (e.g., " × 2"), empty when unknown.
    pub quantity: String,
    /// Constituent product titles, empty for standalone entries.
    pub products: String,
    /// Entry total with currency.
    pub total: String,
}

impl ProductEntryView {
    fn from_bundle(bundle: &BundleAggregate, currency: &str) -> Self {
        Self {
            is_bundle: true,
            name: bundle.name.clone(),
            quantity: bundle.quantity.map_or_else(String::new, |q| format!(" × {q}")),
            products: bundle
                .products
                .iter()
                .map(|p| p.title.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            total: format!("{} {currency}", format_amount(bundle.total_price)),
        }
    }

    fn from_standalone(product: &StandaloneProduct, currency: &str) -> Self {
        Self {
            is_bundle: false,
            name: product.title.clone(),
            quantity: format!(" × {}", product.quantity),
            products: String::new(),
            total: format!("{} {currency}", format_amount(product.total_price)),
        }
    }
}

/// Order detail view for the template.
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    /// Order name.
    pub name: String,
    /// Creation date, fr-FR formatted.
    pub created_at: String,
    /// Payment status label.
    pub payment_status: String,
    /// Fulfillment status label.
    pub fulfillment_status: String,
    /// Fulfillment status badge class.
    pub fulfillment_badge: String,
    /// Order total with currency.
    pub total: String,
    /// Grouped entries: bundles first, then standalone products.
    pub entries: Vec<ProductEntryView>,
    /// Number of grouped entries.
    pub entry_count: usize,
}

impl OrderDetailView {
    /// Build the detail view from an order and its grouping.
    #[must_use]
    pub fn build(order: &OrderView, grouped: &GroupingResult) -> Self {
        let currency = order.total.currency_code.as_str();
        let fulfillment_code = order.fulfillment_status.as_deref().unwrap_or_default();
        let entries: Vec<ProductEntryView> = grouped
            .bundles
            .iter()
            .map(|bundle| ProductEntryView::from_bundle(bundle, currency))
            .chain(
                grouped
                    .standalone_products
                    .iter()
                    .map(|product| ProductEntryView::from_standalone(product, currency)),
            )
            .collect();

        Self {
            name: order.name.clone(),
            created_at: order.created_at.format("%d/%m/%Y").to_string(),
            payment_status: translate_financial_status(
                order.financial_status.as_deref().unwrap_or_default(),
            )
            .to_string(),
            fulfillment_status: translate_fulfillment_status(fulfillment_code).to_string(),
            fulfillment_badge: fulfillment_badge_class(fulfillment_code).to_string(),
            total: format!(
                "{} {}",
                format_amount(order.total.amount),
                order.total.currency_code
            ),
            entries,
            entry_count: grouped.entry_count(),
        }
    }
}
