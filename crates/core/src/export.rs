//! CSV export of grouped orders.
//!
//! The report is consumed by spreadsheet software configured for French
//! locales: `;` as the field delimiter, a UTF-8 byte-order mark so the
//! character set is detected, and one row per bundle or standalone
//! product per order.

use chrono::NaiveDate;

use crate::money::format_amount;
use crate::orders::OrderView;
use crate::status::{translate_financial_status, translate_fulfillment_status};

const BOM: &str = "\u{feff}";
const DELIMITER: char = ';';

/// Group-name column value for a product sold outside any bundle.
const STANDALONE_LABEL: &str = "Produit seul";
/// Shipping-method column value when the order has no shipping line.
const UNSPECIFIED_SHIPPING: &str = "Non spécifié";

const HEADERS: [&str; 10] = [
    "Numéro de commande",
    "Date",
    "Statut paiement",
    "Statut livraison",
    "Mode de livraison",
    "Nom du bundle",
    "Produits du bundle",
    "Quantité totale",
    "Prix total",
    "Devise",
];

/// Serialize the grouped order view into the CSV report.
///
/// The header row is always emitted, even for zero orders. Per order,
/// bundle rows come first (in first-seen order) followed by standalone
/// product rows (in input order); an order with 2 bundles and 1 standalone
/// product yields 3 rows.
#[must_use]
pub fn export_orders(orders: &[OrderView]) -> String {
    let mut out = String::from(BOM);
    push_row(&mut out, HEADERS.map(String::from));

    for order in orders {
        let date = order.created_at.format("%d/%m/%Y").to_string();
        let payment_status = order
            .financial_status
            .as_deref()
            .map(translate_financial_status)
            .unwrap_or_default()
            .to_string();
        let fulfillment_status = order
            .fulfillment_status
            .as_deref()
            .map(translate_fulfillment_status)
            .unwrap_or_default()
            .to_string();
        let shipping_method = order
            .shipping_method
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_SHIPPING.to_string());
        let currency = order.total.currency_code.clone();

        let grouped = order.grouped();

        for bundle in &grouped.bundles {
            let products = bundle
                .products
                .iter()
                .map(|p| format!("{} (x{})", p.title, p.quantity))
                .collect::<Vec<_>>()
                .join(", ");
            push_row(
                &mut out,
                [
                    order.name.clone(),
                    date.clone(),
                    payment_status.clone(),
                    fulfillment_status.clone(),
                    shipping_method.clone(),
                    bundle.name.clone(),
                    products,
                    bundle.total_quantity().to_string(),
                    format_amount(bundle.total_price),
                    currency.clone(),
                ],
            );
        }

        for product in &grouped.standalone_products {
            push_row(
                &mut out,
                [
                    order.name.clone(),
                    date.clone(),
                    payment_status.clone(),
                    fulfillment_status.clone(),
                    shipping_method.clone(),
                    STANDALONE_LABEL.to_string(),
                    format!("{} (x{})", product.title, product.quantity),
                    product.quantity.to_string(),
                    format_amount(product.total_price),
                    currency.clone(),
                ],
            );
        }
    }

    out
}

/// Date-stamped download filename (`commandes_bundles_<ISO-date>.csv`).
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("commandes_bundles_{date}.csv")
}

fn push_row<const N: usize>(out: &mut String, fields: [String; N]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

/// Quote a field containing the delimiter, a double quote or a newline,
/// doubling internal quotes.
fn escape_field(field: &str) -> String {
    if field.contains(DELIMITER) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
