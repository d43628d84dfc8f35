//! Integration tests for Bundleboard.
//!
//! The tests in `tests/` drive the full path an order page takes through
//! the application without a live store: a captured Admin API JSON
//! response is deserialized into the wire types, converted into the core
//! domain, grouped, filtered and exported.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bundleboard-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};

/// Wire-shaped line item tagged with the `bundle_id` attribute pair.
#[must_use]
pub fn attribute_line_item(
    id: u64,
    title: &str,
    quantity: i64,
    amount: &str,
    bundle: Option<(&str, Option<&str>)>,
) -> Value {
    let custom_attributes = bundle.map_or_else(
        || json!([]),
        |(bundle_id, bundle_name)| {
            let mut attrs = vec![json!({ "key": "bundle_id", "value": bundle_id })];
            if let Some(name) = bundle_name {
                attrs.push(json!({ "key": "bundle_name", "value": name }));
            }
            Value::Array(attrs)
        },
    );

    json!({
        "node": {
            "id": format!("gid://shopify/LineItem/{id}"),
            "title": title,
            "quantity": quantity,
            "customAttributes": custom_attributes,
            "originalUnitPriceSet": {
                "shopMoney": { "amount": amount, "currencyCode": "EUR" }
            },
            "lineItemGroup": null
        }
    })
}

/// Wire-shaped line item belonging to a structural line-item group.
#[must_use]
pub fn grouped_line_item(
    id: u64,
    title: &str,
    quantity: i64,
    amount: &str,
    group_id: &str,
    group_title: &str,
    group_quantity: i64,
) -> Value {
    json!({
        "node": {
            "id": format!("gid://shopify/LineItem/{id}"),
            "title": title,
            "quantity": quantity,
            "customAttributes": [],
            "originalUnitPriceSet": {
                "shopMoney": { "amount": amount, "currencyCode": "EUR" }
            },
            "lineItemGroup": {
                "id": group_id,
                "title": group_title,
                "quantity": group_quantity
            }
        }
    })
}

/// Wire-shaped order node.
#[must_use]
pub fn order_node(
    id: u64,
    name: &str,
    financial_status: &str,
    fulfillment_status: &str,
    total: &str,
    line_items: Vec<Value>,
) -> Value {
    json!({
        "node": {
            "id": format!("gid://shopify/Order/{id}"),
            "name": name,
            "createdAt": "2026-03-14T09:30:00Z",
            "displayFinancialStatus": financial_status,
            "displayFulfillmentStatus": fulfillment_status,
            "shippingLine": { "title": "Livraison standard" },
            "totalPriceSet": {
                "shopMoney": { "amount": total, "currencyCode": "EUR" }
            },
            "lineItems": { "edges": line_items }
        }
    })
}

/// Wire-shaped `data` payload for the orders list query.
#[must_use]
pub fn orders_response(edges: Vec<Value>, has_next_page: bool, has_previous_page: bool) -> Value {
    json!({
        "orders": {
            "edges": edges,
            "pageInfo": {
                "hasNextPage": has_next_page,
                "hasPreviousPage": has_previous_page,
                "startCursor": "cursor-first",
                "endCursor": "cursor-last"
            }
        }
    })
}
