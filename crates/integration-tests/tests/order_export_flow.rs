//! End-to-end flow over a captured order page: wire JSON → domain
//! conversion → client-side filtering → grouping → CSV export.

#![allow(clippy::unwrap_used)]

use bundleboard_admin::shopify::conversions::convert_order_page;
use bundleboard_admin::shopify::wire::OrdersData;
use bundleboard_core::{
    FinancialStatus, FulfillmentStatus, NavigationAction, PageState, export_orders, filter_orders,
    group_line_items,
};
use bundleboard_integration_tests::{
    attribute_line_item, grouped_line_item, order_node, orders_response,
};
use rust_decimal::Decimal;

fn two_order_page() -> OrdersData {
    // Order A: one attribute bundle of 2 products plus 1 standalone item.
    let order_a = order_node(
        1001,
        "#1001",
        "PAID",
        "UNFULFILLED",
        "31.00",
        vec![
            attribute_line_item(1, "Shirt", 2, "10.00", Some(("B1", None))),
            attribute_line_item(2, "Hat", 1, "5.00", Some(("B1", Some("Summer Set")))),
            attribute_line_item(3, "Socks", 3, "2.00", None),
        ],
    );
    // Order B: one structural bundle only.
    let order_b = order_node(
        1002,
        "#1002",
        "PENDING",
        "FULFILLED",
        "17.00",
        vec![
            grouped_line_item(4, "Savon", 2, "4.50", "gid://shopify/LineItemGroup/7", "Coffret Découverte", 1),
            grouped_line_item(5, "Bougie", 1, "8.00", "gid://shopify/LineItemGroup/7", "Coffret Découverte", 1),
        ],
    );

    serde_json::from_value(orders_response(vec![order_a, order_b], true, false)).unwrap()
}

#[test]
fn test_wire_page_converts_and_groups() {
    let page = convert_order_page(two_order_page()).unwrap();

    assert_eq!(page.orders.len(), 2);
    assert!(page.page_info.has_next_page);
    assert!(!page.page_info.has_previous_page);

    let grouped_a = page.orders[0].grouped();
    assert_eq!(grouped_a.bundles.len(), 1);
    assert_eq!(grouped_a.bundles[0].name, "Summer Set");
    assert_eq!(grouped_a.standalone_products.len(), 1);

    let grouped_b = page.orders[1].grouped();
    assert_eq!(grouped_b.bundles.len(), 1);
    assert_eq!(grouped_b.bundles[0].name, "Coffret Découverte");
    assert_eq!(grouped_b.bundles[0].quantity, Some(1));
    assert!(grouped_b.standalone_products.is_empty());
}

#[test]
fn test_partition_and_totals_survive_the_full_path() {
    let page = convert_order_page(two_order_page()).unwrap();

    for order in &page.orders {
        let grouped = group_line_items(&order.line_items);

        let placed: usize = grouped.bundles.iter().map(|b| b.products.len()).sum::<usize>()
            + grouped.standalone_products.len();
        assert_eq!(placed, order.line_items.len());

        let input_total: Decimal = order.line_items.iter().map(|li| li.line_total()).sum();
        let output_total: Decimal = grouped
            .bundles
            .iter()
            .map(|b| b.total_price)
            .chain(grouped.standalone_products.iter().map(|p| p.total_price))
            .sum();
        assert_eq!(input_total, output_total);
    }
}

#[test]
fn test_client_side_filter_shrinks_page_but_not_page_info() {
    let page = convert_order_page(two_order_page()).unwrap();
    let state = PageState {
        status: Some(FulfillmentStatus::Fulfilled),
        ..PageState::default()
    };

    let filtered = filter_orders(page.orders, &state);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "#1002");
    // Pagination availability still comes from upstream, not the row count.
    assert!(page.page_info.has_next_page);

    let next = state.apply(NavigationAction::Next, &page.page_info);
    assert_eq!(next.cursor.as_deref(), Some("cursor-last"));
}

#[test]
fn test_filter_change_after_navigation_restarts_pagination() {
    let page = convert_order_page(two_order_page()).unwrap();
    let state = PageState::default().apply(NavigationAction::Next, &page.page_info);
    assert!(state.cursor.is_some());

    let state = state.apply(
        NavigationAction::SetPaymentStatus(Some(FinancialStatus::Paid)),
        &page.page_info,
    );
    assert_eq!(state.cursor, None);
    assert_eq!(state.payment_status, Some(FinancialStatus::Paid));
}

#[test]
fn test_export_shape_over_the_fixture() {
    let page = convert_order_page(two_order_page()).unwrap();
    let csv = export_orders(&page.orders);

    assert!(csv.starts_with('\u{feff}'));

    let lines: Vec<&str> = csv.lines().collect();
    // 1 header + order A (1 bundle + 1 standalone) + order B (1 bundle).
    assert_eq!(lines.len(), 4);

    let bundle_row: Vec<&str> = lines[1].split(';').collect();
    assert_eq!(bundle_row[0], "#1001");
    assert_eq!(bundle_row[2], "Payé");
    assert_eq!(bundle_row[4], "Livraison standard");
    assert_eq!(bundle_row[5], "Summer Set");
    assert_eq!(bundle_row[6], "Shirt (x2), Hat (x1)");
    assert_eq!(bundle_row[7], "3");
    assert_eq!(bundle_row[8], "25.00");

    let standalone_row: Vec<&str> = lines[2].split(';').collect();
    assert_eq!(standalone_row[5], "Produit seul");
    assert_eq!(standalone_row[7], "3");
    assert_eq!(standalone_row[8], "6.00");

    let structural_row: Vec<&str> = lines[3].split(';').collect();
    assert_eq!(structural_row[0], "#1002");
    assert_eq!(structural_row[3], "Traitée");
    assert_eq!(structural_row[5], "Coffret Découverte");
    assert_eq!(structural_row[6], "Savon (x2), Bougie (x1)");
    assert_eq!(structural_row[8], "17.00");
}
