//! Conversions from wire shapes to the core domain types.

use bundleboard_core::{
    CustomAttribute, LineItem, LineItemGroup, Money, OrderView, PageInfo,
};
use chrono::{DateTime, Utc};

use super::wire::{LineItemNode, OrderNode, OrdersData};
use super::{OrderPage, ShopifyError};

/// Convert a fetched orders page.
///
/// # Errors
///
/// Fails on the first malformed price or timestamp; a bad field is never
/// silently zeroed.
pub fn convert_order_page(data: OrdersData) -> Result<OrderPage, ShopifyError> {
    let orders = data
        .orders
        .edges
        .into_iter()
        .map(|edge| convert_order(edge.node))
        .collect::<Result<Vec<_>, _>>()?;

    let info = data.orders.page_info;
    Ok(OrderPage {
        orders,
        page_info: PageInfo {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
        },
    })
}

/// Convert a single order node.
///
/// # Errors
///
/// See [`convert_order_page`].
pub fn convert_order(node: OrderNode) -> Result<OrderView, ShopifyError> {
    let created_at = node
        .created_at
        .parse::<DateTime<Utc>>()
        .map_err(|_| ShopifyError::MalformedTimestamp(node.created_at.clone()))?;
    let total = Money::parse(
        &node.total_price_set.shop_money.amount,
        node.total_price_set.shop_money.currency_code,
    )?;
    let line_items = node
        .line_items
        .edges
        .into_iter()
        .map(|edge| convert_line_item(edge.node))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderView {
        id: node.id,
        name: node.name,
        created_at,
        financial_status: node.display_financial_status,
        fulfillment_status: node.display_fulfillment_status,
        shipping_method: node.shipping_line.map(|line| line.title),
        total,
        line_items,
    })
}

fn convert_line_item(node: LineItemNode) -> Result<LineItem, ShopifyError> {
    let unit_price = Money::parse(
        &node.original_unit_price_set.shop_money.amount,
        node.original_unit_price_set.shop_money.currency_code,
    )?;

    Ok(LineItem {
        id: node.id,
        title: node.title,
        quantity: node.quantity,
        unit_price: unit_price.amount,
        currency_code: unit_price.currency_code,
        group: node.line_item_group.map(|group| LineItemGroup {
            id: group.id,
            title: group.title,
            quantity: group.quantity,
        }),
        custom_attributes: node
            .custom_attributes
            .into_iter()
            .filter_map(|attr| {
                attr.value.map(|value| CustomAttribute {
                    key: attr.key,
                    value,
                })
            })
            .collect(),
    })
}
