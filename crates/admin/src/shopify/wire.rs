//! Wire shapes of the Admin API GraphQL responses.
//!
//! These structs mirror the JSON returned for the order queries in
//! [`super::client`] and exist only to be deserialized; conversion into
//! the core domain types happens in [`super::conversions`].

use serde::Deserialize;

/// `data` payload of the orders list query.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersData {
    pub orders: OrderConnectionWire,
}

/// `data` payload of the single order query.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderData {
    pub order: Option<OrderNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConnectionWire {
    pub edges: Vec<OrderEdge>,
    pub page_info: PageInfoWire,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoWire {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderEdge {
    pub node: OrderNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub display_financial_status: Option<String>,
    pub display_fulfillment_status: Option<String>,
    #[serde(default)]
    pub shipping_line: Option<ShippingLineWire>,
    pub total_price_set: MoneyBagWire,
    pub line_items: LineItemConnectionWire,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingLineWire {
    pub title: String,
}

/// Money in both shop and presentment currencies; only shop money is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBagWire {
    pub shop_money: MoneyWire,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyWire {
    pub amount: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemConnectionWire {
    pub edges: Vec<LineItemEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemEdge {
    pub node: LineItemNode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemNode {
    pub id: String,
    pub title: String,
    pub quantity: i64,
    #[serde(default)]
    pub custom_attributes: Vec<AttributeWire>,
    pub original_unit_price_set: MoneyBagWire,
    #[serde(default)]
    pub line_item_group: Option<LineItemGroupWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributeWire {
    pub key: String,
    /// Attribute values can be null upstream.
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemGroupWire {
    pub id: String,
    pub title: String,
    pub quantity: i64,
}
