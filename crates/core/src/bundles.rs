//! Bundle grouping over order line items.
//!
//! An order's line items may belong to a bundle (a multi-product set sold
//! as one unit) through either of two upstream mechanisms:
//!
//! 1. a structural line-item-group object carried on the line item, or
//! 2. a `bundle_id`/`_bundle_id` custom attribute, optionally paired with
//!    `bundle_name`/`_bundle_name`.
//!
//! Both are resolved by a single [`LineItem::bundle_ref`] with a fixed
//! precedence, and [`group_line_items`] partitions the items into bundle
//! aggregates and standalone products.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structural line-item group, as exposed by the order source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemGroup {
    /// Group ID.
    pub id: String,
    /// Bundle display title.
    pub title: String,
    /// Number of bundle units ordered.
    pub quantity: i64,
}

/// A custom key/value attribute carried on a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// A line item in an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Structural group this item belongs to, if any.
    pub group: Option<LineItemGroup>,
    /// Custom attributes carried on the line item.
    pub custom_attributes: Vec<CustomAttribute>,
}

/// Bundle association resolved for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleRef<'a> {
    /// Structural line-item-group relation.
    Group(&'a LineItemGroup),
    /// Custom-attribute relation.
    Attribute {
        /// Bundle key from `bundle_id`/`_bundle_id`.
        id: &'a str,
        /// Bundle name from `bundle_name`/`_bundle_name`, if present.
        name: Option<&'a str>,
    },
}

impl<'a> BundleRef<'a> {
    /// The key identifying the bundle this reference points at.
    #[must_use]
    pub fn key(&self) -> &'a str {
        match self {
            Self::Group(group) => group.id.as_str(),
            Self::Attribute { id, .. } => id,
        }
    }
}

impl LineItem {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.custom_attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }

    /// Resolve which bundle, if any, this line item belongs to.
    ///
    /// The structural group relation takes precedence over the custom
    /// attribute pair; at most one relation is ever active. Between
    /// attribute keys the unprefixed one wins: `bundle_id` over
    /// `_bundle_id`, and `bundle_name` over `_bundle_name`.
    #[must_use]
    pub fn bundle_ref(&self) -> Option<BundleRef<'_>> {
        if let Some(group) = &self.group {
            return Some(BundleRef::Group(group));
        }
        let id = self
            .attribute("bundle_id")
            .or_else(|| self.attribute("_bundle_id"))?;
        let name = self
            .attribute("bundle_name")
            .or_else(|| self.attribute("_bundle_name"));
        Some(BundleRef::Attribute { id, name })
    }

    /// Line total (`unit_price` × `quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A product entry inside a bundle aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleProduct {
    /// Product title.
    pub title: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// A bundle reassembled from the line items that share its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleAggregate {
    /// Bundle key (group ID or `bundle_id` value).
    pub key: String,
    /// Display name.
    pub name: String,
    /// Number of bundle units, known only for the structural relation.
    pub quantity: Option<i64>,
    /// Constituent products, in encounter order.
    pub products: Vec<BundleProduct>,
    /// Sum of `unit_price` × `quantity` over the constituent products.
    pub total_price: Decimal,
}

impl BundleAggregate {
    /// Total quantity over the constituent products.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// Aggregate under construction, before the display name is settled.
struct PendingBundle {
    key: String,
    /// Display name, once some member has supplied one.
    name: Option<String>,
    /// Structural unit count, once some member has supplied one.
    quantity: Option<i64>,
    products: Vec<BundleProduct>,
    total_price: Decimal,
}

impl PendingBundle {
    fn open(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: None,
            quantity: None,
            products: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Adopt the name and structural quantity from a member's reference.
    ///
    /// The first member to carry a name wins; members without one leave
    /// the fields untouched, so a name supplied by a later member still
    /// lands before the synthesized fallback applies.
    fn absorb(&mut self, bundle_ref: BundleRef<'_>) {
        match bundle_ref {
            BundleRef::Group(group) => {
                if self.name.is_none() {
                    self.name = Some(group.title.clone());
                }
                if self.quantity.is_none() {
                    self.quantity = Some(group.quantity);
                }
            }
            BundleRef::Attribute { name, .. } => {
                if self.name.is_none()
                    && let Some(name) = name
                {
                    self.name = Some(name.to_string());
                }
            }
        }
    }

    /// Settle into the final aggregate, synthesizing `"Bundle {key}"`
    /// when no member supplied a name.
    fn settle(self) -> BundleAggregate {
        let name = self
            .name
            .unwrap_or_else(|| format!("Bundle {}", self.key));
        BundleAggregate {
            key: self.key,
            name,
            quantity: self.quantity,
            products: self.products,
            total_price: self.total_price,
        }
    }
}

/// A line item sold outside any bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandaloneProduct {
    /// Product title.
    pub title: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
    /// `unit_price` × `quantity`.
    pub total_price: Decimal,
}

/// Result of grouping one order's line items.
///
/// Every input line item lands in exactly one place: inside exactly one
/// bundle's products, or as exactly one standalone product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupingResult {
    /// Bundles, in first-seen-key order.
    pub bundles: Vec<BundleAggregate>,
    /// Standalone products, in input order.
    pub standalone_products: Vec<StandaloneProduct>,
}

impl GroupingResult {
    /// Whether nothing was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty() && self.standalone_products.is_empty()
    }

    /// Number of display entries (bundles plus standalone products).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.bundles.len() + self.standalone_products.len()
    }
}

/// Partition line items into bundles and standalone products.
///
/// Deterministic and total: the empty sequence yields the empty result,
/// bundles come back in first-seen-key order and standalone products in
/// input order. A tagged line item with zero quantity still contributes a
/// product entry (and zero to the total), so the bundle displays complete.
#[must_use]
pub fn group_line_items(line_items: &[LineItem]) -> GroupingResult {
    let mut bundles: Vec<PendingBundle> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut standalone_products = Vec::new();

    for item in line_items {
        if let Some(bundle_ref) = item.bundle_ref() {
            let key = bundle_ref.key();
            let slot = *index.entry(key.to_string()).or_insert_with(|| {
                bundles.push(PendingBundle::open(key));
                bundles.len() - 1
            });
            let bundle = &mut bundles[slot];
            bundle.absorb(bundle_ref);
            bundle.products.push(BundleProduct {
                title: item.title.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
            bundle.total_price += item.line_total();
        } else {
            standalone_products.push(StandaloneProduct {
                title: item.title.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total_price: item.line_total(),
            });
        }
    }

    GroupingResult {
        bundles: bundles.into_iter().map(PendingBundle::settle).collect(),
        standalone_products,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(title: &str, quantity: i64, price: &str) -> LineItem {
        LineItem {
            id: format!("gid://shopify/LineItem/{title}"),
            title: title.to_string(),
            quantity,
            unit_price: price.parse().unwrap(),
            currency_code: "EUR".to_string(),
            group: None,
            custom_attributes: Vec::new(),
        }
    }

    fn tagged(title: &str, quantity: i64, price: &str, attrs: &[(&str, &str)]) -> LineItem {
        let mut line_item = item(title, quantity, price);
        line_item.custom_attributes = attrs
            .iter()
            .map(|(key, value)| CustomAttribute {
                key: (*key).to_string(),
                value: (*value).to_string(),
            })
            .collect();
        line_item
    }

    fn grouped(title: &str, quantity: i64, price: &str, group: LineItemGroup) -> LineItem {
        let mut line_item = item(title, quantity, price);
        line_item.group = Some(group);
        line_item
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = group_line_items(&[]);
        assert!(result.is_empty());
        assert_eq!(result.entry_count(), 0);
    }

    #[test]
    fn test_attribute_grouping_worked_example() {
        // Shirt×2 @10.00 and Hat×1 @5.00 share bundle B1; Socks×3 @2.00
        // stands alone.
        let items = vec![
            tagged("Shirt", 2, "10.00", &[("bundle_id", "B1")]),
            tagged(
                "Hat",
                1,
                "5.00",
                &[("bundle_id", "B1"), ("bundle_name", "Summer Set")],
            ),
            item("Socks", 3, "2.00"),
        ];

        let result = group_line_items(&items);

        assert_eq!(result.bundles.len(), 1);
        let bundle = &result.bundles[0];
        assert_eq!(bundle.key, "B1");
        assert_eq!(bundle.name, "Summer Set");
        assert_eq!(bundle.quantity, None);
        assert_eq!(bundle.products.len(), 2);
        assert_eq!(bundle.products[0].title, "Shirt");
        assert_eq!(bundle.products[0].quantity, 2);
        assert_eq!(bundle.products[1].title, "Hat");
        assert_eq!(bundle.total_price, "25.00".parse().unwrap());

        assert_eq!(result.standalone_products.len(), 1);
        let socks = &result.standalone_products[0];
        assert_eq!(socks.title, "Socks");
        assert_eq!(socks.total_price, "6.00".parse().unwrap());
    }

    #[test]
    fn test_structural_grouping() {
        let group = LineItemGroup {
            id: "gid://shopify/LineItemGroup/7".to_string(),
            title: "Coffret Découverte".to_string(),
            quantity: 2,
        };
        let items = vec![
            grouped("Savon", 2, "4.50", group.clone()),
            grouped("Bougie", 2, "8.00", group),
            item("Carte cadeau", 1, "20.00"),
        ];

        let result = group_line_items(&items);

        assert_eq!(result.bundles.len(), 1);
        let bundle = &result.bundles[0];
        assert_eq!(bundle.name, "Coffret Découverte");
        assert_eq!(bundle.quantity, Some(2));
        assert_eq!(bundle.total_quantity(), 4);
        assert_eq!(bundle.total_price, "25.00".parse().unwrap());
        assert_eq!(result.standalone_products.len(), 1);
    }

    #[test]
    fn test_structural_relation_wins_over_attributes() {
        let group = LineItemGroup {
            id: "G1".to_string(),
            title: "Structural".to_string(),
            quantity: 1,
        };
        let mut line_item = tagged("Twice tagged", 1, "1.00", &[("bundle_id", "A1")]);
        line_item.group = Some(group);

        let result = group_line_items(&[line_item]);

        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.bundles[0].key, "G1");
        assert_eq!(result.bundles[0].name, "Structural");
    }

    #[test]
    fn test_unprefixed_attribute_keys_win() {
        let items = vec![tagged(
            "Gourde",
            1,
            "12.00",
            &[
                ("_bundle_id", "hidden"),
                ("bundle_id", "visible"),
                ("_bundle_name", "Hidden Name"),
                ("bundle_name", "Visible Name"),
            ],
        )];

        let result = group_line_items(&items);

        assert_eq!(result.bundles[0].key, "visible");
        assert_eq!(result.bundles[0].name, "Visible Name");
    }

    #[test]
    fn test_prefixed_attribute_keys_recognized() {
        let items = vec![tagged(
            "Tapis",
            1,
            "30.00",
            &[("_bundle_id", "B9"), ("_bundle_name", "Pack Yoga")],
        )];

        let result = group_line_items(&items);

        assert_eq!(result.bundles[0].key, "B9");
        assert_eq!(result.bundles[0].name, "Pack Yoga");
    }

    #[test]
    fn test_bundle_name_falls_back_to_synthesized() {
        let items = vec![tagged("Bol", 1, "6.00", &[("bundle_id", "B42")])];

        let result = group_line_items(&items);

        assert_eq!(result.bundles[0].name, "Bundle B42");
    }

    #[test]
    fn test_bundles_in_first_seen_order() {
        let items = vec![
            tagged("a", 1, "1.00", &[("bundle_id", "Z")]),
            tagged("b", 1, "1.00", &[("bundle_id", "A")]),
            tagged("c", 1, "1.00", &[("bundle_id", "Z")]),
            tagged("d", 1, "1.00", &[("bundle_id", "M")]),
        ];

        let result = group_line_items(&items);

        let keys: Vec<&str> = result.bundles.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["Z", "A", "M"]);
        assert_eq!(result.bundles[0].products.len(), 2);
    }

    #[test]
    fn test_zero_quantity_member_is_retained() {
        let items = vec![
            tagged("Visible", 1, "10.00", &[("bundle_id", "B1")]),
            tagged("Offert", 0, "5.00", &[("bundle_id", "B1")]),
        ];

        let result = group_line_items(&items);

        let bundle = &result.bundles[0];
        assert_eq!(bundle.products.len(), 2);
        assert_eq!(bundle.products[1].quantity, 0);
        assert_eq!(bundle.total_price, "10.00".parse().unwrap());
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let items = vec![
            tagged("a", 1, "1.00", &[("bundle_id", "X")]),
            item("b", 2, "2.00"),
            tagged("c", 3, "3.00", &[("_bundle_id", "Y")]),
            item("d", 4, "4.00"),
            tagged("e", 5, "5.00", &[("bundle_id", "X")]),
        ];

        let result = group_line_items(&items);

        let bundled: usize = result.bundles.iter().map(|b| b.products.len()).sum();
        assert_eq!(bundled + result.standalone_products.len(), items.len());
    }

    #[test]
    fn test_total_conservation() {
        let items = vec![
            tagged("a", 3, "19.99", &[("bundle_id", "X")]),
            item("b", 2, "0.01"),
            tagged("c", 1, "100.50", &[("bundle_id", "Y")]),
            item("d", 7, "3.33"),
        ];

        let input_total: Decimal = items.iter().map(LineItem::line_total).sum();
        let result = group_line_items(&items);
        let output_total: Decimal = result
            .bundles
            .iter()
            .map(|b| b.total_price)
            .chain(result.standalone_products.iter().map(|p| p.total_price))
            .sum();

        assert_eq!(input_total, output_total);
    }

    #[test]
    fn test_grouping_is_deterministic() {
        let items = vec![
            tagged("a", 1, "1.00", &[("bundle_id", "B2")]),
            tagged("b", 1, "2.00", &[("bundle_id", "B1")]),
            item("c", 1, "3.00"),
        ];

        assert_eq!(group_line_items(&items), group_line_items(&items));
    }
}
