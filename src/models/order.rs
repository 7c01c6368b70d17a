//! Order records as returned by `GET /api/orders/{id}`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A placed order with shipping, payment, and item details.
///
/// Prices are kept as exact decimals so the amount handed to the payment
/// provider matches the backend's number text digit for digit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<String>,
    pub payment_method: String,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    /// The backend stores this as `itemsPrice`; older payloads use `itemPrice`.
    #[serde(alias = "itemPrice")]
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub tax_price: Decimal,
    pub total_price: Decimal,
}

/// Where the order ships.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Single-line postal form: `address, city, postal code, country`.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.address, self.city, self.postal_code, self.country
        )
    }
}

/// One line of the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItem {
    /// Storefront route of the product page for this item.
    pub fn product_path(&self) -> String {
        format!("/product/{}", self.slug)
    }
}
