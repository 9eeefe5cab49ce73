//! Orders and their line items.
//!
//! An [`Order`] is written once, together with all of its lines, and never mutated
//! afterwards. `total_price` is the price snapshot taken at creation. The display
//! fields on each [`OrderedProduct`] (`name`, `description`, `unit_price`) are only
//! copies: they are filled from the catalog at creation and refilled on every read.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

use crate::model::Product;

/// Identifier of an order. UUIDv7, so ids sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// A fresh, time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product-and-quantity entry of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderedProduct {
    /// A line priced from current catalog data.
    pub fn from_catalog(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// A line as persisted: only the product reference and the quantity.
    pub fn unpriced(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: String::new(),
            description: String::new(),
            unit_price: 0.0,
            quantity,
        }
    }

    /// Overwrite the display copies with the catalog's current values.
    pub fn refresh_from(&mut self, product: &Product) {
        self.name.clone_from(&product.name);
        self.description.clone_from(&product.description);
        self.unit_price = product.price;
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub lines: Vec<OrderedProduct>,
}

impl Order {
    /// Builds a new order from priced lines: fresh id, `created_at = now (UTC)`,
    /// `total_price` summed over the lines.
    ///
    /// `created_at` is cut to microseconds, the precision Postgres stores, so the
    /// value handed back here is the one every later read returns.
    pub fn place(account_id: impl Into<String>, lines: Vec<OrderedProduct>) -> Self {
        let total_price = lines.iter().map(OrderedProduct::line_total).sum();
        Self {
            id: OrderId::generate(),
            account_id: account_id.into(),
            created_at: Utc::now().trunc_subsecs(6),
            total_price,
            lines,
        }
    }
}

/// One entry of an incoming create-order request.
///
/// `quantity` is signed because callers may send zero or negative values, which the
/// order service rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub product_id: String,
    pub quantity: i32,
}

impl RequestedItem {
    pub fn new(product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
