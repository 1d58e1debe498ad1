//! Wire types for the storefront AJAX API.
//!
//! Product payloads are converted into `quick_view_core` types in
//! `conversions`. The cart snapshot is read-only display data and is exposed
//! as-is.

use quick_view_core::{DecimalSeparator, Price, VariantId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// Response body of `GET /products/{handle}.js`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductJson {
    pub id: u64,
    #[serde(default)]
    pub handle: Option<String>,
    pub title: String,
    /// Minor units.
    pub price: i64,
    /// HTML. Shopify sends `null` for products without a description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VariantJson>,
}

/// A variant inside [`ProductJson`].
#[derive(Debug, Deserialize)]
pub(crate) struct VariantJson {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Size.
    #[serde(default)]
    pub option1: Option<String>,
    /// Color.
    #[serde(default)]
    pub option2: Option<String>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Error body returned by `POST /cart/add.js` with status 422.
#[derive(Debug, Deserialize)]
pub(crate) struct CartErrorJson {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CartErrorJson {
    pub fn into_reason(self) -> String {
        self.description
            .or(self.message)
            .unwrap_or_else(|| "cart rejected the line".to_string())
    }
}

/// Response body of `GET /cart.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Cart token.
    #[serde(default)]
    pub token: Option<String>,
    /// Total quantity across lines.
    #[serde(default)]
    pub item_count: u32,
    /// Total in minor units.
    #[serde(default)]
    pub total_price: i64,
    /// ISO 4217 code of the cart currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Lines in cart order.
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// One line of a [`CartSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Variant on this line.
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    /// Product title.
    pub title: String,
    /// Variant title; `null` for single-variant products.
    #[serde(default)]
    pub variant_title: Option<String>,
    pub quantity: u32,
    /// Unit price in minor units.
    pub price: i64,
}

impl CartSnapshot {
    /// Currency of the cart, or `fallback` when the shop did not say.
    #[must_use]
    pub fn currency_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(fallback)
    }

    /// Human-readable confirmation, one block per line.
    ///
    /// ```text
    /// Product: Basic Tee
    /// Variant: M / Black
    /// Quantity: 1
    /// Price: 19.99EUR
    /// ---
    /// ```
    #[must_use]
    pub fn describe(&self, fallback_currency: &str) -> Vec<String> {
        let currency = self.currency_or(fallback_currency);
        self.items
            .iter()
            .flat_map(|item| {
                [
                    format!("Product: {}", item.title),
                    format!("Variant: {}", item.variant_title.as_deref().unwrap_or("")),
                    format!("Quantity: {}", item.quantity),
                    format!("Price: {}", item.display_price(currency)),
                    "---".to_string(),
                ]
            })
            .collect()
    }
}

impl CartItem {
    /// Unit price as `12.50EUR`.
    #[must_use]
    pub fn display_price(&self, currency: &str) -> String {
        Price::from_minor(self.price, currency).format(DecimalSeparator::Period)
    }
}
