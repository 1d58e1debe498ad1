//! Client for the storefront's AJAX API.
//!
//! # Endpoints
//!
//! - `GET /products/{handle}.js` - product with its variants
//! - `POST /cart/add.js` - add one line to the session cart
//! - `GET /cart.js` - read-only cart snapshot
//!
//! The shop owns cart state. The client only keeps the cart cookie the shop
//! hands out, so lines added through one [`AjaxClient`] land in one cart.
//!
//! # Example
//!
//! ```rust,ignore
//! use quick_view_storefront::shop::AjaxClient;
//!
//! let client = AjaxClient::new(&config.shop)?;
//! let product = client.fetch_product(&handle).await?;
//! client.add_line(&CartLineRequest::single(product.variants[0].id)).await?;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::AjaxClient;
pub use types::{CartItem, CartSnapshot};

use thiserror::Error;

/// Errors that can occur when talking to the storefront.
#[derive(Debug, Error)]
pub enum ShopError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the shop.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The shop refused a cart change (e.g., sold out).
    #[error("Cart rejected: {0}")]
    CartRejected(String),

    /// Non-success status without a more specific meaning.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ShopError {
    /// The requested catalog entry does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Network, protocol, or parse failure (anything but a missing entry).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !self.is_not_found()
    }
}
