//! Seams between the add-to-cart flow and the storefront.
//!
//! [`AjaxClient`] implements both traits. Tests drive the flow with
//! in-memory doubles instead.

use async_trait::async_trait;
use quick_view_core::{CartLineRequest, Handle, Product};

use crate::shop::{AjaxClient, CartSnapshot, ShopError};

/// Read access to the catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Fetch a product and its variants. Never cached.
    async fn fetch_product(&self, handle: &Handle) -> Result<Product, ShopError>;
}

/// Write access to the session cart.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Add one line.
    async fn add_line(&self, line: &CartLineRequest) -> Result<(), ShopError>;

    /// Read the cart for confirmation display.
    async fn cart_snapshot(&self) -> Result<CartSnapshot, ShopError>;
}

#[async_trait]
impl CatalogLookup for AjaxClient {
    async fn fetch_product(&self, handle: &Handle) -> Result<Product, ShopError> {
        Self::fetch_product(self, handle).await
    }
}

#[async_trait]
impl CartService for AjaxClient {
    async fn add_line(&self, line: &CartLineRequest) -> Result<(), ShopError> {
        Self::add_line(self, line).await
    }

    async fn cart_snapshot(&self) -> Result<CartSnapshot, ShopError> {
        Self::cart_snapshot(self).await
    }
}
