//! Quick-View Storefront - add-to-cart flow against a storefront AJAX API.
//!
//! [`quick_view::QuickView`] is the entry point: it opens a product, holds
//! the picker state, and turns a selection into cart lines via
//! [`composer::CartComposer`]. [`shop::AjaxClient`] talks to the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod quick_view;
pub mod shop;
pub mod telemetry;

pub use catalog::{CartService, CatalogLookup};
pub use composer::CartComposer;
pub use config::{ShopConfig, StorefrontConfig};
pub use error::{QuickViewError, Result};
pub use quick_view::{AddToCartOutcome, QuickView, QuickViewModel};
pub use shop::{AjaxClient, CartSnapshot};
