//! Cart commands.
//!
//! The cart lives in the session cookie of one client, so `qv cart` run on
//! its own shows a fresh, empty cart.

#![allow(clippy::print_stdout)]

use quick_view_storefront::{AjaxClient, CartSnapshot, QuickViewError};

/// Print the session cart.
pub async fn show(client: &AjaxClient) -> Result<(), QuickViewError> {
    let cart = client.cart_snapshot().await?;
    print_cart(&cart, client.currency());
    Ok(())
}

pub fn print_cart(cart: &CartSnapshot, fallback_currency: &str) {
    if cart.items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in cart.describe(fallback_currency) {
        println!("{line}");
    }
    println!("Items: {}", cart.item_count);
}
