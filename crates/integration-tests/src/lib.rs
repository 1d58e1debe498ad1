//! End-to-end tests for the quick-view.
//!
//! Each test runs the storefront client against an `httpmock` server that
//! serves the AJAX endpoints (`/products/{handle}.js`, `/cart/add.js`,
//! `/cart.js`). No network access is needed.
//!
//! ```bash
//! cargo test -p quick-view-integration-tests
//! ```

use httpmock::MockServer;
use quick_view_core::BonusRule;
use quick_view_storefront::{AjaxClient, QuickView, ShopConfig};
use serde_json::{Value, json};

/// Quick-view wired to a mock storefront, with the default bonus rule.
///
/// # Panics
///
/// Panics if the mock server URL is rejected.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn quick_view_for(server: &MockServer) -> QuickView<AjaxClient> {
    let config = ShopConfig::new(&server.base_url(), "EUR").unwrap();
    QuickView::new(AjaxClient::new(&config).unwrap(), BonusRule::default())
}

/// A `/products/{handle}.js` body. Variants are `(id, size, color)`.
#[must_use]
pub fn product_json(id: u64, handle: &str, price: i64, variants: &[(u64, &str, &str)]) -> Value {
    json!({
        "id": id,
        "handle": handle,
        "title": handle,
        "price": price,
        "description": "<p>Made to last.</p>",
        "images": [format!("//cdn.example.com/{handle}.jpg")],
        "variants": variants
            .iter()
            .map(|(id, size, color)| json!({
                "id": id,
                "title": format!("{size} / {color}"),
                "option1": size,
                "option2": color,
            }))
            .collect::<Vec<_>>(),
    })
}

/// The primary product used across tests.
#[must_use]
pub fn basic_tee() -> Value {
    product_json(
        1,
        "basic-tee",
        1250,
        &[(11, "S", "Red"), (12, "M", "Black"), (13, "L", "Black")],
    )
}

/// The bonus product, served under its catalog handle.
#[must_use]
pub fn winter_jacket() -> Value {
    product_json(2, "dark-winter-jacket", 12_900, &[(21, "M", "Navy"), (22, "L", "Navy")])
}
