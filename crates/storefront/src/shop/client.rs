//! Storefront AJAX API client implementation.
//!
//! One `reqwest::Client` with a cookie store per [`AjaxClient`]; clones share
//! it, and with it the shop's cart cookie. No caching, no retries, no
//! timeouts.

use std::sync::Arc;

use quick_view_core::{CartLineRequest, Handle, Product};
use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ShopConfig;

use super::ShopError;
use super::conversions::convert_product;
use super::types::{CartErrorJson, CartSnapshot, ProductJson};

/// Maximum number of body characters kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// AjaxClient
// =============================================================================

/// Client for the storefront AJAX API.
#[derive(Clone)]
pub struct AjaxClient {
    inner: Arc<AjaxClientInner>,
}

struct AjaxClientInner {
    client: reqwest::Client,
    base_url: Url,
    currency: String,
}

impl AjaxClient {
    /// Create a new client for the configured storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ShopConfig) -> Result<Self, ShopError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            inner: Arc::new(AjaxClientInner {
                client,
                base_url: config.base_url.clone(),
                currency: config.currency.clone(),
            }),
        })
    }

    /// Currency code attached to product prices.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.inner.currency
    }

    /// Append path segments to the base URL. Each segment is
    /// percent-encoded, so a segment can never add or climb a level.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ShopError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ShopError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read a response body, turning rate limiting and server errors into
    /// `ShopError`s. 404 and 422 are left to the caller.
    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String), ShopError> {
        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success()
            && status != StatusCode::NOT_FOUND
            && status != StatusCode::UNPROCESSABLE_ENTITY
        {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Storefront returned non-success status"
            );
            return Err(ShopError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        Ok((status, body))
    }

    // =========================================================================
    // Product Methods (not cached - every lookup is a fresh fetch)
    // =========================================================================

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the shop has no such product, or a
    /// transport error if the request or JSON parsing fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn fetch_product(&self, handle: &Handle) -> Result<Product, ShopError> {
        let file = format!("{handle}.js");
        let url = self.endpoint(&["products", file.as_str()])?;

        let response = self.inner.client.get(url).send().await?;
        let (status, body) = Self::read_body(response).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ShopError::NotFound(format!("Product not found: {handle}")));
        }

        let product: ProductJson = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse product response"
            );
            ShopError::Parse(e)
        })?;

        debug!(variants = product.variants.len(), "Fetched product");
        Ok(convert_product(product, &self.inner.currency))
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Add one line to the session cart.
    ///
    /// The response body is only inspected for errors.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::CartRejected` if the shop refuses the line (422),
    /// `ShopError::NotFound` for an unknown variant, or a transport error.
    #[instrument(skip(self, line), fields(variant_id = %line.variant_id, quantity = line.quantity))]
    pub async fn add_line(&self, line: &CartLineRequest) -> Result<(), ShopError> {
        let url = self.endpoint(&["cart", "add.js"])?;

        let response = self.inner.client.post(url).json(line).send().await?;
        let (status, body) = Self::read_body(response).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ShopError::NotFound(format!(
                "Variant not found: {}",
                line.variant_id
            )));
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let reason = serde_json::from_str::<CartErrorJson>(&body)
                .map_or_else(|_| excerpt(&body), CartErrorJson::into_reason);
            tracing::warn!(reason = %reason, "Cart rejected line");
            return Err(ShopError::CartRejected(reason));
        }

        debug!("Added cart line");
        Ok(())
    }

    /// Get a read-only snapshot of the session cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or JSON parsing fails.
    #[instrument(skip(self))]
    pub async fn cart_snapshot(&self) -> Result<CartSnapshot, ShopError> {
        let url = self.endpoint(&["cart.js"])?;

        let response = self.inner.client.get(url).send().await?;
        let (status, body) = Self::read_body(response).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ShopError::NotFound("Cart not found".to_string()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use quick_view_core::VariantId;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> AjaxClient {
        let config = ShopConfig::new(&server.base_url(), "EUR").unwrap();
        AjaxClient::new(&config).unwrap()
    }

    fn handle(s: &str) -> Handle {
        Handle::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/basic-tee.js");
                then.status(200).json_body(json!({
                    "id": 1,
                    "handle": "basic-tee",
                    "title": "Basic Tee",
                    "price": 1999,
                    "description": "<p>Soft.</p>",
                    "images": ["//cdn.example.com/tee.jpg"],
                    "variants": [
                        {"id": 11, "title": "S / Red", "option1": "S", "option2": "Red"},
                        {"id": 12, "title": "M / Black", "option1": "M", "option2": "Black"}
                    ]
                }));
            })
            .await;

        let product = client_for(&server)
            .fetch_product(&handle("basic-tee"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(product.title, "Basic Tee");
        assert_eq!(product.price.currency_code, "EUR");
        assert_eq!(product.variants[1].id, VariantId::new(12));
    }

    #[tokio::test]
    async fn test_fetch_product_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/missing.js");
                then.status(404).body("Not Found");
            })
            .await;

        let err = client_for(&server)
            .fetch_product(&handle("missing"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_product_is_not_cached() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/basic-tee.js");
                then.status(200)
                    .json_body(json!({"id": 1, "title": "Basic Tee", "price": 0, "variants": []}));
            })
            .await;

        let client = client_for(&server);
        client.fetch_product(&handle("basic-tee")).await.unwrap();
        client.fetch_product(&handle("basic-tee")).await.unwrap();

        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_fetch_product_bad_json_is_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/basic-tee.js");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = client_for(&server)
            .fetch_product(&handle("basic-tee"))
            .await
            .unwrap_err();

        assert!(matches!(err, ShopError::Parse(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_server_error_and_rate_limit() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/broken.js");
                then.status(503).body("Service Unavailable");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/busy.js");
                then.status(429).header("Retry-After", "30");
            })
            .await;

        let client = client_for(&server);

        let err = client.fetch_product(&handle("broken")).await.unwrap_err();
        assert!(matches!(err, ShopError::Status { status: 503, .. }));

        let err = client.fetch_product(&handle("busy")).await.unwrap_err();
        assert!(matches!(err, ShopError::RateLimited(30)));
    }

    #[tokio::test]
    async fn test_add_line_posts_id_and_quantity() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::POST)
                    .path("/cart/add.js")
                    .json_body(json!({"id": 12, "quantity": 1}));
                then.status(200).json_body(json!({"id": 12, "quantity": 1}));
            })
            .await;

        client_for(&server)
            .add_line(&CartLineRequest::single(VariantId::new(12)))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_line_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::POST).path("/cart/add.js");
                then.status(422).json_body(json!({
                    "status": 422,
                    "message": "Cart Error",
                    "description": "The product is already sold out."
                }));
            })
            .await;

        let err = client_for(&server)
            .add_line(&CartLineRequest::single(VariantId::new(12)))
            .await
            .unwrap_err();

        assert!(
            matches!(err, ShopError::CartRejected(ref reason) if reason == "The product is already sold out.")
        );
    }

    #[tokio::test]
    async fn test_cart_snapshot() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/cart.js");
                then.status(200).json_body(json!({
                    "token": "abc",
                    "item_count": 1,
                    "total_price": 1999,
                    "currency": "EUR",
                    "items": [
                        {"variant_id": 12, "title": "Basic Tee", "variant_title": "M / Black", "quantity": 1, "price": 1999}
                    ]
                }));
            })
            .await;

        let cart = client_for(&server).cart_snapshot().await.unwrap();
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.items[0].title, "Basic Tee");
    }

    #[test]
    fn test_endpoint_segments_are_encoded() {
        let config = ShopConfig::new("https://shop.example.com/en", "EUR").unwrap();
        let client = AjaxClient::new(&config).unwrap();

        let url = client.endpoint(&["products", "..\\cart.js"]).unwrap();
        assert_eq!(url.path(), "/en/products/..%5Ccart.js");

        let url = client.endpoint(&["products", "../cart.js"]).unwrap();
        assert_eq!(url.path(), "/en/products/..%2Fcart.js");
    }

    #[tokio::test]
    async fn test_fetch_product_stays_under_products() {
        let server = MockServer::start_async().await;
        let cart = server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/cart.js");
                then.status(200).json_body(json!({"items": []}));
            })
            .await;
        let product = server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/products/...js");
                then.status(404);
            })
            .await;

        let err = client_for(&server)
            .fetch_product(&handle(".."))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        product.assert_async().await;
        assert_eq!(cart.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::GET).path("/en/cart.js");
                then.status(200).json_body(json!({"items": []}));
            })
            .await;

        let config = ShopConfig::new(&server.url("/en"), "EUR").unwrap();
        AjaxClient::new(&config)
            .unwrap()
            .cart_snapshot()
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
