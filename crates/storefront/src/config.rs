//! Quick-view configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_BASE_URL` - Storefront origin, e.g. `https://your-store.myshopify.com`
//!
//! ## Optional
//! - `SHOP_CURRENCY` - Active currency code shown after prices (default: USD)
//! - `BONUS_PRODUCT_HANDLE` - Handle the bonus product is fetched by (default: dark-winter-jacket)
//! - `BONUS_DISPLAY_HANDLE` - Handle the bonus product is shown under (default: soft-winter-jacket)
//! - `BONUS_TRIGGER_COLOR` - Color that triggers the bonus (default: black)
//! - `BONUS_TRIGGER_SIZE` - Size that triggers the bonus (default: m)
//! - `LOG_FORMAT` - `json` for JSON logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use quick_view_core::composer::{
    BONUS_CATALOG_HANDLE, BONUS_DISPLAY_HANDLE, BONUS_TRIGGER_COLOR, BONUS_TRIGGER_SIZE,
};
use quick_view_core::{BonusRule, Handle};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Quick-view application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storefront connection settings
    pub shop: ShopConfig,
    /// Bonus product rule
    pub bonus: BonusRule,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Storefront connection settings.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Storefront origin; endpoint paths are joined onto it
    pub base_url: Url,
    /// Active currency code (the AJAX API omits it from product payloads)
    pub currency: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        let shop = ShopConfig {
            base_url: parse_base_url(&vars.required("SHOP_BASE_URL")?)?,
            currency: vars.or_default("SHOP_CURRENCY", "USD"),
        };

        let bonus = BonusRule {
            trigger_color: vars.or_default("BONUS_TRIGGER_COLOR", BONUS_TRIGGER_COLOR),
            trigger_size: vars.or_default("BONUS_TRIGGER_SIZE", BONUS_TRIGGER_SIZE),
            catalog_handle: vars.handle("BONUS_PRODUCT_HANDLE", BONUS_CATALOG_HANDLE)?,
            display_handle: vars.handle("BONUS_DISPLAY_HANDLE", BONUS_DISPLAY_HANDLE)?,
        };

        let log_format = match vars.optional("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            shop,
            bonus,
            log_format,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

impl ShopConfig {
    /// Settings for a storefront at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not http(s).
    pub fn new(base_url: &str, currency: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            currency: currency.into(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get a required variable. Empty values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Empty values count as missing.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a handle variable with a default value.
    fn handle(&self, key: &str, default: &str) -> Result<Handle, ConfigError> {
        Handle::parse(&self.or_default(key, default))
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Parse the storefront origin and make sure paths join under it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SHOP_BASE_URL".to_string(), msg);

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }

    // Endpoint segments are appended after the trailing empty segment is popped
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
