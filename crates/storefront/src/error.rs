//! Unified error handling with Sentry integration.
//!
//! Errors fall in two groups, and callers must keep them apart:
//! - user errors: the shopper has to change their selection
//!   (`IncompleteSelection`, `VariantUnavailable`)
//! - system errors: the storefront or the network failed
//!
//! [`QuickViewError::report`] logs both and captures system errors to Sentry.

use quick_view_core::{ComposerError, HandleError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::shop::ShopError;

/// Application-level error type for the quick-view.
#[derive(Debug, Error)]
pub enum QuickViewError {
    /// Selection or composition failed locally.
    #[error(transparent)]
    Composer(#[from] ComposerError),

    /// Storefront operation failed.
    #[error("Storefront error: {0}")]
    Shop(#[from] ShopError),

    /// A handle could not be parsed.
    #[error("Invalid handle: {0}")]
    Handle(#[from] HandleError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A cart POST failed after earlier lines of the same action were added.
    #[error("Added {submitted} of {total} cart lines before failing: {source}")]
    PartialSubmission {
        /// Lines already in the cart.
        submitted: usize,
        /// Lines in the action.
        total: usize,
        /// Failure of the next line.
        source: ShopError,
    },

    /// No product is open in the quick-view.
    #[error("Quick-view is not open")]
    NotOpen,
}

impl QuickViewError {
    /// Whether the shopper can fix this by changing their selection.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Composer(err) => err.is_user_error(),
            Self::Handle(_) => true,
            _ => false,
        }
    }

    /// Text to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Composer(ComposerError::IncompleteSelection) => {
                "Please select color and size".to_string()
            }
            Self::Composer(ComposerError::VariantUnavailable { .. }) => {
                "Selected variant is not available".to_string()
            }
            Self::Handle(err) => format!("Invalid product handle: {err}"),
            Self::Shop(err) if err.is_not_found() => "Product not found".to_string(),
            Self::Shop(ShopError::CartRejected(reason)) => reason.clone(),
            _ => "Something went wrong, please try again".to_string(),
        }
    }

    /// Log the error and capture system errors to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::info!(error = %self, "Selection rejected");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Quick-view error"
        );
    }
}

/// Result type alias for `QuickViewError`.
pub type Result<T> = std::result::Result<T, QuickViewError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("quick_view", "Opened product", Some(&[("handle", "basic-tee")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        let err = QuickViewError::from(ComposerError::IncompleteSelection);
        assert!(err.is_user_error());
        assert_eq!(err.user_message(), "Please select color and size");

        let err = QuickViewError::from(ComposerError::VariantUnavailable {
            size: "S".to_string(),
            color: "Blue".to_string(),
        });
        assert!(err.is_user_error());
        assert_eq!(err.user_message(), "Selected variant is not available");
    }

    #[test]
    fn test_system_errors() {
        let err = QuickViewError::from(ShopError::NotFound("Product not found: x".to_string()));
        assert!(!err.is_user_error());
        assert_eq!(err.user_message(), "Product not found");

        let err = QuickViewError::PartialSubmission {
            submitted: 1,
            total: 2,
            source: ShopError::RateLimited(5),
        };
        assert!(!err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Added 1 of 2 cart lines before failing: Rate limited, retry after 5 seconds"
        );
    }

    #[test]
    fn test_composer_message_is_transparent() {
        let err = QuickViewError::from(ComposerError::IncompleteSelection);
        assert_eq!(err.to_string(), "Please select color and size");
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        QuickViewError::from(ShopError::RateLimited(1)).report();
        QuickViewError::from(ComposerError::IncompleteSelection).report();
    }
}
