//! Variant matching, the bonus rule, and cart line planning.
//!
//! Planning is split in two so the pure part can run before any network
//! call:
//!
//! 1. [`plan_cart_lines`] validates the selection, resolves the primary
//!    variant, and decides whether the bonus product is needed.
//! 2. [`CartPlan::into_lines`] takes the bonus product's variants (fetched
//!    by the caller when [`CartPlan::bonus_handle`] is set) and returns the
//!    ordered lines, primary first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Variant;
use crate::types::{Handle, VariantId};

/// Catalog handle used to look up the bonus product.
pub const BONUS_CATALOG_HANDLE: &str = "dark-winter-jacket";

/// Handle the bonus product is shown under on the storefront.
///
/// The imported catalog data uses [`BONUS_CATALOG_HANDLE`] instead, so this
/// one is never fetched.
pub const BONUS_DISPLAY_HANDLE: &str = "soft-winter-jacket";

/// Color that triggers the bonus rule (compared case-insensitively).
pub const BONUS_TRIGGER_COLOR: &str = "black";

/// Size that triggers the bonus rule (compared case-insensitively).
pub const BONUS_TRIGGER_SIZE: &str = "m";

/// Errors from composing cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    /// Size or color was not chosen.
    #[error("Please select color and size")]
    IncompleteSelection,

    /// No variant has the chosen size and color.
    #[error("Selected variant is not available (size {size:?}, color {color:?})")]
    VariantUnavailable {
        /// Requested size.
        size: String,
        /// Requested color.
        color: String,
    },

    /// The bonus product has no variant to add.
    #[error("Bonus product {0} has no variants")]
    BonusVariantMissing(Handle),
}

impl ComposerError {
    /// Whether the shopper can fix this by changing their selection.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::IncompleteSelection | Self::VariantUnavailable { .. }
        )
    }
}

/// The shopper's size and color choice for one add-to-cart action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Chosen size, if any.
    pub size: Option<String>,
    /// Chosen color, if any.
    pub color: Option<String>,
}

impl Selection {
    /// A selection with both values chosen.
    #[must_use]
    pub fn new(size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            size: Some(size.into()),
            color: Some(color.into()),
        }
    }

    /// Both values, or `IncompleteSelection` if either is missing or empty.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::IncompleteSelection`].
    pub fn require(&self) -> Result<(&str, &str), ComposerError> {
        match (self.size.as_deref(), self.color.as_deref()) {
            (Some(size), Some(color)) if !size.is_empty() && !color.is_empty() => {
                Ok((size, color))
            }
            _ => Err(ComposerError::IncompleteSelection),
        }
    }
}

/// One line to post to the cart.
///
/// Serializes to the body `POST /cart/add.js` expects: `{"id": .., "quantity": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLineRequest {
    /// Variant to add.
    #[serde(rename = "id")]
    pub variant_id: VariantId,
    /// Quantity to add.
    pub quantity: u32,
}

impl CartLineRequest {
    /// A line adding one unit of `variant_id`.
    #[must_use]
    pub const fn single(variant_id: VariantId) -> Self {
        Self {
            variant_id,
            quantity: 1,
        }
    }
}

/// The fixed rule that adds a second product for one size/color combination.
///
/// Trigger values are compared case-insensitively, while variant matching in
/// [`find_variant`] is case-sensitive. A selection of `m` / `BLACK` therefore
/// triggers the rule but will not resolve a variant labelled `M` / `Black`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusRule {
    /// Color that triggers the rule.
    pub trigger_color: String,
    /// Size that triggers the rule.
    pub trigger_size: String,
    /// Handle the bonus product is fetched by.
    pub catalog_handle: Handle,
    /// Handle the bonus product is displayed under. Informational only.
    pub display_handle: Handle,
}

impl Default for BonusRule {
    fn default() -> Self {
        Self {
            trigger_color: BONUS_TRIGGER_COLOR.to_owned(),
            trigger_size: BONUS_TRIGGER_SIZE.to_owned(),
            catalog_handle: Handle::from_static(BONUS_CATALOG_HANDLE),
            display_handle: Handle::from_static(BONUS_DISPLAY_HANDLE),
        }
    }
}

impl BonusRule {
    /// Whether a size/color pair triggers the rule.
    #[must_use]
    pub fn is_triggered_by(&self, size: &str, color: &str) -> bool {
        color.to_lowercase() == self.trigger_color.to_lowercase()
            && size.to_lowercase() == self.trigger_size.to_lowercase()
    }
}

/// Find the first variant whose size and color equal the given labels exactly.
#[must_use]
pub fn find_variant<'a>(variants: &'a [Variant], size: &str, color: &str) -> Option<&'a Variant> {
    variants.iter().find(|v| v.matches(size, color))
}

/// Result of the local half of composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPlan {
    primary: CartLineRequest,
    bonus_handle: Option<Handle>,
}

impl CartPlan {
    /// The line for the matched primary variant.
    #[must_use]
    pub const fn primary(&self) -> &CartLineRequest {
        &self.primary
    }

    /// Handle of the bonus product to fetch, when the bonus rule fired.
    #[must_use]
    pub const fn bonus_handle(&self) -> Option<&Handle> {
        self.bonus_handle.as_ref()
    }

    /// Finish the plan with the bonus product's variants.
    ///
    /// When the bonus rule did not fire, `bonus_variants` is ignored and the
    /// result is the primary line alone. Otherwise the first bonus variant is
    /// appended regardless of its options.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError::BonusVariantMissing`] when the rule fired and
    /// no bonus variant is available.
    pub fn into_lines(
        self,
        bonus_variants: Option<&[Variant]>,
    ) -> Result<Vec<CartLineRequest>, ComposerError> {
        let Some(handle) = self.bonus_handle else {
            return Ok(vec![self.primary]);
        };

        let bonus = bonus_variants
            .and_then(<[Variant]>::first)
            .ok_or(ComposerError::BonusVariantMissing(handle))?;

        Ok(vec![self.primary, CartLineRequest::single(bonus.id)])
    }
}

/// Validate a selection, resolve its variant, and check the bonus rule.
///
/// No I/O happens here; an error means nothing should be fetched or posted.
///
/// # Errors
///
/// - [`ComposerError::IncompleteSelection`] if size or color is missing
/// - [`ComposerError::VariantUnavailable`] if no variant matches
pub fn plan_cart_lines(
    variants: &[Variant],
    selection: &Selection,
    rule: &BonusRule,
) -> Result<CartPlan, ComposerError> {
    let (size, color) = selection.require()?;

    let variant =
        find_variant(variants, size, color).ok_or_else(|| ComposerError::VariantUnavailable {
            size: size.to_owned(),
            color: color.to_owned(),
        })?;

    let bonus_handle = rule
        .is_triggered_by(size, color)
        .then(|| rule.catalog_handle.clone());

    Ok(CartPlan {
        primary: CartLineRequest::single(variant.id),
        bonus_handle,
    })
}
