//! Async cart composition.
//!
//! Wraps [`quick_view_core::plan_cart_lines`] with the one lookup it cannot
//! do itself: fetching the bonus product. Every line is resolved before any
//! is returned, so a failed bonus lookup means nothing reaches the cart.

use quick_view_core::{BonusRule, CartLineRequest, Selection, Variant, plan_cart_lines};
use tracing::{debug, instrument};

use crate::catalog::CatalogLookup;
use crate::error::Result;

/// Composes the cart lines for one add-to-cart action.
pub struct CartComposer<C> {
    catalog: C,
    rule: BonusRule,
}

impl<C: CatalogLookup> CartComposer<C> {
    pub const fn new(catalog: C, rule: BonusRule) -> Self {
        Self { catalog, rule }
    }

    /// Resolve the ordered cart lines for a selection, primary first.
    ///
    /// Selection and variant checks run before any network call. When the
    /// bonus rule fires, the bonus product is fetched by its catalog handle
    /// and its first variant is appended.
    ///
    /// # Errors
    ///
    /// - `IncompleteSelection` / `VariantUnavailable` from local validation
    /// - `Shop` if the bonus product cannot be fetched
    /// - `BonusVariantMissing` if the bonus product has no variants
    #[instrument(skip(self, primary_variants), fields(variants = primary_variants.len()))]
    pub async fn compose_cart_lines(
        &self,
        primary_variants: &[Variant],
        selection: &Selection,
    ) -> Result<Vec<CartLineRequest>> {
        let plan = plan_cart_lines(primary_variants, selection, &self.rule)?;

        let Some(handle) = plan.bonus_handle() else {
            return Ok(plan.into_lines(None)?);
        };

        debug!(
            bonus_handle = %handle,
            display_handle = %self.rule.display_handle,
            "Bonus rule triggered"
        );
        let bonus = self.catalog.fetch_product(handle).await?;

        Ok(plan.into_lines(Some(bonus.variants.as_slice()))?)
    }
}
