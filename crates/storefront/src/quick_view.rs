//! Quick-view session: open a product, pick options, add to cart.
//!
//! This is the state a modal would hold, without the modal. A UI adapter
//! (the `qv` CLI, a template, a WASM front-end) renders [`QuickViewModel`]
//! and forwards clicks to the picker methods.
//!
//! # Add-to-cart chain
//!
//! 1. Compose every line, bonus included (no network for invalid selections)
//! 2. Post the lines in order
//! 3. Fetch the cart for confirmation (failure here is logged, not returned)
//!
//! Nothing is posted unless step 1 fully succeeds. Concurrent actions are
//! independent: no locking, deduplication, or cancellation.

use std::sync::Arc;

use quick_view_core::picker::OptionPickers;
use quick_view_core::{
    BonusRule, CartLineRequest, ColorSwatch, DecimalSeparator, Handle, Product, Selection,
};
use sentry::{Hub, SentryFutureExt};
use serde::Serialize;
use tracing::{Span, field, instrument};
use uuid::Uuid;

use crate::catalog::{CartService, CatalogLookup};
use crate::composer::CartComposer;
use crate::error::{QuickViewError, Result, add_breadcrumb};
use crate::shop::CartSnapshot;

/// What the quick-view shows for an open product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickViewModel {
    pub handle: Handle,
    pub title: String,
    /// Price as `12,50EUR`.
    pub price: String,
    /// Description HTML, unescaped.
    pub description: String,
    /// First image URL, or empty.
    pub image: String,
    pub swatches: Vec<ColorSwatch>,
    pub sizes: Vec<String>,
    /// Size dropdown header text.
    pub size_label: String,
    pub selected_color: Option<usize>,
    pub dropdown_open: bool,
}

/// Result of a successful add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartOutcome {
    /// Lines posted, in order.
    pub lines: Vec<CartLineRequest>,
    /// Cart after the add, if it could be read.
    pub cart: Option<CartSnapshot>,
}

struct OpenProduct {
    handle: Handle,
    product: Product,
    pickers: OptionPickers,
}

/// A quick-view over one storefront.
pub struct QuickView<S> {
    shop: S,
    composer: CartComposer<S>,
    open: Option<OpenProduct>,
}

impl<S> QuickView<S>
where
    S: CatalogLookup + CartService + Clone,
{
    pub fn new(shop: S, rule: BonusRule) -> Self {
        Self {
            composer: CartComposer::new(shop.clone(), rule),
            shop,
            open: None,
        }
    }

    /// Fetch a product and show it with fresh pickers.
    ///
    /// A failed fetch leaves any currently open product untouched.
    ///
    /// # Errors
    ///
    /// Returns `Shop` if the product cannot be fetched.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn open(&mut self, handle: &Handle) -> Result<QuickViewModel> {
        let product = self.shop.fetch_product(handle).await?;
        let pickers = OptionPickers::new(&product.options());

        add_breadcrumb("quick_view", "Opened product", Some(&[("handle", handle.as_str())]));

        let open = self.open.insert(OpenProduct {
            handle: handle.clone(),
            product,
            pickers,
        });
        Ok(open.model())
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Current view, if a product is open.
    #[must_use]
    pub fn model(&self) -> Option<QuickViewModel> {
        self.open.as_ref().map(OpenProduct::model)
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        self.open.as_ref().map(|o| &o.product)
    }

    fn pickers_mut(&mut self) -> Result<&mut OptionPickers> {
        self.open
            .as_mut()
            .map(|o| &mut o.pickers)
            .ok_or(QuickViewError::NotOpen)
    }

    /// Click on a color swatch. Returns `false` for an unknown index.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if no product is open.
    pub fn select_color(&mut self, index: usize) -> Result<bool> {
        Ok(self.pickers_mut()?.colors.select(index))
    }

    /// Select a color by its exact label. Returns `false` if not offered.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if no product is open.
    pub fn select_color_named(&mut self, color: &str) -> Result<bool> {
        Ok(self.pickers_mut()?.colors.select_by_name(color))
    }

    /// Click on the size dropdown header.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if no product is open.
    pub fn toggle_size_dropdown(&mut self) -> Result<()> {
        self.pickers_mut()?.sizes.toggle();
        Ok(())
    }

    /// Click on a size option. Returns `false` if the size is not offered.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if no product is open.
    pub fn choose_size(&mut self, size: &str) -> Result<bool> {
        Ok(self.pickers_mut()?.sizes.choose(size))
    }

    /// Escape key or a click outside the size dropdown.
    ///
    /// # Errors
    ///
    /// Returns `NotOpen` if no product is open.
    pub fn dismiss_dropdown(&mut self) -> Result<()> {
        self.pickers_mut()?.sizes.dismiss();
        Ok(())
    }

    /// Current picker choices.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.open
            .as_ref()
            .map(|o| o.pickers.selection())
            .unwrap_or_default()
    }

    /// Close the quick-view and clear every choice.
    pub fn close(&mut self) {
        if let Some(mut open) = self.open.take() {
            open.pickers.reset();
        }
    }

    /// Add the current selection to the cart.
    ///
    /// # Errors
    ///
    /// - `NotOpen` if no product is open
    /// - composition errors from [`CartComposer::compose_cart_lines`]
    /// - `Shop` / `PartialSubmission` if posting fails
    pub async fn add_to_cart(&self) -> Result<AddToCartOutcome> {
        let open = self.open.as_ref().ok_or(QuickViewError::NotOpen)?;
        self.add_selection(&open.product, &open.pickers.selection())
            .await
    }

    /// Add an explicit selection of `product` to the cart.
    ///
    /// Each call runs on its own Sentry hub tagged with a fresh `action_id`,
    /// so concurrent actions never share or leak the tag.
    ///
    /// # Errors
    ///
    /// See [`QuickView::add_to_cart`].
    #[instrument(skip(self, product), fields(product = %product.title, action_id = field::Empty))]
    pub async fn add_selection(
        &self,
        product: &Product,
        selection: &Selection,
    ) -> Result<AddToCartOutcome> {
        let action_id = Uuid::new_v4().to_string();
        Span::current().record("action_id", action_id.as_str());

        let hub = Arc::new(Hub::new_from_top(Hub::current()));
        hub.configure_scope(|scope| scope.set_tag("action_id", &action_id));

        self.run_action(product, selection).bind_hub(hub).await
    }

    async fn run_action(
        &self,
        product: &Product,
        selection: &Selection,
    ) -> Result<AddToCartOutcome> {
        let lines = self
            .composer
            .compose_cart_lines(&product.variants, selection)
            .await?;

        submit_lines(&self.shop, &lines).await?;
        add_breadcrumb("quick_view", "Added to cart", None);

        let cart = match self.shop.cart_snapshot().await {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart after add");
                None
            }
        };

        Ok(AddToCartOutcome { lines, cart })
    }
}

impl OpenProduct {
    fn model(&self) -> QuickViewModel {
        let product = &self.product;
        QuickViewModel {
            handle: self.handle.clone(),
            title: product.title.clone(),
            price: product.price.format(DecimalSeparator::Comma),
            description: product.description.clone(),
            image: product.first_image().to_owned(),
            swatches: self.pickers.colors.swatches().to_vec(),
            sizes: self.pickers.sizes.options().to_vec(),
            size_label: self.pickers.sizes.label().to_owned(),
            selected_color: self.pickers.colors.selected_index(),
            dropdown_open: self.pickers.sizes.state().is_open(),
        }
    }
}

/// Post lines one by one, in order.
///
/// # Errors
///
/// Returns the shop error for a failing first line, or `PartialSubmission`
/// when earlier lines were already added.
pub async fn submit_lines<C: CartService + ?Sized>(
    cart: &C,
    lines: &[CartLineRequest],
) -> Result<()> {
    for (submitted, line) in lines.iter().enumerate() {
        if let Err(source) = cart.add_line(line).await {
            if submitted == 0 {
                return Err(source.into());
            }
            return Err(QuickViewError::PartialSubmission {
                submitted,
                total: lines.len(),
                source,
            });
        }
    }
    Ok(())
}
