//! Quick-View Core - Domain types and cart composition rules.
//!
//! This crate holds everything the product quick-view decides on its own:
//! - which variant a size/color selection resolves to
//! - whether the bonus product rule fires
//! - the ordered cart lines to submit
//! - the picker state that stands in for the modal's color swatches and size
//!   dropdown
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Fetching products and posting cart lines lives in
//! `quick-view-storefront`, which drives these functions.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, handles, and prices
//! - [`catalog`] - Products and variants as returned by the storefront
//! - [`picker`] - Color swatch and size dropdown state
//! - [`composer`] - Variant matching, the bonus rule, and cart line planning

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod composer;
pub mod picker;
pub mod types;

pub use catalog::{Product, Variant, VariantOptions};
pub use composer::{
    BonusRule, CartLineRequest, CartPlan, ComposerError, Selection, find_variant, plan_cart_lines,
};
pub use picker::{ColorPicker, ColorSwatch, DropdownState, OptionPickers, SizeDropdown};
pub use types::*;
