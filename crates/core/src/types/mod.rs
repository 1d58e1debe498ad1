//! Core types for the quick-view.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod handle;
pub mod id;
pub mod price;

pub use handle::{Handle, HandleError};
pub use id::*;
pub use price::{DecimalSeparator, Price};
