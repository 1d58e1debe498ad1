//! Products and variants as the quick-view sees them.
//!
//! A product owns an ordered list of variants. Only the first two option
//! slots matter here: `option1` is the size and `option2` is the color.

use serde::{Deserialize, Serialize};

use crate::types::{Handle, Price, ProductId, VariantId};

/// A catalog product.
///
/// Immutable once fetched. Nothing is cached; every lookup is a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Shopify product ID.
    pub id: ProductId,
    /// URL handle reported by the storefront, if any.
    pub handle: Option<Handle>,
    /// Display title.
    pub title: String,
    /// Product price (lowest variant price).
    pub price: Price,
    /// Description as HTML.
    pub description: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Variants in catalog order.
    pub variants: Vec<Variant>,
}

impl Product {
    /// The first image URL, or an empty string when the product has none.
    #[must_use]
    pub fn first_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// The first variant in catalog order.
    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Distinct sizes and colors offered by this product.
    #[must_use]
    pub fn options(&self) -> VariantOptions {
        VariantOptions::from_variants(&self.variants)
    }
}

/// A purchasable size × color combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Shopify variant ID (pass to the cart).
    pub id: VariantId,
    /// Variant display title (e.g., "M / Black").
    pub title: String,
    /// Size label (`option1`).
    pub size: Option<String>,
    /// Color label (`option2`).
    pub color: Option<String>,
}

impl Variant {
    /// Whether both option labels equal the given values exactly.
    ///
    /// Case-sensitive, no trimming.
    #[must_use]
    pub fn matches(&self, size: &str, color: &str) -> bool {
        self.size.as_deref() == Some(size) && self.color.as_deref() == Some(color)
    }
}

/// Distinct option values across a variant list, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptions {
    /// Distinct `option1` values.
    pub sizes: Vec<String>,
    /// Distinct `option2` values.
    pub colors: Vec<String>,
}

impl VariantOptions {
    /// Collect distinct sizes and colors. Missing and empty labels are skipped.
    #[must_use]
    pub fn from_variants(variants: &[Variant]) -> Self {
        let mut options = Self::default();

        for variant in variants {
            push_unique(&mut options.sizes, variant.size.as_deref());
            push_unique(&mut options.colors, variant.color.as_deref());
        }

        options
    }
}

fn push_unique(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty())
        && !values.iter().any(|existing| existing == value)
    {
        values.push(value.to_owned());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(id: u64, size: Option<&str>, color: Option<&str>) -> Variant {
        Variant {
            id: VariantId::new(id),
            title: format!("{} / {}", size.unwrap_or("-"), color.unwrap_or("-")),
            size: size.map(String::from),
            color: color.map(String::from),
        }
    }

    fn product(variants: Vec<Variant>, images: Vec<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            handle: Some(Handle::parse("basic-tee").unwrap()),
            title: "Basic Tee".to_string(),
            price: Price::from_minor(1999, "EUR"),
            description: "<p>Soft cotton.</p>".to_string(),
            images: images.into_iter().map(String::from).collect(),
            variants,
        }
    }

    #[test]
    fn test_options_are_unique_in_first_seen_order() {
        let variants = vec![
            variant(1, Some("S"), Some("Red")),
            variant(2, Some("M"), Some("Black")),
            variant(3, Some("S"), Some("Black")),
            variant(4, Some("L"), Some("Red")),
        ];

        let options = VariantOptions::from_variants(&variants);
        assert_eq!(options.sizes, vec!["S", "M", "L"]);
        assert_eq!(options.colors, vec!["Red", "Black"]);
    }

    #[test]
    fn test_options_skip_missing_labels() {
        let variants = vec![
            variant(1, None, Some("Red")),
            variant(2, Some("M"), None),
            variant(3, Some(""), Some("")),
        ];

        let options = VariantOptions::from_variants(&variants);
        assert_eq!(options.sizes, vec!["M"]);
        assert_eq!(options.colors, vec!["Red"]);
    }

    #[test]
    fn test_options_keep_case_distinct_labels() {
        let variants = vec![
            variant(1, Some("M"), Some("Black")),
            variant(2, Some("m"), Some("black")),
        ];

        let options = VariantOptions::from_variants(&variants);
        assert_eq!(options.sizes, vec!["M", "m"]);
        assert_eq!(options.colors, vec!["Black", "black"]);
    }

    #[test]
    fn test_variant_matches_is_case_sensitive() {
        let v = variant(1, Some("M"), Some("Black"));
        assert!(v.matches("M", "Black"));
        assert!(!v.matches("m", "Black"));
        assert!(!v.matches("M", "black"));
        assert!(!variant(2, None, Some("Black")).matches("M", "Black"));
    }

    #[test]
    fn test_first_image_defaults_to_empty() {
        assert_eq!(product(vec![], vec![]).first_image(), "");
        assert_eq!(
            product(vec![], vec!["//cdn/a.jpg", "//cdn/b.jpg"]).first_image(),
            "//cdn/a.jpg"
        );
    }

    #[test]
    fn test_first_variant() {
        let p = product(
            vec![variant(7, Some("S"), None), variant(8, Some("M"), None)],
            vec![],
        );
        assert_eq!(p.first_variant().unwrap().id, VariantId::new(7));
        assert!(product(vec![], vec![]).first_variant().is_none());
    }
}
