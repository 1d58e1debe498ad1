//! Product type conversion functions.

use quick_view_core::{Handle, Price, Product, ProductId, Variant, VariantId};

use super::types::{ProductJson, VariantJson};

/// Convert a product payload. The AJAX API does not report a currency, so the
/// shop's active currency is passed in.
pub fn convert_product(product: ProductJson, currency_code: &str) -> Product {
    Product {
        id: ProductId::new(product.id),
        // An unparseable handle is display data only; lookups use the caller's handle.
        handle: product.handle.and_then(|h| Handle::parse(&h).ok()),
        title: product.title,
        price: Price::from_minor(product.price, currency_code),
        description: product.description.unwrap_or_default(),
        images: product.images,
        variants: product.variants.into_iter().map(convert_variant).collect(),
    }
}

fn convert_variant(variant: VariantJson) -> Variant {
    Variant {
        id: VariantId::new(variant.id),
        title: variant.title,
        size: variant.option1,
        color: variant.option2,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_maps_options_in_order() {
        let json = r#"{
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
        }"#;
        let product = convert_product(serde_json::from_str(json).unwrap(), "EUR");

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.handle.unwrap().as_str(), "basic-tee");
        assert_eq!(product.price, Price::from_minor(1999, "EUR"));
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[1].id, VariantId::new(12));
        assert_eq!(product.variants[1].size.as_deref(), Some("M"));
        assert_eq!(product.variants[1].color.as_deref(), Some("Black"));
    }

    #[test]
    fn test_convert_product_defaults() {
        let json = r#"{"id": 2, "title": "Gift Card", "price": 0, "description": null}"#;
        let product = convert_product(serde_json::from_str(json).unwrap(), "USD");
        assert!(product.handle.is_none());
        assert_eq!(product.description, "");
        assert!(product.variants.is_empty());
    }
}
