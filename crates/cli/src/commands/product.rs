//! Product quick-view commands.

#![allow(clippy::print_stdout)]

use quick_view_core::{BonusRule, Handle, Selection};
use quick_view_storefront::error::add_breadcrumb;
use quick_view_storefront::{AjaxClient, QuickView, QuickViewError, QuickViewModel};

use super::cart::print_cart;

/// Open the quick-view and print it.
pub async fn show(
    client: AjaxClient,
    rule: BonusRule,
    handle: &Handle,
) -> Result<(), QuickViewError> {
    let mut view = QuickView::new(client, rule);
    let model = view.open(handle).await?;
    print_model(&model);
    Ok(())
}

/// Open the quick-view, apply the selection, and add it to the cart.
///
/// Values are matched against the variants as given, so a size or color the
/// product does not offer is reported as unavailable rather than ignored.
pub async fn add(
    client: AjaxClient,
    rule: BonusRule,
    handle: &Handle,
    size: Option<String>,
    color: Option<String>,
) -> Result<(), QuickViewError> {
    let currency = client.currency().to_owned();
    let mut view = QuickView::new(client, rule);
    view.open(handle).await?;

    let product = view.product().ok_or(QuickViewError::NotOpen)?;
    add_breadcrumb("cli", "Add to cart", Some(&[("handle", handle.as_str())]));
    let outcome = view
        .add_selection(product, &Selection { size, color })
        .await?;

    println!("Added to cart!");
    match outcome.cart {
        Some(cart) => print_cart(&cart, &currency),
        None => {
            for line in &outcome.lines {
                println!("Variant {} x{}", line.variant_id, line.quantity);
            }
        }
    }
    Ok(())
}

fn print_model(model: &QuickViewModel) {
    println!("{}", model.title);
    println!("{}", model.price);
    if !model.image.is_empty() {
        println!("Image: {}", model.image);
    }
    if !model.description.is_empty() {
        println!();
        println!("{}", model.description);
    }

    println!();
    println!("Colors:");
    for swatch in &model.swatches {
        println!("  [{}] {} {}", swatch.index, swatch.name, swatch.hex);
    }

    println!("Sizes:");
    for size in &model.sizes {
        println!("  {size}");
    }
}
