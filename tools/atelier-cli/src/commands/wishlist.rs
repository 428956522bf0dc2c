//! Wishlist toggle command.

use anyhow::Result;
use atelier_commerce::ProductId;
use atelier_storefront::{ScreenScope, ToggleOutcome, WishlistToggle};
use serde_json::json;

use super::WishlistArgs;
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let state = ctx.state(Some(args.user.as_str()), Some(args.token.as_str()));
    let toggle = WishlistToggle::new(api, state.clone());
    let product = ProductId::new(args.product);

    let scope = ScreenScope::new();
    let spinner = ctx.output.spinner("Updating wishlist...");
    let outcome = toggle.toggle(&product, &scope.child()).await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    let count = state.wishlist_count().await;
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "productId": product,
            "inWishlist": outcome == ToggleOutcome::Added,
            "wishlistCount": count,
        }));
        return Ok(());
    }

    match outcome {
        ToggleOutcome::Added => ctx.output.success(&format!("Added {} to the wishlist", product)),
        ToggleOutcome::Removed => {
            ctx.output.success(&format!("Removed {} from the wishlist", product))
        }
        ToggleOutcome::Superseded => ctx.output.warn("Another update is still in progress"),
    }
    ctx.output.kv("Wishlist items", &count.to_string());
    Ok(())
}
