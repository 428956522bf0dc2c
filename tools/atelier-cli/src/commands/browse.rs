//! Product browsing command.

use anyhow::{Context as _, Result};
use atelier_commerce::catalog::Product;
use atelier_commerce::search::{
    CategoryChip, FilterSelection, ListingKind, PriceRange, ProductFilterEngine,
};
use atelier_commerce::{CategoryId, SubcategoryId};
use atelier_storefront::{CategoryBrowser, ProductListing, WishlistToggle};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{color_swatches, heart, price_summary};

const WIDTHS: [usize; 6] = [26, 30, 28, 16, 6, 2];

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let selection = selection(&args)?;
    let api = ctx.api()?;
    let state = ctx.state(args.user.as_deref(), args.token.as_deref());
    let wishlist = WishlistToggle::new(api.clone(), state.clone());

    let spinner = ctx.output.spinner(&format!("Fetching {} products...", args.listing));
    let rows: Vec<(Product, bool)> = match &args.listing {
        ListingKind::Category(id) => {
            let mut page = CategoryBrowser::new(api, state, wishlist);
            page.enter(vec![id.clone()])
                .await
                .with_context(|| format!("Failed to load category {}", id))?;
            page.select_category(selection.category.clone());
            page.select_subcategory(selection.subcategory.clone());
            page.select_size(selection.size.clone());
            page.select_material(selection.material.clone());
            page.set_price_range(selection.price_range);
            let rows = page
                .results()
                .into_iter()
                .map(|p| (p.clone(), page.is_hearted(&p.id)))
                .collect();
            rows
        }
        kind => {
            let mut listing =
                ProductListing::new(kind.clone(), api, state, wishlist, ctx.config.listing);
            listing
                .load()
                .await
                .with_context(|| format!("Failed to load {} products", kind))?;
            if let Some(chip) = &args.chip {
                listing.select_chip(CategoryChip::named(chip.as_str()));
            }
            let shown: Vec<Product> = match args.width {
                Some(width) => listing.visible(width).into_iter().cloned().collect(),
                None => listing.filtered().into_iter().cloned().collect(),
            };
            let engine = ProductFilterEngine::new(shown);
            let rows = engine
                .filter(&selection)
                .into_iter()
                .map(|p| (p.clone(), listing.is_hearted(&p.id)))
                .collect();
            rows
        }
    };
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        let products: Vec<&Product> = rows.iter().map(|(p, _)| p).collect();
        ctx.output.json(&products);
        return Ok(());
    }

    if rows.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    ctx.output.header(&format!("{} products", args.listing));
    ctx.output
        .table_row(&["ID", "TITLE", "PRICE", "CATEGORY", "STOCK", ""], &WIDTHS);
    for (product, hearted) in &rows {
        let stock = product.total_stock().to_string();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.title,
                &price_summary(product),
                &product.category_names(),
                &stock,
                &heart(*hearted),
            ],
            &WIDTHS,
        );
        if !product.colors.is_empty() {
            ctx.output.kv("colours", &color_swatches(product));
        }
    }
    ctx.output.info(&format!("Total: {} product(s)", rows.len()));
    Ok(())
}

fn selection(args: &BrowseArgs) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    selection.select_category(args.category.as_deref().map(CategoryId::new));
    selection.select_subcategory(args.subcategory.as_deref().map(SubcategoryId::new));
    selection.select_size(args.size.clone());
    selection.select_material(args.material.clone());
    if args.min.is_some() || args.max.is_some() {
        let range = PriceRange::new(args.min.unwrap_or(0.0), args.max.unwrap_or(f64::INFINITY))?;
        selection.set_price_range(range);
    }
    Ok(selection)
}
