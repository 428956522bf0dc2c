//! Price reconciliation command.

use anyhow::Result;
use atelier_commerce::pricing::{PriceField, PriceReconciler};
use serde::Serialize;

use super::PriceArgs;
use crate::context::Context;

#[derive(Debug, Serialize)]
struct PriceReport {
    actual_price: String,
    discount: String,
    offer_price: String,
    /// Field rewritten by the last edit.
    derived: Option<&'static str>,
    /// What the product form would submit as `offerPrice`.
    submitted_offer_price: String,
}

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let report = reconcile(&args);

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header("Prices");
    ctx.output.kv("Actual price", &report.actual_price);
    ctx.output.kv("Discount", &report.discount);
    ctx.output.kv("Offer price", &report.offer_price);
    ctx.output.kv("Submitted offer price", &report.submitted_offer_price);
    match report.derived {
        Some(field) => ctx.output.info(&format!("Derived {}", field)),
        None => ctx.output.info("Nothing derived"),
    }
    Ok(())
}

fn reconcile(args: &PriceArgs) -> PriceReport {
    let mut prices = PriceReconciler::new();
    let mut derived = prices.edit(PriceField::ActualPrice, args.actual.as_str());
    if let Some(discount) = &args.discount {
        derived = prices.edit(PriceField::Discount, discount.as_str());
    } else if let Some(offer) = &args.offer {
        derived = prices.edit(PriceField::OfferPrice, offer.as_str());
    }

    PriceReport {
        actual_price: prices.actual_price().to_string(),
        discount: prices.discount().to_string(),
        offer_price: prices.offer_price().to_string(),
        derived: derived.map(|f| f.as_str()),
        submitted_offer_price: prices.submission_offer_price(),
    }
}
