//! CLI command implementations.

pub mod browse;
pub mod price;
pub mod signup;
pub mod wishlist;

use atelier_commerce::search::ListingKind;
use clap::{Args, Subcommand};

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Actual (list) price.
    #[arg(short, long)]
    pub actual: String,

    /// Discount percent; derives the offer price.
    #[arg(short, long, conflicts_with = "offer")]
    pub discount: Option<String>,

    /// Offer price; derives the discount.
    #[arg(short, long)]
    pub offer: Option<String>,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Listing to fetch: latest, offer, featured or category:<id>.
    #[arg(short, long, default_value = "latest", value_parser = parse_listing)]
    pub listing: ListingKind,

    /// Only products in this category id.
    #[arg(long)]
    pub category: Option<String>,

    /// Only products in this subcategory id.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Only products stocking this size.
    #[arg(long)]
    pub size: Option<String>,

    /// Only products of this material.
    #[arg(long)]
    pub material: Option<String>,

    /// Minimum offer price.
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum offer price.
    #[arg(long)]
    pub max: Option<f64>,

    /// Category chip (by name) on the home page rails.
    #[arg(long)]
    pub chip: Option<String>,

    /// Viewport width; shows the collapsed rail instead of every product.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// User id, to mark wishlist membership.
    #[arg(short, long, requires = "token")]
    pub user: Option<String>,

    /// Session token for the user.
    #[arg(short, long, requires = "user")]
    pub token: Option<String>,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    /// Product id to toggle.
    pub product: String,

    /// User id.
    #[arg(short, long)]
    pub user: String,

    /// Session token for the user.
    #[arg(short, long)]
    pub token: String,
}

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    #[command(subcommand)]
    pub command: SignupCommand,
}

#[derive(Subcommand)]
pub enum SignupCommand {
    /// Verify the code sent to an email address.
    Verify {
        /// Address the code was sent to.
        #[arg(short, long)]
        email: String,
        /// The code.
        #[arg(short, long)]
        otp: String,
    },
    /// Register again to get a fresh code.
    Resend {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        password: String,
    },
}

fn parse_listing(s: &str) -> Result<ListingKind, String> {
    ListingKind::parse(s)
        .ok_or_else(|| format!("unknown listing '{}', expected latest, offer, featured or category:<id>", s))
}
