//! Atelier CLI - Command line client for the Atelier storefront API.
//!
//! Commands:
//! - `atelier price` - Reconcile actual price, discount and offer price
//! - `atelier browse` - Fetch and filter products
//! - `atelier wishlist` - Toggle a product on a user's wishlist
//! - `atelier signup` - Verify or resend a signup OTP

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use atelier_storefront::telemetry;
use commands::{BrowseArgs, PriceArgs, SignupArgs, WishlistArgs};

/// Atelier CLI - Exercise the storefront API from a terminal
#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the three price fields of the product form
    Price(PriceArgs),

    /// Fetch a product listing and apply filters
    Browse(BrowseArgs),

    /// Toggle a product on a user's wishlist
    Wishlist(WishlistArgs),

    /// Signup OTP verification
    Signup(SignupArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let level = if cli.verbose {
        "debug"
    } else {
        ctx.config.logging.level.as_str()
    };
    if let Err(e) = telemetry::init(ctx.config.logging.format, level) {
        ctx.output.warn(&e.to_string());
    }
    if let Some(path) = &ctx.config_path {
        ctx.output.debug(&format!("Using config {}", path.display()));
    }

    let result = match cli.command {
        Commands::Price(args) => commands::price::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Signup(args) => commands::signup::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
