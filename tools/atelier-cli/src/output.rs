//! Output formatting for the CLI.

use atelier_commerce::catalog::Product;
use atelier_commerce::pricing::fixed2;
use atelier_commerce::variants::{color_label, contrast_tone, TextTone};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for a request in flight.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(spinner_style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Offer price with the discount, e.g. `800.00 (20% off 1000.00)`.
pub fn price_summary(product: &Product) -> String {
    if product.discount > 0.0 {
        format!(
            "{} ({}% off {})",
            fixed2(product.offer_price),
            product.discount,
            fixed2(product.actual_price)
        )
    } else {
        fixed2(product.offer_price)
    }
}

/// Colour names of a product, each on a swatch of its own colour.
pub fn color_swatches(product: &Product) -> String {
    product
        .colors
        .iter()
        .map(|variant| {
            let label = color_label(&variant.color);
            match contrast_tone(&variant.color) {
                TextTone::Light => style(label).white().on_black().to_string(),
                TextTone::Dark => style(label).black().on_white().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heart marker for wishlist membership.
pub fn heart(hearted: bool) -> String {
    if hearted {
        style("♥").red().to_string()
    } else {
        style("♡").dim().to_string()
    }
}
