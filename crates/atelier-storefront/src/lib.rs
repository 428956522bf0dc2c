//! Screen-level state for the Atelier storefront.
//!
//! Each screen is a plain struct built over a [`StorefrontApi`] and a shared
//! [`AppState`]:
//!
//! - [`ProductListing`]: the latest / offer / featured rails and category
//!   product lists, with chips, "show all" and wishlist hearts
//! - [`CategoryBrowser`]: the filter page
//! - [`CreateProductForm`]: admin product entry
//! - [`SignupFlow`]: OTP verification after signup
//!
//! Every screen owns a [`ScreenScope`]; tearing the screen down (or
//! dropping it) cancels whatever it still has in flight.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod listing;
pub mod product_form;
pub mod signup;
pub mod state;
pub mod task;
pub mod telemetry;
pub mod wishlist;

pub use api::StorefrontApi;
pub use browser::CategoryBrowser;
pub use config::{LoggingConfig, Routes, StorefrontConfig};
pub use error::{Severity, StorefrontError};
pub use listing::ProductListing;
pub use product_form::{CreateProductForm, FormOptions, Manufacturer, ProductFlags};
pub use signup::SignupFlow;
pub use state::AppState;
pub use task::{cancellable, ScreenScope};
pub use telemetry::LogFormat;
pub use wishlist::{ToggleOutcome, WishlistToggle};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AppState, CategoryBrowser, CreateProductForm, ProductListing, Severity, SignupFlow,
        StorefrontApi, StorefrontConfig, StorefrontError, ToggleOutcome, WishlistToggle,
    };
}
