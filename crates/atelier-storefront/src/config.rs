//! Storefront configuration.
//!
//! Loaded from TOML or JSON, chosen by file extension. Every section is
//! optional; missing keys take the defaults below.

use atelier_auth::OtpSettings;
use atelier_commerce::search::ListingLimits;
use atelier_commerce::{CategoryId, UserId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::telemetry::LogFormat;
use crate::StorefrontError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub routes: Routes,
    pub listing: ListingLimits,
    pub otp: OtpSettings,
    pub logging: LoggingConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            routes: Routes::default(),
            listing: ListingLimits::default(),
            otp: OtpSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, StorefrontError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, StorefrontError> {
        toml::from_str(content).map_err(|e| StorefrontError::Config(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, StorefrontError> {
        serde_json::from_str(content).map_err(|e| StorefrontError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Human,
            level: "info".to_string(),
        }
    }
}

/// Endpoint paths, relative to `base_url`.
///
/// `{id}` and `{userId}` are substituted where a path takes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub products: String,
    pub category_products: String,
    pub categories: String,
    pub subcategories: String,
    pub wishlist_toggle: String,
    pub wishlist: String,
    pub admin_categories: String,
    pub admin_subcategories: String,
    pub specifications: String,
    pub materials: String,
    pub size_charts: String,
    pub create_product: String,
    pub register: String,
    pub verify_otp: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            products: "/user/products/view-products".to_string(),
            category_products: "/user/products/products/category/{id}".to_string(),
            categories: "/user/category/get".to_string(),
            subcategories: "/user/subCategory/get".to_string(),
            wishlist_toggle: "/user/wishlist/add".to_string(),
            wishlist: "/user/wishlist/get/{userId}".to_string(),
            admin_categories: "/admin/category/get".to_string(),
            admin_subcategories: "/admin/Subcategory/get".to_string(),
            specifications: "/admin/specification/all".to_string(),
            materials: "/admin/material/view".to_string(),
            size_charts: "/admin/sizechart/get".to_string(),
            create_product: "/admin/products/create-product".to_string(),
            register: "/user/auth/register".to_string(),
            verify_otp: "/user/auth/register/verify-otp".to_string(),
        }
    }
}

impl Routes {
    pub fn category_products_for(&self, category: &CategoryId) -> String {
        self.category_products.replace("{id}", category.as_str())
    }

    pub fn wishlist_for(&self, user: &UserId) -> String {
        self.wishlist.replace("{userId}", user.as_str())
    }
}
