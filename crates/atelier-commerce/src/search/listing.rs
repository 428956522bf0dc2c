//! Home page product rails (latest / offer / featured) and the category
//! product page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Product;
use crate::ids::CategoryId;

/// Which products a listing screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingKind {
    Latest,
    Offer,
    Featured,
    /// Products of one category, fetched from the category endpoint.
    Category(CategoryId),
}

impl ListingKind {
    /// Check whether a product from the full catalog belongs in this rail.
    ///
    /// Category listings are already scoped by the backend, so everything
    /// they receive belongs.
    pub fn includes(&self, product: &Product) -> bool {
        match self {
            ListingKind::Latest => product.is_latest,
            ListingKind::Offer => product.is_offer,
            ListingKind::Featured => product.is_featured,
            ListingKind::Category(_) => true,
        }
    }

    /// Parse `latest`, `offer`, `featured` or `category:<id>`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "latest" => Some(ListingKind::Latest),
            "offer" => Some(ListingKind::Offer),
            "featured" => Some(ListingKind::Featured),
            other => other
                .strip_prefix("category:")
                .filter(|id| !id.is_empty())
                .map(|id| ListingKind::Category(CategoryId::new(id))),
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKind::Latest => write!(f, "latest"),
            ListingKind::Offer => write!(f, "offer"),
            ListingKind::Featured => write!(f, "featured"),
            ListingKind::Category(id) => write!(f, "category:{}", id),
        }
    }
}

/// The category chip row above a home page rail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryChip {
    #[default]
    All,
    /// Chips match on the category name, not the id.
    Named(String),
}

impl CategoryChip {
    pub fn named(name: impl Into<String>) -> Self {
        CategoryChip::Named(name.into())
    }

    /// Check whether a product shows under this chip.
    pub fn includes(&self, product: &Product) -> bool {
        match self {
            CategoryChip::All => true,
            CategoryChip::Named(name) => product.primary_category_name() == Some(name.as_str()),
        }
    }
}

/// How many products a collapsed rail shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingLimits {
    /// Collapsed count on wide viewports.
    pub compact_limit: usize,
    /// Collapsed count on narrow viewports.
    pub narrow_limit: usize,
    /// Viewport width (px) below which the narrow limit applies.
    pub narrow_breakpoint: u32,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            compact_limit: 5,
            narrow_limit: 6,
            narrow_breakpoint: 640,
        }
    }
}

impl ListingLimits {
    /// Collapsed count for a viewport width.
    pub fn limit_for(&self, viewport_width: u32) -> usize {
        if viewport_width < self.narrow_breakpoint {
            self.narrow_limit
        } else {
            self.compact_limit
        }
    }

    /// The visible part of a rail.
    pub fn visible<'a, T>(&self, items: &'a [T], expanded: bool, viewport_width: u32) -> &'a [T] {
        if expanded {
            return items;
        }
        let limit = self.limit_for(viewport_width).min(items.len());
        &items[..limit]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryRef;

    #[test]
    fn test_kind_flags() {
        let mut p = Product::new("p1", "Tee");
        p.is_offer = true;
        assert!(ListingKind::Offer.includes(&p));
        assert!(!ListingKind::Latest.includes(&p));
        assert!(!ListingKind::Featured.includes(&p));
        assert!(ListingKind::Category("c1".into()).includes(&p));
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!(ListingKind::parse("latest"), Some(ListingKind::Latest));
        let kind = ListingKind::parse("category:c42").unwrap();
        assert_eq!(kind, ListingKind::Category("c42".into()));
        assert_eq!(kind.to_string(), "category:c42");
        assert_eq!(ListingKind::parse("category:"), None);
        assert_eq!(ListingKind::parse("bestsellers"), None);
    }

    #[test]
    fn test_chip_matches_first_category_name() {
        let mut p = Product::new("p1", "Tee");
        p.categories = vec![
            CategoryRef::new("c1").with_label("Men"),
            CategoryRef::new("c2").with_label("Summer"),
        ];
        assert!(CategoryChip::All.includes(&p));
        assert!(CategoryChip::named("Men").includes(&p));
        assert!(!CategoryChip::named("Summer").includes(&p));
    }

    #[test]
    fn test_visible_slice() {
        let limits = ListingLimits::default();
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(limits.visible(&items, false, 1280).len(), 5);
        assert_eq!(limits.visible(&items, false, 375).len(), 6);
        assert_eq!(limits.visible(&items, true, 375).len(), 10);
        assert_eq!(limits.visible(&items[..3], false, 1280).len(), 3);
    }
}
