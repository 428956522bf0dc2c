//! Product listing screens: the home page rails and the category page.

use atelier_commerce::catalog::{Category, Product};
use atelier_commerce::search::{CategoryChip, ListingKind, ListingLimits};
use atelier_commerce::ProductId;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::task::{cancellable, ScreenScope};
use crate::wishlist::{ToggleOutcome, WishlistToggle};
use crate::StorefrontError;

/// One listing screen.
#[derive(Debug)]
pub struct ProductListing {
    kind: ListingKind,
    api: StorefrontApi,
    state: AppState,
    wishlist: WishlistToggle,
    limits: ListingLimits,
    scope: ScreenScope,
    products: Vec<Product>,
    categories: Vec<Category>,
    chip: CategoryChip,
    expanded: bool,
    hearts: HashMap<ProductId, bool>,
}

impl ProductListing {
    pub fn new(
        kind: ListingKind,
        api: StorefrontApi,
        state: AppState,
        wishlist: WishlistToggle,
        limits: ListingLimits,
    ) -> Self {
        Self {
            kind,
            api,
            state,
            wishlist,
            limits,
            scope: ScreenScope::new(),
            products: Vec::new(),
            categories: Vec::new(),
            chip: CategoryChip::All,
            expanded: false,
            hearts: HashMap::new(),
        }
    }

    pub fn kind(&self) -> &ListingKind {
        &self.kind
    }

    /// Load products and the chip categories.
    ///
    /// Chip categories are decoration: failing to load them leaves the
    /// "All" chip alone and does not fail the screen.
    pub async fn load(&mut self) -> Result<(), StorefrontError> {
        self.reload_products().await?;

        let token = self.scope.child();
        match cancellable(&token, self.api.categories()).await {
            Ok(categories) => self.categories = categories,
            Err(StorefrontError::Cancelled) => return Err(StorefrontError::Cancelled),
            Err(err) => warn!(listing = %self.kind, error = %err, "chip categories unavailable"),
        }
        Ok(())
    }

    /// Fetch products again and re-seed the hearts from the response.
    pub async fn reload_products(&mut self) -> Result<(), StorefrontError> {
        let token = self.scope.child();
        let user = self.state.user_id().await;

        let fetched = match &self.kind {
            ListingKind::Category(id) => {
                cancellable(&token, self.api.category_products(id, user.as_ref())).await?
            }
            _ => cancellable(&token, self.api.products(user.as_ref())).await?,
        };

        let products: Vec<Product> = fetched
            .into_iter()
            .filter(|p| self.kind.includes(p))
            .collect();
        self.hearts = products
            .iter()
            .map(|p| (p.id.clone(), p.is_in_wishlist))
            .collect();
        info!(listing = %self.kind, count = products.len(), "listing loaded");
        self.products = products;
        Ok(())
    }

    /// Every product of this listing, unfiltered.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Chip row: "All" first, then one per category.
    pub fn chips(&self) -> Vec<CategoryChip> {
        std::iter::once(CategoryChip::All)
            .chain(self.categories.iter().map(|c| CategoryChip::named(&c.name)))
            .collect()
    }

    pub fn selected_chip(&self) -> &CategoryChip {
        &self.chip
    }

    /// Switch chip. Collapses the rail.
    pub fn select_chip(&mut self, chip: CategoryChip) {
        debug!(listing = %self.kind, ?chip, "chip selected");
        self.chip = chip;
        self.expanded = false;
    }

    /// Products under the selected chip.
    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.chip.includes(p))
            .collect()
    }

    /// What the rail shows at a viewport width.
    pub fn visible(&self, viewport_width: u32) -> Vec<&Product> {
        let filtered = self.filtered();
        self.limits
            .visible(&filtered, self.expanded, viewport_width)
            .to_vec()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn is_hearted(&self, product: &ProductId) -> bool {
        self.hearts.get(product).copied().unwrap_or(false)
    }

    /// Toggle the heart of one product.
    ///
    /// A removal re-fetches the listing, so products that only appeared
    /// because of the wishlist state are refreshed too.
    pub async fn toggle_wishlist(&mut self, product: &ProductId) -> Result<ToggleOutcome, StorefrontError> {
        let token = self.scope.child();
        let outcome = self.wishlist.toggle(product, &token).await?;
        match outcome {
            ToggleOutcome::Added => {
                self.hearts.insert(product.clone(), true);
            }
            ToggleOutcome::Removed => {
                self.hearts.insert(product.clone(), false);
                self.reload_products().await?;
            }
            ToggleOutcome::Superseded => {}
        }
        Ok(outcome)
    }

    /// Cancel everything in flight; the screen is going away.
    pub fn teardown(&self) {
        self.scope.teardown();
    }
}
