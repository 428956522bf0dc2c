//! The category page: a navigation context plus conjunctive filters.

use atelier_commerce::catalog::{subcategory_candidates, Category, Product, Subcategory};
use atelier_commerce::search::{FilterSelection, PriceRange, ProductFilterEngine};
use atelier_commerce::{CategoryId, ProductId, SubcategoryId};
use futures::future::try_join_all;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::task::{cancellable, ScreenScope};
use crate::wishlist::{ToggleOutcome, WishlistToggle};
use crate::StorefrontError;

/// Filter screen state.
///
/// Entering a navigation context (the categories the page was opened for)
/// loads their products and resets every filter. Each selection change
/// re-runs the filter over the loaded products.
#[derive(Debug)]
pub struct CategoryBrowser {
    api: StorefrontApi,
    state: AppState,
    wishlist: WishlistToggle,
    scope: ScreenScope,
    context: Vec<CategoryId>,
    engine: ProductFilterEngine,
    selection: FilterSelection,
    results: Vec<ProductId>,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    hearts: HashMap<ProductId, bool>,
}

impl CategoryBrowser {
    pub fn new(api: StorefrontApi, state: AppState, wishlist: WishlistToggle) -> Self {
        Self {
            api,
            state,
            wishlist,
            scope: ScreenScope::new(),
            context: Vec::new(),
            engine: ProductFilterEngine::default(),
            selection: FilterSelection::new(),
            results: Vec::new(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            hearts: HashMap::new(),
        }
    }

    /// Open the page for a set of categories.
    pub async fn enter(&mut self, context: Vec<CategoryId>) -> Result<(), StorefrontError> {
        let token = self.scope.child();
        let loaded = cancellable(&token, async {
            let products = self.fetch_context_products(&context).await?;
            let (categories, subcategories) =
                futures::try_join!(self.api.categories(), self.api.subcategories())?;
            Ok::<_, StorefrontError>((products, categories, subcategories))
        })
        .await?;
        let (products, categories, subcategories) = loaded;

        info!(context = ?context, count = products.len(), "category page entered");
        self.context = context;
        self.selection.reset();
        self.seed_hearts(&products);
        self.engine.replace(products);
        self.categories = categories;
        self.subcategories = subcategories;
        self.apply();
        Ok(())
    }

    pub fn context(&self) -> &[CategoryId] {
        &self.context
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Products passing every active filter, in fetched order.
    pub fn results(&self) -> Vec<&Product> {
        let wanted: HashSet<&ProductId> = self.results.iter().collect();
        self.engine
            .products()
            .iter()
            .filter(|p| wanted.contains(&p.id))
            .collect()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Subcategories on offer: those under the selected category, or under
    /// the navigation context when none is selected.
    pub fn subcategory_options(&self) -> Vec<&Subcategory> {
        match &self.selection.category {
            Some(selected) => subcategory_candidates(&self.subcategories, std::slice::from_ref(selected)),
            None => subcategory_candidates(&self.subcategories, &self.context),
        }
    }

    /// Sizes stocked by any loaded product.
    pub fn size_options(&self) -> Vec<String> {
        let sizes: BTreeSet<&str> = self
            .engine
            .products()
            .iter()
            .flat_map(|p| p.available_sizes())
            .collect();
        sizes.into_iter().map(str::to_string).collect()
    }

    /// Materials named by any loaded product.
    pub fn material_options(&self) -> Vec<String> {
        let materials: BTreeSet<&str> = self
            .engine
            .products()
            .iter()
            .filter_map(Product::material)
            .collect();
        materials.into_iter().map(str::to_string).collect()
    }

    /// Selecting a category clears the subcategory.
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        debug!(category = ?category, "category filter changed");
        self.selection.select_category(category);
        self.apply();
    }

    pub fn select_subcategory(&mut self, subcategory: Option<SubcategoryId>) {
        self.selection.select_subcategory(subcategory);
        self.apply();
    }

    pub fn select_size(&mut self, size: Option<String>) {
        self.selection.select_size(size);
        self.apply();
    }

    pub fn select_material(&mut self, material: Option<String>) {
        self.selection.select_material(material);
        self.apply();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.selection.set_price_range(range);
        self.apply();
    }

    pub fn clear_filters(&mut self) {
        self.selection.reset();
        self.apply();
    }

    pub fn is_hearted(&self, product: &ProductId) -> bool {
        self.hearts.get(product).copied().unwrap_or(false)
    }

    /// Toggle a heart. A removal reloads the context's products, keeping
    /// the current filters.
    pub async fn toggle_wishlist(&mut self, product: &ProductId) -> Result<ToggleOutcome, StorefrontError> {
        let token = self.scope.child();
        let outcome = self.wishlist.toggle(product, &token).await?;
        match outcome {
            ToggleOutcome::Added => {
                self.hearts.insert(product.clone(), true);
            }
            ToggleOutcome::Removed => {
                self.hearts.insert(product.clone(), false);
                let token = self.scope.child();
                let context = self.context.clone();
                let products =
                    cancellable(&token, self.fetch_context_products(&context)).await?;
                self.seed_hearts(&products);
                self.engine.replace(products);
                self.apply();
            }
            ToggleOutcome::Superseded => {}
        }
        Ok(outcome)
    }

    pub fn teardown(&self) {
        self.scope.teardown();
    }

    fn apply(&mut self) {
        self.results = self
            .engine
            .filter(&self.selection)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();
    }

    fn seed_hearts(&mut self, products: &[Product]) {
        self.hearts = products
            .iter()
            .map(|p| (p.id.clone(), p.is_in_wishlist))
            .collect();
    }

    /// Products of every context category, first occurrence wins.
    async fn fetch_context_products(
        &self,
        context: &[CategoryId],
    ) -> Result<Vec<Product>, StorefrontError> {
        let user = self.state.user_id().await;
        let batches = try_join_all(
            context
                .iter()
                .map(|id| self.api.category_products(id, user.as_ref())),
        )
        .await?;

        let mut seen = HashSet::new();
        Ok(batches
            .into_iter()
            .flatten()
            .filter(|p| seen.insert(p.id.clone()))
            .collect())
    }
}
