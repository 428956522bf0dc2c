//! Wishlist membership toggling.

use atelier_commerce::ProductId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::StorefrontApi;
use crate::state::AppState;
use crate::task::cancellable;
use crate::StorefrontError;

/// Shown when a signed-out visitor taps a heart.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to add products to your wishlist";

/// Result of one toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Another toggle of the same product was still in flight; nothing sent.
    Superseded,
}

/// Toggles wishlist membership, one request per product at a time.
///
/// The heart only changes from what the server reports; there is no
/// optimistic flip. Clones share the in-flight set.
#[derive(Debug, Clone)]
pub struct WishlistToggle {
    api: StorefrontApi,
    state: AppState,
    in_flight: Arc<Mutex<HashSet<ProductId>>>,
}

impl WishlistToggle {
    pub fn new(api: StorefrontApi, state: AppState) -> Self {
        Self {
            api,
            state,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_in_flight(&self, product: &ProductId) -> bool {
        lock(&self.in_flight).contains(product)
    }

    /// Flip membership of `product`, then refresh the shared wishlist.
    ///
    /// A failed refresh is logged; the toggle itself still succeeded.
    pub async fn toggle(
        &self,
        product: &ProductId,
        token: &CancellationToken,
    ) -> Result<ToggleOutcome, StorefrontError> {
        let Some(session) = self.state.session().await else {
            return Err(StorefrontError::unauthenticated(SIGN_IN_REQUIRED));
        };

        let Some(_claim) = InFlight::claim(&self.in_flight, product) else {
            debug!(product_id = %product, "toggle already in flight, dropping");
            return Ok(ToggleOutcome::Superseded);
        };

        let in_wishlist =
            cancellable(token, self.api.toggle_wishlist(&session, product)).await?;
        self.state.mark_wishlisted(product.clone(), in_wishlist).await;

        if let Err(err) = cancellable(token, self.state.refresh_wishlist(&self.api)).await {
            warn!(product_id = %product, error = %err, "wishlist refresh failed");
        }

        Ok(if in_wishlist {
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Removed
        })
    }
}

fn lock(set: &Mutex<HashSet<ProductId>>) -> std::sync::MutexGuard<'_, HashSet<ProductId>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a product busy until dropped, including when the call is
/// cancelled mid-flight.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<ProductId>>,
    product: ProductId,
}

impl<'a> InFlight<'a> {
    fn claim(set: &'a Mutex<HashSet<ProductId>>, product: &ProductId) -> Option<Self> {
        if !lock(set).insert(product.clone()) {
            return None;
        }
        Some(Self {
            set,
            product: product.clone(),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.product);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_exclusive_per_product() {
        let set = Mutex::new(HashSet::new());
        let a = ProductId::new("a");
        let first = InFlight::claim(&set, &a);
        assert!(first.is_some());
        assert!(InFlight::claim(&set, &a).is_none());
        assert!(InFlight::claim(&set, &ProductId::new("b")).is_some());

        drop(first);
        assert!(InFlight::claim(&set, &a).is_some());
    }
}
