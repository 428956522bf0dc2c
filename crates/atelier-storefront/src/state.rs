//! Application-wide state shared by every screen.
//!
//! Screens receive an [`AppState`] handle when they are built; there is no
//! global. Badge counts are derived from what is held here.

use atelier_auth::UserSession;
use atelier_commerce::{ProductId, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::StorefrontApi;
use crate::StorefrontError;

#[derive(Debug, Default)]
struct AppStateInner {
    session: Option<UserSession>,
    admin_token: Option<String>,
    wishlist: BTreeSet<ProductId>,
    cart_count: usize,
}

/// Shared handle. Clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    inner: Arc<RwLock<AppStateInner>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: UserSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                session: Some(session),
                ..AppStateInner::default()
            })),
        }
    }

    pub async fn session(&self) -> Option<UserSession> {
        self.inner.read().await.session.clone()
    }

    pub async fn user_id(&self) -> Option<UserId> {
        self.inner
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.user_id.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.session.is_some()
    }

    pub async fn set_session(&self, session: UserSession) {
        debug!(user_id = %session.user_id, "session stored");
        self.inner.write().await.session = Some(session);
    }

    /// Sign out. The wishlist belongs to the user, so it goes too.
    pub async fn clear_session(&self) {
        let mut inner = self.inner.write().await;
        inner.session = None;
        inner.wishlist.clear();
    }

    /// Token for admin-only calls (product entry).
    pub async fn admin_token(&self) -> Option<String> {
        self.inner.read().await.admin_token.clone()
    }

    pub async fn set_admin_token(&self, token: Option<String>) {
        self.inner.write().await.admin_token = token.filter(|t| !t.is_empty());
    }

    pub async fn is_wishlisted(&self, product: &ProductId) -> bool {
        self.inner.read().await.wishlist.contains(product)
    }

    pub async fn wishlist_ids(&self) -> BTreeSet<ProductId> {
        self.inner.read().await.wishlist.clone()
    }

    pub async fn set_wishlist(&self, ids: impl IntoIterator<Item = ProductId>) {
        self.inner.write().await.wishlist = ids.into_iter().collect();
    }

    /// Record one membership change without a round trip.
    pub async fn mark_wishlisted(&self, product: ProductId, in_wishlist: bool) {
        let mut inner = self.inner.write().await;
        if in_wishlist {
            inner.wishlist.insert(product);
        } else {
            inner.wishlist.remove(&product);
        }
    }

    /// Wishlist badge count.
    pub async fn wishlist_count(&self) -> usize {
        self.inner.read().await.wishlist.len()
    }

    /// Cart badge count.
    pub async fn cart_count(&self) -> usize {
        self.inner.read().await.cart_count
    }

    pub async fn set_cart_count(&self, count: usize) {
        self.inner.write().await.cart_count = count;
    }

    /// Re-fetch the signed-in user's wishlist and replace the held set.
    /// Signed-out users have an empty wishlist and nothing is fetched.
    pub async fn refresh_wishlist(&self, api: &StorefrontApi) -> Result<usize, StorefrontError> {
        let Some(session) = self.session().await else {
            self.set_wishlist(Vec::new()).await;
            return Ok(0);
        };
        let ids = api.wishlist(&session).await?;
        let count = ids.len();
        self.set_wishlist(ids).await;
        debug!(count, "wishlist refreshed");
        Ok(count)
    }
}
