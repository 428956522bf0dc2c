//! Typed access to the storefront REST API.

use atelier_auth::{OtpVerification, RegistrationDetails, UserSession};
use atelier_commerce::catalog::{
    Category, Material, Product, SizeChart, SpecificationRecord, Subcategory,
};
use atelier_commerce::{CategoryId, ProductId, UserId};
use atelier_data::{ClientRequestBuilder, FetchClient, FormData, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{Routes, StorefrontConfig};
use crate::StorefrontError;

#[derive(Debug, Deserialize)]
struct WishlistToggleResponse {
    #[serde(rename = "isInWishlist", default)]
    is_in_wishlist: bool,
}

#[derive(Debug, Deserialize)]
struct SpecificationsResponse {
    #[serde(default)]
    specifications: Vec<SpecificationRecord>,
}

#[derive(Debug, Deserialize)]
struct MaterialsResponse {
    #[serde(default)]
    materials: Vec<Material>,
}

/// Storefront API client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
    routes: Routes,
}

impl StorefrontApi {
    pub fn new(client: FetchClient, routes: Routes) -> Self {
        Self { client, routes }
    }

    /// Build a `reqwest`-backed client from configuration.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, StorefrontError> {
        let client = FetchClient::reqwest(config.request_timeout())?
            .with_base_url(config.base_url.clone())
            .with_default_header("Accept", "application/json");
        Ok(Self::new(client, config.routes.clone()))
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Every product. With a user id the backend marks wishlist membership.
    pub async fn products(&self, user: Option<&UserId>) -> Result<Vec<Product>, StorefrontError> {
        let req = with_user(self.client.get(&self.routes.products), user);
        let products: Vec<Product> = self.fetch_json(req).await?;
        debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    /// Products of one category.
    pub async fn category_products(
        &self,
        category: &CategoryId,
        user: Option<&UserId>,
    ) -> Result<Vec<Product>, StorefrontError> {
        let path = self.routes.category_products_for(category);
        let req = with_user(self.client.get(path), user);
        let products: Vec<Product> = self.fetch_json(req).await?;
        debug!(category_id = %category, count = products.len(), "fetched category products");
        Ok(products)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, StorefrontError> {
        self.fetch_json(self.client.get(&self.routes.categories)).await
    }

    pub async fn subcategories(&self) -> Result<Vec<Subcategory>, StorefrontError> {
        self.fetch_json(self.client.get(&self.routes.subcategories))
            .await
    }

    pub async fn admin_categories(&self) -> Result<Vec<Category>, StorefrontError> {
        self.fetch_json(self.client.get(&self.routes.admin_categories))
            .await
    }

    pub async fn admin_subcategories(&self) -> Result<Vec<Subcategory>, StorefrontError> {
        self.fetch_json(self.client.get(&self.routes.admin_subcategories))
            .await
    }

    pub async fn specifications(&self) -> Result<Vec<SpecificationRecord>, StorefrontError> {
        let resp: SpecificationsResponse = self
            .fetch_json(self.client.get(&self.routes.specifications))
            .await?;
        Ok(resp.specifications)
    }

    pub async fn materials(&self) -> Result<Vec<Material>, StorefrontError> {
        let resp: MaterialsResponse = self
            .fetch_json(self.client.get(&self.routes.materials))
            .await?;
        Ok(resp.materials)
    }

    pub async fn size_charts(&self) -> Result<Vec<SizeChart>, StorefrontError> {
        self.fetch_json(self.client.get(&self.routes.size_charts))
            .await
    }

    /// Flip wishlist membership. Returns the membership the server reports.
    pub async fn toggle_wishlist(
        &self,
        session: &UserSession,
        product: &ProductId,
    ) -> Result<bool, StorefrontError> {
        let req = self
            .client
            .post(&self.routes.wishlist_toggle)
            .bearer_auth(&session.token)
            .json(&json!({ "userId": session.user_id, "productId": product }))?;
        let resp: WishlistToggleResponse = self.fetch_json(req).await?;
        info!(product_id = %product, in_wishlist = resp.is_in_wishlist, "wishlist toggled");
        Ok(resp.is_in_wishlist)
    }

    /// Product ids on the user's wishlist.
    pub async fn wishlist(&self, session: &UserSession) -> Result<Vec<ProductId>, StorefrontError> {
        let req = self
            .client
            .get(self.routes.wishlist_for(&session.user_id))
            .bearer_auth(&session.token);
        let value: Value = self.fetch_json(req).await?;
        Ok(parse_wishlist_ids(&value))
    }

    /// Create a product from a multipart form.
    pub async fn create_product(&self, token: &str, form: FormData) -> Result<Value, StorefrontError> {
        let req = self
            .client
            .post(&self.routes.create_product)
            .bearer_auth(token)
            .multipart(form);
        let created: Value = self.fetch_json(req).await?;
        info!("product created");
        Ok(created)
    }

    /// Post signup details; the backend (re)sends an OTP. The response is
    /// returned whatever its status.
    pub async fn register(&self, details: &RegistrationDetails) -> Result<Response, StorefrontError> {
        let req = self.client.post(&self.routes.register).json(details)?;
        Ok(req.send().await?)
    }

    /// Post an OTP for verification. The response is returned whatever its
    /// status.
    pub async fn verify_otp(&self, body: &OtpVerification) -> Result<Response, StorefrontError> {
        let req = self.client.post(&self.routes.verify_otp).json(body)?;
        Ok(req.send().await?)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        req: ClientRequestBuilder,
    ) -> Result<T, StorefrontError> {
        let resp = req.send().await?;
        if !resp.is_success() {
            let err = resp.api_error();
            warn!(status = resp.status, error = %err, "request failed");
            return Err(StorefrontError::Api(err));
        }
        Ok(resp.json()?)
    }
}

fn with_user(req: ClientRequestBuilder, user: Option<&UserId>) -> ClientRequestBuilder {
    match user {
        Some(user) => req.query("userId", user.as_str()),
        None => req,
    }
}

/// Pull product ids out of a wishlist body.
///
/// Accepts a bare array or one wrapped under `wishlist`, `products`,
/// `items` or `data`. Items may be ids, product objects, or entries
/// holding the product under `productId`/`product`.
pub fn parse_wishlist_ids(value: &Value) -> Vec<ProductId> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => ["wishlist", "products", "items", "data"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };
    items.iter().filter_map(item_id).map(ProductId::new).collect()
}

fn item_id(item: &Value) -> Option<String> {
    match item {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Object(map) => {
            // A wishlist row names its product; only a bare product is
            // identified by its own id.
            let product: Vec<&Value> = ["productId", "product"]
                .iter()
                .filter_map(|key| map.get(*key))
                .collect();
            if product.is_empty() {
                ["_id", "id"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            } else {
                product.into_iter().find_map(item_id)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(value: Value) -> Vec<String> {
        parse_wishlist_ids(&value)
            .into_iter()
            .map(ProductId::into_inner)
            .collect()
    }

    #[test]
    fn test_wishlist_shapes() {
        assert_eq!(ids(json!(["p1", "p2"])), vec!["p1", "p2"]);
        assert_eq!(ids(json!([{ "_id": "p1", "title": "Shirt" }])), vec!["p1"]);
        assert_eq!(
            ids(json!({ "wishlist": [{ "productId": { "_id": "p3" } }, { "productId": "p4" }] })),
            vec!["p3", "p4"]
        );
        assert_eq!(ids(json!({ "products": [{ "id": "p5" }] })), vec!["p5"]);
        assert!(ids(json!({ "message": "empty" })).is_empty());
        assert!(ids(json!(null)).is_empty());
    }

    #[test]
    fn test_wishlist_row_without_product_is_skipped() {
        let rows = json!([
            { "_id": "w1", "productId": null },
            { "_id": "w2", "productId": null, "product": { "_id": "p7" } },
            { "_id": "w3", "productId": "p8" }
        ]);
        assert_eq!(ids(rows), vec!["p7", "p8"]);
    }
}
