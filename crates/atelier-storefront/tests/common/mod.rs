#![allow(dead_code)]

use atelier_auth::UserSession;
use atelier_data::mocks::{MockReply, MockTransport};
use atelier_data::{FetchClient, Method};
use atelier_storefront::{AppState, Routes, StorefrontApi, WishlistToggle};
use serde_json::{json, Value};
use std::sync::Arc;

pub const BASE: &str = "http://atelier.test";

pub const PRODUCTS: &str = "/user/products/view-products";
pub const CATEGORIES: &str = "/user/category/get";
pub const SUBCATEGORIES: &str = "/user/subCategory/get";
pub const WISHLIST_ADD: &str = "/user/wishlist/add";
pub const WISHLIST_U1: &str = "/user/wishlist/get/u1";

pub fn api(mock: &MockTransport) -> StorefrontApi {
    let client = FetchClient::new(Arc::new(mock.clone())).with_base_url(BASE);
    StorefrontApi::new(client, Routes::default())
}

pub fn signed_in() -> AppState {
    AppState::with_session(UserSession::new("u1", "user-token"))
}

pub fn toggle(mock: &MockTransport, state: &AppState) -> WishlistToggle {
    WishlistToggle::new(api(mock), state.clone())
}

pub fn category_path(id: &str) -> String {
    format!("/user/products/products/category/{}", id)
}

/// A product as the backend sends it.
pub fn product(id: &str, category: &str, offer_price: f64) -> Value {
    json!({
        "_id": id,
        "id": id,
        "title": format!("Product {}", id),
        "actualPrice": offer_price * 2.0,
        "discount": 50,
        "offerPrice": offer_price,
        "category": { "_id": category.to_lowercase(), "id": category.to_lowercase(), "name": category },
        "subcategory": [],
        "colors": [{ "color": "#000000", "sizes": [{ "size": "M", "stock": 3 }] }],
        "features": {},
        "isLatestProduct": false,
        "isOfferProduct": false,
        "isFeaturedProduct": false,
        "isInWishlist": false
    })
}

pub fn with(mut value: Value, key: &str, field: Value) -> Value {
    value[key] = field;
    value
}

pub async fn reply_json(mock: &MockTransport, method: Method, path: &str, status: u16, body: Value) {
    mock.reply(method, path, MockReply::json(status, body)).await;
}
