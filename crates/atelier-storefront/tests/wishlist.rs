mod common;

use atelier_commerce::ProductId;
use atelier_data::mocks::MockTransport;
use atelier_data::Method;
use atelier_storefront::wishlist::SIGN_IN_REQUIRED;
use atelier_storefront::{AppState, StorefrontError, ToggleOutcome};
use common::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_toggle_requires_session() {
    let mock = MockTransport::new();
    let wishlist = toggle(&mock, &AppState::new());

    let err = wishlist
        .toggle(&ProductId::new("p1"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err, StorefrontError::unauthenticated(SIGN_IN_REQUIRED));
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn test_toggle_posts_user_and_product() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, WISHLIST_ADD, 200, json!({ "isInWishlist": true })).await;
    reply_json(&mock, Method::Get, WISHLIST_U1, 200, json!(["p1"])).await;

    let state = signed_in();
    let outcome = toggle(&mock, &state)
        .toggle(&ProductId::new("p1"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, ToggleOutcome::Added);
    assert!(state.is_wishlisted(&ProductId::new("p1")).await);

    let sent = mock.requests_to(Method::Post, WISHLIST_ADD).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header_value("authorization"), Some("Bearer user-token"));
    let body = sent[0].body.as_ref().and_then(|b| b.as_json()).unwrap();
    assert_eq!(body, json!({ "userId": "u1", "productId": "p1" }));
}

#[tokio::test]
async fn test_refresh_failure_keeps_toggle_result() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, WISHLIST_ADD, 200, json!({ "isInWishlist": true })).await;
    reply_json(&mock, Method::Get, WISHLIST_U1, 500, json!({ "message": "boom" })).await;

    let state = signed_in();
    let outcome = toggle(&mock, &state)
        .toggle(&ProductId::new("p1"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, ToggleOutcome::Added);
    assert!(state.is_wishlisted(&ProductId::new("p1")).await);
}

#[tokio::test]
async fn test_server_rejection_leaves_state_alone() {
    let mock = MockTransport::new();
    reply_json(&mock, Method::Post, WISHLIST_ADD, 401, json!({ "message": "Token expired" })).await;

    let state = signed_in();
    let err = toggle(&mock, &state)
        .toggle(&ProductId::new("p1"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.user_messages(), vec!["Token expired"]);
    assert!(!state.is_wishlisted(&ProductId::new("p1")).await);
}

#[tokio::test]
async fn test_second_toggle_while_in_flight_is_superseded() {
    let mock = MockTransport::new();
    let gate = mock.gate(Method::Post, WISHLIST_ADD).await;
    reply_json(&mock, Method::Post, WISHLIST_ADD, 200, json!({ "isInWishlist": true })).await;
    reply_json(&mock, Method::Get, WISHLIST_U1, 200, json!(["p1"])).await;

    let state = signed_in();
    let wishlist = toggle(&mock, &state);
    let product = ProductId::new("p1");

    let first = {
        let wishlist = wishlist.clone();
        let product = product.clone();
        tokio::spawn(async move {
            let token = CancellationToken::new();
            wishlist.toggle(&product, &token).await
        })
    };
    mock.wait_for_requests(1).await;
    assert!(wishlist.is_in_flight(&product));

    let second = wishlist
        .toggle(&product, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(second, ToggleOutcome::Superseded);

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), ToggleOutcome::Added);
    assert!(!wishlist.is_in_flight(&product));
    assert_eq!(mock.requests_to(Method::Post, WISHLIST_ADD).await.len(), 1);
}

#[tokio::test]
async fn test_cancelled_toggle_releases_product() {
    let mock = MockTransport::new();
    let _gate = mock.gate(Method::Post, WISHLIST_ADD).await;
    reply_json(&mock, Method::Post, WISHLIST_ADD, 200, json!({ "isInWishlist": true })).await;

    let state = signed_in();
    let wishlist = toggle(&mock, &state);
    let product = ProductId::new("p1");
    let token = CancellationToken::new();

    let pending = {
        let wishlist = wishlist.clone();
        let product = product.clone();
        let token = token.clone();
        tokio::spawn(async move { wishlist.toggle(&product, &token).await })
    };
    mock.wait_for_requests(1).await;
    token.cancel();

    let err = pending.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert!(err.user_messages().is_empty());
    assert!(!wishlist.is_in_flight(&product));
    assert!(!state.is_wishlisted(&product).await);
}
