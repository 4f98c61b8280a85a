//! Guard chain behaviour through the real router: 401 vs 403 matrix,
//! token issuance, and the deleted-identity case.

use axum::body::Body;
use http::{header, Request, StatusCode};
use market_auth::{issue_token, AuthState};
use market_config::{AppConfig, ServerConfig};
use market_db::repositories::UserRepository;
use market_db::{DbClient, SqlMarketRepositories};
use market_common::models::{User, UserRole};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "guard-test-secret";

async fn test_state() -> Arc<AuthState> {
    // Same value in every test, so concurrent writes are harmless.
    std::env::set_var("MARKET_TOKEN_SECRET", SECRET);

    let path = std::env::temp_dir().join(format!("market-auth-test-{}.db", Uuid::new_v4()));
    let client = DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("sqlite pool");
    let repos = SqlMarketRepositories::new(client);
    repos.init_schemas().await.expect("schema init");

    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_stripe: false,
        database: None,
        auth: None,
        stripe: None,
    };

    Arc::new(AuthState {
        config: Arc::new(config),
        users: repos.users,
    })
}

async fn seed_user(state: &AuthState, email: &str, role: UserRole) {
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: format!("{role} user"),
        role,
        verified: false,
    };
    state.users.upsert(user).await.expect("seed user");
}

fn bearer(email: &str) -> String {
    format!("Bearer {}", issue_token(email, SECRET, 24))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let state = test_state().await;
    let app = market_auth::routes(state);

    let response = app
        .oneshot(
            Request::get("/users/seller/any@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn forged_and_expired_tokens_are_both_401() {
    let state = test_state().await;
    seed_user(&state, "buyer@example.com", UserRole::Buyer).await;
    let app = market_auth::routes(state);

    let forged = format!("Bearer {}", issue_token("buyer@example.com", "wrong-secret", 24));
    let expired = format!("Bearer {}", issue_token("buyer@example.com", SECRET, -1));

    for token in [forged, expired, "Bearer not-a-token".to_string()] {
        let response = app
            .clone()
            .oneshot(
                Request::get("/users/buyer/buyer@example.com")
                    .header(header::AUTHORIZATION, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn buyer_token_on_admin_route_is_403() {
    let state = test_state().await;
    seed_user(&state, "buyer@example.com", UserRole::Buyer).await;
    let app = market_auth::routes(state);

    let response = app
        .oneshot(
            Request::get("/allSellers")
                .header(header::AUTHORIZATION, bearer("buyer@example.com"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_list_verify_and_delete_sellers() {
    let state = test_state().await;
    seed_user(&state, "admin@example.com", UserRole::Admin).await;
    seed_user(&state, "seller@example.com", UserRole::Seller).await;
    let app = market_auth::routes(state);
    let auth = bearer("admin@example.com");

    let response = app
        .clone()
        .oneshot(
            Request::get("/allSellers")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sellers = body_json(response).await;
    assert_eq!(sellers.as_array().map(Vec::len), Some(1));

    let response = app
        .clone()
        .oneshot(
            Request::put("/allSellers/verify/seller@example.com")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::delete("/allSellers/seller@example.com")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second delete finds nothing.
    let response = app
        .oneshot(
            Request::delete("/allSellers/seller@example.com")
                .header(header::AUTHORIZATION, &auth)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn jwt_endpoint_issues_usable_tokens_only_for_registered_emails() {
    let state = test_state().await;
    seed_user(&state, "alice@example.com", UserRole::Buyer).await;
    let app = market_auth::routes(state);

    let response = app
        .clone()
        .oneshot(
            Request::get("/jwt?email=ghost@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::get("/jwt?email=alice@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["accessToken"].as_str().expect("accessToken").to_string();

    let response = app
        .oneshot(
            Request::get("/users/buyer/alice@example.com")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["isBuyer"], Value::Bool(true));
}

#[tokio::test]
async fn deleted_identity_fails_closed_with_a_live_token() {
    let state = test_state().await;
    seed_user(&state, "admin@example.com", UserRole::Admin).await;
    let token = bearer("admin@example.com");
    let app = market_auth::routes(state.clone());

    // Works while the identity exists.
    let response = app
        .clone()
        .oneshot(
            Request::get("/allBuyers")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    state
        .users
        .delete_by_email("admin@example.com")
        .await
        .unwrap();

    // The token still verifies, but the role guard re-reads the store.
    let response = app
        .oneshot(
            Request::get("/allBuyers")
                .header(header::AUTHORIZATION, &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn registration_keeps_the_first_identity() {
    let state = test_state().await;
    let app = market_auth::routes(state);

    let register = |body: &str| {
        Request::post("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(register(
            r#"{"email":"sam@example.com","name":"Sam","role":"seller"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Re-registering with a different role keeps the stored seller.
    let response = app
        .clone()
        .oneshot(register(r#"{"email":"sam@example.com","name":"Sam"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], Value::String("seller".to_string()));

    // Bad payloads are rejected.
    let response = app
        .oneshot(register(r#"{"email":"not-an-email","name":"X"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
