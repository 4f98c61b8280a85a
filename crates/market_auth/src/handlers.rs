// --- File: crates/market_auth/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use market_common::error::{forbidden, not_found, validation_error, MarketError};
use market_common::models::{User, UserRole};
use market_db::repositories::UserRepository;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::guards::{AuthenticatedUser, AuthState};
use crate::token::{issue_token, signing_secret};

#[derive(Deserialize)]
pub struct JwtQuery {
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// GET /jwt?email= — issues a token for a registered identity.
///
/// Unregistered emails get 403, not 404: this endpoint must not act as
/// a registration oracle with a distinct status per case.
pub async fn issue_jwt_handler(
    State(state): State<Arc<AuthState>>,
    Query(query): Query<JwtQuery>,
) -> Result<Json<TokenResponse>, MarketError> {
    let user = state.users.find_by_email(&query.email).await?;
    if user.is_none() {
        return Err(forbidden("Forbidden access"));
    }

    let secret = signing_secret()?;
    let ttl_hours = state.config.auth().token_ttl_hours;
    let access_token = issue_token(&query.email, &secret, ttl_hours);
    info!(email = %query.email, "issued bearer token");
    Ok(Json(TokenResponse { access_token }))
}

/// POST /users — registration. Insert-or-keep: re-registering an email
/// returns the stored identity unchanged.
pub async fn register_user_handler(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<User>, MarketError> {
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(validation_error("A valid email is required"));
    }
    if request.name.trim().is_empty() {
        return Err(validation_error("A name is required"));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: request.email,
        name: request.name,
        role: request.role.unwrap_or(UserRole::Buyer),
        verified: false,
    };
    let stored = state.users.upsert(user).await?;
    info!(email = %stored.email, role = %stored.role, "registered identity");
    Ok(Json(stored))
}

/// GET /users/seller/{email} — role probe used by the UI to show the
/// seller dashboard. Authenticated, but any identity may ask.
pub async fn is_seller_handler(
    State(state): State<Arc<AuthState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, MarketError> {
    let user = state.users.find_by_email(&email).await?;
    let is_seller = matches!(user, Some(ref u) if u.role == UserRole::Seller);
    Ok(Json(json!({ "isSeller": is_seller })))
}

/// GET /users/buyer/{email} — role probe for the buyer dashboard.
pub async fn is_buyer_handler(
    State(state): State<Arc<AuthState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, MarketError> {
    let user = state.users.find_by_email(&email).await?;
    let is_buyer = matches!(user, Some(ref u) if u.role == UserRole::Buyer);
    Ok(Json(json!({ "isBuyer": is_buyer })))
}

/// GET /allSellers (admin).
pub async fn list_sellers_handler(
    State(state): State<Arc<AuthState>>,
) -> Result<Json<Vec<User>>, MarketError> {
    let sellers = state.users.find_by_role(UserRole::Seller).await?;
    Ok(Json(sellers))
}

/// DELETE /allSellers/{email} (admin).
pub async fn delete_seller_handler(
    State(state): State<Arc<AuthState>>,
    Extension(admin): Extension<AuthenticatedUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, MarketError> {
    if !state.users.delete_by_email(&email).await? {
        return Err(not_found(format!("No user with email {email}")));
    }
    info!(admin = %admin.email, removed = %email, "seller removed");
    Ok(Json(json!({ "deleted": true })))
}

/// PUT /allSellers/verify/{email} (admin) — flips the verified flag
/// that the catalog surfaces next to listings.
pub async fn verify_seller_handler(
    State(state): State<Arc<AuthState>>,
    Extension(admin): Extension<AuthenticatedUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, MarketError> {
    if !state.users.set_verified(&email).await? {
        return Err(not_found(format!("No user with email {email}")));
    }
    info!(admin = %admin.email, verified = %email, "seller verified");
    Ok(Json(json!({ "verified": true })))
}

/// GET /allBuyers (admin).
pub async fn list_buyers_handler(
    State(state): State<Arc<AuthState>>,
) -> Result<Json<Vec<User>>, MarketError> {
    let buyers = state.users.find_by_role(UserRole::Buyer).await?;
    Ok(Json(buyers))
}

/// DELETE /allBuyers/{email} (admin).
pub async fn delete_buyer_handler(
    State(state): State<Arc<AuthState>>,
    Extension(admin): Extension<AuthenticatedUser>,
    Path(email): Path<String>,
) -> Result<Json<Value>, MarketError> {
    if !state.users.delete_by_email(&email).await? {
        return Err(not_found(format!("No user with email {email}")));
    }
    info!(admin = %admin.email, removed = %email, "buyer removed");
    Ok(Json(json!({ "deleted": true })))
}
