// --- File: crates/market_auth/src/guards.rs ---
//! Guard chain middleware.
//!
//! `authenticate` runs first on every protected route and installs an
//! `AuthenticatedUser` request extension. Role guards never parse the
//! token themselves: they read the extension and re-resolve the identity
//! from the store, so a deleted identity fails closed even while its
//! token is still syntactically valid.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use market_common::error::{forbidden, unauthenticated, MarketError};
use market_common::models::UserRole;
use market_config::AppConfig;
use market_db::repositories::{SqlUserRepository, UserRepository};
use std::sync::Arc;

// The state the guard middlewares (and identity handlers) run with.
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub users: SqlUserRepository,
}

/// Proof of authentication, inserted by [`authenticate`] and read by
/// role guards and ownership checks downstream.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Axum middleware verifying the `Authorization: Bearer` token.
///
/// Missing header, bad shape, bad signature and expiry all produce the
/// same 401. On success the claims' subject is attached to the request.
pub async fn authenticate(
    State(_state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let secret = match crate::token::signing_secret() {
        Ok(secret) => secret,
        Err(err) => return err.into_response(),
    };

    let token = match bearer_token(&req) {
        Some(token) => token,
        None => {
            return unauthenticated("Missing Authorization header").into_response();
        }
    };

    match crate::token::verify_token(token, &secret) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthenticatedUser {
                email: claims.sub,
            });
            next.run(req).await
        }
        Err(err) => MarketError::from(err).into_response(),
    }
}

async fn require_role(
    state: &AuthState,
    req: Request,
    next: Next,
    role: UserRole,
) -> Response {
    // Structurally fail closed: if authenticate didn't run on this route,
    // there is no extension and the request never reaches the handler.
    let auth_user = match req.extensions().get::<AuthenticatedUser>() {
        Some(user) => user.clone(),
        None => {
            return unauthenticated("Missing Authorization header").into_response();
        }
    };

    // Fresh read on every request: role changes and deletions take
    // effect immediately, tokens are never revoked.
    let stored = match state.users.find_by_email(&auth_user.email).await {
        Ok(stored) => stored,
        Err(err) => return MarketError::from(err).into_response(),
    };

    match stored {
        Some(user) if user.role == role => next.run(req).await,
        Some(_) | None => {
            tracing::debug!(email = %auth_user.email, required = %role, "role guard rejected request");
            forbidden("Forbidden access").into_response()
        }
    }
}

/// Admits only identities whose stored role is `seller`.
pub async fn require_seller(
    State(state): State<Arc<AuthState>>,
    req: Request,
    next: Next,
) -> Response {
    require_role(&state, req, next, UserRole::Seller).await
}

/// Admits only identities whose stored role is `admin`.
pub async fn require_admin(
    State(state): State<Arc<AuthState>>,
    req: Request,
    next: Next,
) -> Response {
    require_role(&state, req, next, UserRole::Admin).await
}

/// Ownership check for resource-scoped endpoints: the authenticated
/// subject must match the email the resource is scoped to.
pub fn ensure_owner(auth_user: &AuthenticatedUser, target_email: &str) -> Result<(), MarketError> {
    if auth_user.email == target_email {
        Ok(())
    } else {
        Err(forbidden("Forbidden access"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_check_is_exact_match() {
        let user = AuthenticatedUser {
            email: "alice@example.com".to_string(),
        };
        assert!(ensure_owner(&user, "alice@example.com").is_ok());
        assert!(matches!(
            ensure_owner(&user, "bob@example.com"),
            Err(MarketError::Forbidden(_))
        ));
        // Case differences are different identities.
        assert!(ensure_owner(&user, "Alice@example.com").is_err());
    }
}
