// --- File: crates/market_auth/src/routes.rs ---
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::guards::{self, AuthState};
use crate::handlers::{
    delete_buyer_handler, delete_seller_handler, is_buyer_handler, is_seller_handler,
    issue_jwt_handler, list_buyers_handler, list_sellers_handler, register_user_handler,
    verify_seller_handler,
};

/// Identity and admin routes.
///
/// Layer order matters: role guards are added before `authenticate`, so
/// `authenticate` wraps them and runs first on every request.
pub fn routes(state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/jwt", get(issue_jwt_handler))
        .route("/users", post(register_user_handler));

    let authenticated = Router::new()
        .route("/users/seller/{email}", get(is_seller_handler))
        .route("/users/buyer/{email}", get(is_buyer_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guards::authenticate,
        ));

    let admin = Router::new()
        .route("/allSellers", get(list_sellers_handler))
        .route("/allSellers/{email}", delete(delete_seller_handler))
        .route("/allSellers/verify/{email}", put(verify_seller_handler))
        .route("/allBuyers", get(list_buyers_handler))
        .route("/allBuyers/{email}", delete(delete_buyer_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guards::require_admin,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guards::authenticate,
        ));

    public.merge(authenticated).merge(admin).with_state(state)
}
