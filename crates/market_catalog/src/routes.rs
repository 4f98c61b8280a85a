// --- File: crates/market_catalog/src/routes.rs ---
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use market_auth::{guards, AuthState};
use std::sync::Arc;

use crate::handlers::{
    add_product_handler, category_products_handler, delete_product_handler,
    list_categories_handler, list_products_handler, seller_products_handler, CatalogState,
};

/// Catalog routes: the browse surface is public, the listing-management
/// surface requires a seller identity.
pub fn routes(state: Arc<CatalogState>, auth_state: Arc<AuthState>) -> Router {
    let public = Router::new()
        .route("/categories", get(list_categories_handler))
        .route("/categories/{id}", get(category_products_handler))
        .route("/products", get(list_products_handler));

    let seller = Router::new()
        .route(
            "/addProducts",
            post(add_product_handler).get(seller_products_handler),
        )
        .route("/addProducts/{id}", delete(delete_product_handler))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            guards::require_seller,
        ))
        .layer(middleware::from_fn_with_state(
            auth_state,
            guards::authenticate,
        ));

    public.merge(seller).with_state(state)
}
