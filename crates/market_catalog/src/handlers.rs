// --- File: crates/market_catalog/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use market_auth::{ensure_owner, AuthenticatedUser};
use market_common::error::{not_found, validation_error, MarketError};
use market_common::models::{Category, Product};
use market_db::repositories::{CatalogRepository, SqlCatalogRepository};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Shared state for the catalog routes.
#[derive(Clone)]
pub struct CatalogState {
    pub catalog: SqlCatalogRepository,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub category_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct SellerProductsQuery {
    pub email: String,
}

/// GET /categories — public listing used by the storefront landing page.
pub async fn list_categories_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Category>>, MarketError> {
    let categories = state.catalog.list_categories().await?;
    Ok(Json(categories))
}

/// GET /categories/{id} — products of one category. An unknown category
/// id is 404; a known but empty category is an empty list.
pub async fn category_products_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, MarketError> {
    if state.catalog.find_category(&id).await?.is_none() {
        return Err(not_found(format!("No category with id {id}")));
    }
    let products = state.catalog.products_in_category(&id).await?;
    Ok(Json(products))
}

/// GET /products — public listing across all categories.
pub async fn list_products_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Product>>, MarketError> {
    let products = state.catalog.all_products().await?;
    Ok(Json(products))
}

/// POST /addProducts (seller) — the seller email is the token subject.
pub async fn add_product_handler(
    State(state): State<Arc<CatalogState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<AddProductRequest>,
) -> Result<Json<Product>, MarketError> {
    if request.name.trim().is_empty() {
        return Err(validation_error("A product name is required"));
    }
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(validation_error("Price must be a positive amount"));
    }
    if state
        .catalog
        .find_category(&request.category_id)
        .await?
        .is_none()
    {
        return Err(validation_error(format!(
            "No category with id {}",
            request.category_id
        )));
    }

    let product = Product {
        id: Uuid::new_v4().to_string(),
        category_id: request.category_id,
        seller_email: auth_user.email.clone(),
        name: request.name,
        price: request.price,
        description: request.description,
    };
    let stored = state.catalog.insert_product(product).await?;
    info!(product_id = %stored.id, seller = %stored.seller_email, "product listed");
    Ok(Json(stored))
}

/// GET /addProducts?email= (seller) — a seller's own listings.
pub async fn seller_products_handler(
    State(state): State<Arc<CatalogState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<SellerProductsQuery>,
) -> Result<Json<Vec<Product>>, MarketError> {
    ensure_owner(&auth_user, &query.email)?;
    let products = state.catalog.products_by_seller(&query.email).await?;
    Ok(Json(products))
}

/// DELETE /addProducts/{id} (seller).
pub async fn delete_product_handler(
    State(state): State<Arc<CatalogState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, MarketError> {
    if !state.catalog.delete_product(&id).await? {
        return Err(not_found(format!("No product with id {id}")));
    }
    info!(product_id = %id, seller = %auth_user.email, "product removed");
    Ok(Json(json!({ "deleted": true })))
}
