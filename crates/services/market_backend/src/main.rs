// File: services/market_backend/src/main.rs
use axum::{routing::get, Router};
use market_auth::AuthState;
use market_catalog::CatalogState;
use market_checkout::CheckoutState;
use market_common::models::Category;
use market_config::load_config;
use market_db::repositories::CatalogRepository;
use market_db::DbClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

mod app_state;
mod service_factory;

use app_state::AppState;

/// Categories a fresh store starts with, so the storefront has
/// something to browse before an admin curates the list.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("1", "Android Phones"),
    ("2", "iPhones"),
    ("3", "Feature Phones"),
];

async fn seed_categories(state: &AppState) {
    match state.repos.catalog.list_categories().await {
        Ok(existing) if existing.is_empty() => {
            for (id, name) in DEFAULT_CATEGORIES {
                let category = Category {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                };
                if let Err(e) = state.repos.catalog.insert_category(category).await {
                    error!("Failed to seed category {name}: {e}");
                }
            }
            info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
        }
        Ok(_) => {}
        Err(e) => error!("Could not check categories for seeding: {e}"),
    }
}

fn build_router(state: &AppState) -> Router {
    let auth_state = Arc::new(AuthState {
        config: state.config.clone(),
        users: state.repos.users.clone(),
    });
    let checkout_state = Arc::new(CheckoutState {
        config: state.config.clone(),
        bookings: state.repos.bookings.clone(),
        service_factory: state.service_factory.clone(),
    });
    let catalog_state = Arc::new(CatalogState {
        catalog: state.repos.catalog.clone(),
    });

    Router::new()
        .route("/", get(|| async { "Resale Market Server is Running..." }))
        .merge(market_auth::routes(auth_state.clone()))
        .merge(market_checkout::routes(checkout_state, auth_state.clone()))
        .merge(market_catalog::routes(catalog_state, auth_state))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() {
    market_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to database");

    let state = AppState::new(config.clone(), db_client);
    state
        .repos
        .init_schemas()
        .await
        .expect("Failed to initialize database schema");
    seed_categories(&state).await;

    let app = build_router(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
