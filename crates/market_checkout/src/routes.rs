// --- File: crates/market_checkout/src/routes.rs ---
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use market_auth::{guards, AuthState};
use std::sync::Arc;

use crate::handlers::{
    create_booking_handler, create_payment_intent_handler, get_booking_handler,
    list_bookings_handler, record_payment_handler, CheckoutState,
};

/// Checkout routes. Every route requires a valid token; ownership and
/// payment-state checks happen in the handlers.
pub fn routes(state: Arc<CheckoutState>, auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route(
            "/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route("/bookings/{id}", get(get_booking_handler))
        .route("/create-payment-intent", post(create_payment_intent_handler))
        .route("/payments", post(record_payment_handler))
        .layer(middleware::from_fn_with_state(
            auth_state,
            guards::authenticate,
        ))
        .with_state(state)
}
