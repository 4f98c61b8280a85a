// --- File: crates/market_checkout/src/lib.rs ---
//! Booking and payment coordinator.

pub mod handlers;
pub mod logic;
pub mod routes;

pub use handlers::CheckoutState;
pub use logic::{confirm_payment, create_booking, request_payment_intent, to_minor_units};
pub use routes::routes;
