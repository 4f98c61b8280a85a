// --- File: crates/market_stripe/src/lib.rs ---
//! Stripe PaymentIntent integration.
//!
//! No routes live here: the checkout coordinator consumes this crate
//! through the `PaymentService` trait, so handlers never see Stripe
//! types directly.

pub mod error;
pub mod logic;
pub mod service;

pub use error::StripeError;
pub use logic::{create_payment_intent, PaymentIntentData};
pub use service::StripePaymentService;
