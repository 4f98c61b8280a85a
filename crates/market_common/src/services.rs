// --- File: crates/market_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Trait definitions for the services the application reaches over the
//! network, decoupling the coordinator and handlers from the concrete
//! payment-processor integration and making tests possible without
//! network access.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// A trait for payment-processor operations.
///
/// The processor is a black box to this system: it takes an amount in
/// minor units and a currency and hands back an opaque client secret the
/// buyer completes payment with out-of-band. Intent creation is idempotent
/// from this system's point of view and never mutates a booking.
pub trait PaymentService: Send + Sync {
    /// Error type returned by payment service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a payment intent for `amount` minor units of `currency`.
    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error>;
}

/// A factory for creating service instances.
///
/// The backend wires one of these into its shared state; handlers ask it
/// for the services they need instead of constructing integrations inline.
pub trait ServiceFactory: Send + Sync {
    /// Get a payment service instance, if the payment feature is enabled.
    fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>>;
}

/// Represents the result of a payment intent operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResult {
    /// The processor's id for the intent.
    pub id: String,
    /// The status of the payment intent.
    pub status: String,
    /// The amount of the payment intent, in minor units.
    pub amount: i64,
    /// The currency of the payment intent.
    pub currency: String,
    /// The client secret the buyer completes payment with.
    pub client_secret: Option<String>,
}
