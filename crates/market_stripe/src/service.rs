// --- File: crates/market_stripe/src/service.rs ---
use market_common::services::{BoxFuture, PaymentIntentResult, PaymentService};
use market_config::AppConfig;
use std::sync::Arc;

use crate::error::StripeError;
use crate::logic::create_payment_intent;

/// Stripe payment service implementation
pub struct StripePaymentService {
    config: Arc<AppConfig>,
}

impl StripePaymentService {
    /// Create a new Stripe payment service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl PaymentService for StripePaymentService {
    type Error = StripeError;

    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let currency = currency.to_string();
        let description = description.map(|s| s.to_string());

        Box::pin(async move {
            let stripe_config = self.config.stripe.as_ref().ok_or(StripeError::ConfigError)?;
            if !currency.eq_ignore_ascii_case(&stripe_config.currency) {
                return Err(StripeError::InternalError(format!(
                    "Unsupported currency: {currency}"
                )));
            }

            let intent =
                create_payment_intent(stripe_config, amount, description.as_deref()).await?;

            Ok(PaymentIntentResult {
                id: intent.id,
                status: intent.status,
                amount: intent.amount,
                currency: intent.currency,
                client_secret: intent.client_secret,
            })
        })
    }
}
