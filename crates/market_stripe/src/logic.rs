// --- File: crates/market_stripe/src/logic.rs ---
//! PaymentIntent creation against the Stripe REST API.
//!
//! One call per checkout attempt: the buyer's amount is converted to
//! minor units upstream, sent here, and the returned `client_secret` is
//! handed to the browser. Nothing in this module touches the store.

use market_common::http::client::HTTP_CLIENT;
use market_config::StripeConfig;
use serde::Deserialize;
use std::env;
use tracing::{debug, info};

use crate::error::StripeError;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// The slice of Stripe's PaymentIntent object this system cares about.
#[derive(Deserialize, Debug, Clone)]
pub struct PaymentIntentData {
    /// Stripe's id for the intent (pi_...).
    pub id: String,
    /// Secret the browser completes payment with.
    pub client_secret: Option<String>,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}

/// Creates a PaymentIntent for `amount_minor` minor units of the
/// configured currency.
pub async fn create_payment_intent(
    stripe_config: &StripeConfig,
    amount_minor: i64,
    description: Option<&str>,
) -> Result<PaymentIntentData, StripeError> {
    if amount_minor <= 0 {
        return Err(StripeError::InternalError(format!(
            "Payment intent amount must be positive, got {amount_minor}"
        )));
    }

    let stripe_secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| StripeError::ConfigError)?;

    let mut form_body: Vec<(String, String)> = vec![
        ("amount".to_string(), amount_minor.to_string()),
        (
            "currency".to_string(),
            stripe_config.currency.to_lowercase(),
        ),
    ];
    for method in &stripe_config.payment_method_types {
        form_body.push(("payment_method_types[]".to_string(), method.clone()));
    }
    if let Some(description) = description {
        form_body.push(("description".to_string(), description.to_string()));
    }

    debug!(amount = amount_minor, currency = %stripe_config.currency, "creating payment intent");

    let response = HTTP_CLIENT
        .post(PAYMENT_INTENTS_URL)
        .basic_auth(stripe_secret_key, None::<&str>)
        .form(&form_body)
        .send()
        .await?;

    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        let intent: PaymentIntentData = serde_json::from_str(&body_text)?;
        info!(intent_id = %intent.id, "payment intent created");
        Ok(intent)
    } else {
        // Stripe error bodies nest the useful message under error.message.
        let message = match serde_json::from_str::<serde_json::Value>(&body_text) {
            Ok(json_body) => json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body_text)
                .to_string(),
            Err(_) => body_text,
        };
        info!(status = %status, %message, "Stripe API request failed");
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StripeConfig {
        StripeConfig {
            currency: "USD".to_string(),
            payment_method_types: vec!["card".to_string()],
        }
    }

    #[tokio::test]
    async fn non_positive_amounts_never_reach_the_network() {
        for amount in [0, -1, -2500] {
            let err = create_payment_intent(&config(), amount, None)
                .await
                .unwrap_err();
            assert!(matches!(err, StripeError::InternalError(_)));
        }
    }
}
