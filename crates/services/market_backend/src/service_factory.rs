// --- File: crates/services/market_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! The one place where concrete integrations are constructed; handlers
//! only ever see the `ServiceFactory` trait.

use market_common::is_feature_enabled;
use market_common::services::{BoxFuture, BoxedError, PaymentIntentResult, PaymentService, ServiceFactory};
use market_config::AppConfig;
use market_stripe::service::StripePaymentService;
use std::sync::Arc;
use tracing::info;

/// Wrapper converting `StripeError` into the `BoxedError` the trait
/// object surface uses.
struct BoxedPaymentService {
    inner: StripePaymentService,
}

impl PaymentService for BoxedPaymentService {
    type Error = BoxedError;

    fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
        description: Option<&str>,
    ) -> BoxFuture<'_, PaymentIntentResult, Self::Error> {
        let currency = currency.to_string();
        let description = description.map(|s| s.to_string());
        let inner = &self.inner;

        Box::pin(async move {
            inner
                .create_payment_intent(amount, &currency, description.as_deref())
                .await
                .map_err(|e| BoxedError(Box::new(e)))
        })
    }
}

/// Builds the external-service instances the runtime flags ask for.
pub struct MarketServiceFactory {
    payment_service: Option<Arc<dyn PaymentService<Error = BoxedError>>>,
}

impl MarketServiceFactory {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let mut factory = Self {
            payment_service: None,
        };

        if is_feature_enabled(&config, config.use_stripe, config.stripe.as_ref()) {
            info!("Initializing Stripe payment service");
            let service = StripePaymentService::new(config.clone());
            factory.payment_service = Some(Arc::new(BoxedPaymentService { inner: service }));
        } else {
            info!("Stripe payment service disabled via runtime config");
        }

        factory
    }
}

impl ServiceFactory for MarketServiceFactory {
    fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>> {
        self.payment_service.clone()
    }
}
