// --- File: crates/market_checkout/src/handlers.rs ---
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use market_auth::{ensure_owner, AuthenticatedUser};
use market_common::error::{forbidden, not_found, MarketError};
use market_common::models::{Booking, Payment};
use market_common::services::{BoxedError, PaymentService, ServiceFactory};
use market_config::AppConfig;
use market_db::repositories::{BookingRepository, SqlBookingRepository};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::logic::{self, CreateBookingRequest};

/// Shared state for the checkout routes.
#[derive(Clone)]
pub struct CheckoutState {
    pub config: Arc<AppConfig>,
    pub bookings: SqlBookingRepository,
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl CheckoutState {
    fn payment_service(&self) -> Option<Arc<dyn PaymentService<Error = BoxedError>>> {
        self.service_factory.payment_service()
    }
}

#[derive(Deserialize)]
pub struct BookingsQuery {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub price: f64,
    #[serde(default)]
    pub product_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub booking_id: String,
    pub transaction_id: String,
    pub amount: i64,
}

/// POST /bookings — phase one of checkout. The owner is the token
/// subject; an email in the body is ignored.
pub async fn create_booking_handler(
    State(state): State<Arc<CheckoutState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<Booking>, MarketError> {
    let booking = logic::create_booking(&state.bookings, &auth_user.email, request).await?;
    Ok(Json(booking))
}

/// GET /bookings?email= — a buyer's own bookings. Asking for someone
/// else's is 403 even with a valid token.
pub async fn list_bookings_handler(
    State(state): State<Arc<CheckoutState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, MarketError> {
    ensure_owner(&auth_user, &query.email)?;
    let bookings = state.bookings.find_by_email(&query.email).await?;
    Ok(Json(bookings))
}

/// GET /bookings/{id} — ownership is checked after the load, so a
/// foreign booking id answers 403, not 404.
pub async fn get_booking_handler(
    State(state): State<Arc<CheckoutState>>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, MarketError> {
    let booking = state
        .bookings
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(format!("No booking with id {id}")))?;
    if booking.email != auth_user.email {
        return Err(forbidden("Forbidden access"));
    }
    Ok(Json(booking))
}

/// POST /create-payment-intent — asks the processor for a client
/// secret. Answers 503 when the payment feature is switched off, which
/// sits outside the shared error taxonomy.
pub async fn create_payment_intent_handler(
    State(state): State<Arc<CheckoutState>>,
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<PaymentIntentRequest>,
) -> Response {
    let service = match state.payment_service() {
        Some(service) => service,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": {
                        "message": "Payment processing is not enabled",
                        "code": 503,
                    }
                })),
            )
                .into_response();
        }
    };

    let currency = state
        .config
        .stripe
        .as_ref()
        .map(|s| s.currency.clone())
        .unwrap_or_else(|| "usd".to_string());

    match logic::request_payment_intent(
        service.as_ref(),
        &currency,
        request.price,
        request.product_name.as_deref(),
    )
    .await
    {
        Ok(client_secret) => Json(PaymentIntentResponse { client_secret }).into_response(),
        Err(err) => err.into_response(),
    }
}

/// POST /payments — phase two of checkout.
pub async fn record_payment_handler(
    State(state): State<Arc<CheckoutState>>,
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<Payment>, MarketError> {
    let payment = logic::confirm_payment(
        &state.bookings,
        &request.booking_id,
        &request.transaction_id,
        request.amount,
    )
    .await?;
    Ok(Json(payment))
}
