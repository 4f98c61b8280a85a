// --- File: crates/market_checkout/src/logic.rs ---
//! The two-phase checkout workflow.
//!
//! Phase one creates a booking (pure insert) and, separately, a payment
//! intent at the processor. Phase two confirms the payment: one
//! conditional flip of the booking plus one payment record, both inside
//! a single store transaction. Intent creation never mutates a booking,
//! so an abandoned checkout leaves nothing to clean up.

use market_common::error::{conflict, not_found, upstream_error, validation_error, MarketError};
use market_common::models::{Booking, Payment};
use market_common::services::{BoxedError, PaymentService};
use market_db::repositories::{BookingRepository, ConfirmOutcome};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub product_id: String,
    pub product_name: String,
    pub price: f64,
}

/// Converts a major-unit price to the minor units the processor expects.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

fn validate_price(price: f64) -> Result<(), MarketError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(validation_error("Price must be a positive amount"));
    }
    Ok(())
}

/// Stores a new unpaid booking owned by `email`.
///
/// The owner always comes from the verified token subject, never from
/// the request body.
pub async fn create_booking<R: BookingRepository>(
    repo: &R,
    email: &str,
    request: CreateBookingRequest,
) -> Result<Booking, MarketError> {
    validate_price(request.price)?;
    if request.product_id.trim().is_empty() {
        return Err(validation_error("A product id is required"));
    }

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        product_id: request.product_id,
        product_name: request.product_name,
        price: request.price,
        paid: false,
        transaction_id: None,
    };
    let stored = repo.insert_booking(booking).await?;
    info!(booking_id = %stored.id, email = %stored.email, "booking created");
    Ok(stored)
}

/// Asks the processor for a payment intent and returns its client
/// secret. No booking is read or written here.
pub async fn request_payment_intent(
    service: &dyn PaymentService<Error = BoxedError>,
    currency: &str,
    price: f64,
    description: Option<&str>,
) -> Result<String, MarketError> {
    validate_price(price)?;
    let amount = to_minor_units(price);

    let intent = service
        .create_payment_intent(amount, currency, description)
        .await
        .map_err(|err| upstream_error("stripe", err))?;

    intent
        .client_secret
        .ok_or_else(|| upstream_error("stripe", "Payment intent response missing client secret"))
}

/// Confirms a completed payment against its booking.
///
/// Every path out of here leaves the store consistent: either the
/// booking is paid with exactly one payment recorded, or nothing
/// changed.
pub async fn confirm_payment<R: BookingRepository>(
    repo: &R,
    booking_id: &str,
    transaction_id: &str,
    amount: i64,
) -> Result<Payment, MarketError> {
    if amount <= 0 {
        return Err(validation_error("Payment amount must be positive"));
    }
    if transaction_id.trim().is_empty() {
        return Err(validation_error("A transaction id is required"));
    }

    match repo.confirm_paid(booking_id, transaction_id, amount).await? {
        ConfirmOutcome::Confirmed(payment) => {
            info!(booking_id, transaction_id, "payment confirmed");
            Ok(payment)
        }
        ConfirmOutcome::NotFound => Err(not_found(format!("No booking with id {booking_id}"))),
        ConfirmOutcome::AlreadyPaid => {
            Err(conflict(format!("Booking {booking_id} is already paid")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_are_hundredths() {
        assert_eq!(to_minor_units(25.0), 2500);
        assert_eq!(to_minor_units(0.99), 99);
        assert_eq!(to_minor_units(10.5), 1050);
    }

    #[test]
    fn price_validation_rejects_junk() {
        assert!(validate_price(25.0).is_ok());
        for bad in [0.0, -3.5, f64::NAN, f64::INFINITY] {
            assert!(validate_price(bad).is_err());
        }
    }
}
