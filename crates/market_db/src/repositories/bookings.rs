//! Repository trait for bookings and payments
//!
//! The two collections have no enforced referential integrity, so the
//! confirm step validates the booking reference itself and performs both
//! writes inside one transaction. See `confirm_paid`.

use crate::error::DbError;

pub use market_common::models::{Booking, Payment};

/// Outcome of a payment confirmation attempt.
///
/// `NotFound` and `AlreadyPaid` are distinguished so the coordinator can
/// answer 404 vs 409; both leave the store untouched.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    /// The booking was flipped to paid and this payment was recorded.
    Confirmed(Payment),
    /// No booking with that id exists.
    NotFound,
    /// The booking was already paid; the one-payment-per-booking
    /// invariant forbids a second confirmation.
    AlreadyPaid,
}

/// Repository for bookings and their payments.
pub trait BookingRepository {
    /// Create the bookings/payments tables if they don't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new booking. A pure insert with `paid = false`; no
    /// read-modify-write, so concurrent creations need no coordination.
    fn insert_booking(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<Booking, DbError>> + Send;

    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// All bookings owned by one buyer.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Atomically confirm payment for a booking.
    ///
    /// Within a single transaction: a conditional update flips the
    /// booking from unpaid to paid (`WHERE id = ? AND paid = 0`) and,
    /// only if that matched a row, the payment record is inserted. Two
    /// racing confirmations for the same booking therefore cannot both
    /// succeed; the loser observes `AlreadyPaid`.
    fn confirm_paid(
        &self,
        booking_id: &str,
        transaction_id: &str,
        amount: i64,
    ) -> impl std::future::Future<Output = Result<ConfirmOutcome, DbError>> + Send;

    /// Payments referencing a booking. Used to audit the exactly-one
    /// invariant.
    fn payments_for_booking(
        &self,
        booking_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Payment>, DbError>> + Send;
}
