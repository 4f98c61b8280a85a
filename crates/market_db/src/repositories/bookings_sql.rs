//! SQL implementation of the booking repository

use crate::error::DbError;
use crate::repositories::bookings::{Booking, BookingRepository, ConfirmOutcome, Payment};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

/// SQL implementation of the booking repository
#[derive(Debug, Clone)]
pub struct SqlBookingRepository {
    db_client: DbClient,
}

impl SqlBookingRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

// `paid` is stored as INTEGER because the Any driver's decode support is
// narrow.
fn row_to_booking(row: &AnyRow) -> Result<Booking, DbError> {
    let paid: i64 = row
        .try_get("paid")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(Booking {
        id: row
            .try_get("id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        product_id: row
            .try_get("product_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        product_name: row
            .try_get("product_name")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        price: row
            .try_get("price")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        paid: paid != 0,
        transaction_id: row.try_get("transaction_id").ok(),
    })
}

fn row_to_payment(row: &AnyRow) -> Result<Payment, DbError> {
    Ok(Payment {
        id: row
            .try_get("id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        booking_id: row
            .try_get("booking_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        amount: row
            .try_get("amount")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        transaction_id: row
            .try_get("transaction_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
    })
}

impl BookingRepository for SqlBookingRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                product_id TEXT NOT NULL,
                product_name TEXT NOT NULL,
                price REAL NOT NULL,
                paid INTEGER NOT NULL DEFAULT 0,
                transaction_id TEXT
            )
        "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                booking_id TEXT NOT NULL,
                amount INTEGER NOT NULL,
                transaction_id TEXT NOT NULL
            )
        "#,
            )
            .await?;

        Ok(())
    }

    async fn insert_booking(&self, booking: Booking) -> Result<Booking, DbError> {
        debug!("Creating booking {} for {}", booking.id, booking.email);

        let query = r#"
            INSERT INTO bookings (id, email, product_id, product_name, price, paid, transaction_id)
            VALUES ($1, $2, $3, $4, $5, 0, NULL)
        "#;

        sqlx::query(query)
            .bind(&booking.id)
            .bind(&booking.email)
            .bind(&booking.product_id)
            .bind(&booking.product_name)
            .bind(booking.price)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(Booking {
            paid: false,
            transaction_id: None,
            ..booking
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let query = r#"
            SELECT id, email, product_id, product_name, price, paid, transaction_id
            FROM bookings
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        result.as_ref().map(row_to_booking).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, DbError> {
        let query = r#"
            SELECT id, email, product_id, product_name, price, paid, transaction_id
            FROM bookings
            WHERE email = $1
        "#;

        let rows = sqlx::query(query)
            .bind(email)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_booking).collect()
    }

    async fn confirm_paid(
        &self,
        booking_id: &str,
        transaction_id: &str,
        amount: i64,
    ) -> Result<ConfirmOutcome, DbError> {
        debug!("Confirming payment for booking {}", booking_id);

        let mut tx = self.db_client.begin().await?;

        // Conditional update: matches only while the booking is unpaid.
        let updated = sqlx::query(
            r#"
            UPDATE bookings
            SET paid = 1, transaction_id = $1
            WHERE id = $2 AND paid = 0
        "#,
        )
        .bind(transaction_id)
        .bind(booking_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to update booking {}: {}", booking_id, e);
            DbError::QueryError(e.to_string())
        })?;

        if updated.rows_affected() == 0 {
            // Zero rows matched: either the booking doesn't exist or it
            // was paid before we got here. Re-read to tell them apart.
            let existing = sqlx::query("SELECT paid FROM bookings WHERE id = $1")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionError(e.to_string()))?;

            return Ok(match existing {
                Some(_) => ConfirmOutcome::AlreadyPaid,
                None => ConfirmOutcome::NotFound,
            });
        }

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            booking_id: booking_id.to_string(),
            amount,
            transaction_id: transaction_id.to_string(),
        };

        sqlx::query(
            r#"
            INSERT INTO payments (id, booking_id, amount, transaction_id)
            VALUES ($1, $2, $3, $4)
        "#,
        )
        .bind(&payment.id)
        .bind(&payment.booking_id)
        .bind(payment.amount)
        .bind(&payment.transaction_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to insert payment for {}: {}", booking_id, e);
            DbError::QueryError(e.to_string())
        })?;

        // Both writes commit together; a failure here rolls back the
        // booking update too, so the paid flag never exists without its
        // payment record.
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!(
            "Booking {} marked paid with transaction {}",
            booking_id, transaction_id
        );
        Ok(ConfirmOutcome::Confirmed(payment))
    }

    async fn payments_for_booking(&self, booking_id: &str) -> Result<Vec<Payment>, DbError> {
        let query = r#"
            SELECT id, booking_id, amount, transaction_id
            FROM payments
            WHERE booking_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(booking_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_payment).collect()
    }
}
