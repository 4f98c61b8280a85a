// --- File: crates/market_common/src/models.rs ---

// Domain models shared across the marketplace crates. The repositories in
// market_db persist these shapes; the handlers serialize them directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role attached to an identity. Stored as lowercase text and looked up
/// fresh on every role-gated request, so a role change takes effect on the
/// next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Buyer,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(UserRole::Buyer),
            "seller" => Ok(UserRole::Seller),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered identity. `email` is the unique, case-sensitive join key
/// used by tokens and every authorization check; it never changes after
/// registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Set by an admin action; sellers start unverified.
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub category_id: String,
    pub seller_email: String,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// A reservation of a marketplace item, pending payment. Mutated exactly
/// once, by the payment-confirmation step, which sets `paid` and
/// `transaction_id` together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    /// Owner of the booking (the buyer's email, taken from the token).
    pub email: String,
    pub product_id: String,
    pub product_name: String,
    pub price: f64,
    pub paid: bool,
    pub transaction_id: Option<String>,
}

/// Append-only record of a confirmed payment. A booking is "paid" if and
/// only if exactly one payment references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub booking_id: String,
    /// Amount in minor units (cents).
    pub amount: i64,
    pub transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::Buyer, UserRole::Seller, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("superuser".parse::<UserRole>().is_err());
        // Roles are stored lowercase; anything else is not a valid value.
        assert!("Seller".parse::<UserRole>().is_err());
    }
}
