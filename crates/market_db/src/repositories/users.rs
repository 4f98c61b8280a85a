//! Repository trait for identities
//!
//! The identity store is the source of truth for roles: the guard chain
//! re-reads it on every role-gated request, so nothing here is cached.

use crate::error::DbError;

pub use market_common::models::{User, UserRole};

/// Repository for registered identities, keyed by case-sensitive email.
pub trait UserRepository {
    /// Create the users table if it doesn't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store an identity on registration.
    ///
    /// Registration is insert-or-keep: re-registering an existing email is
    /// not an error and does not overwrite the stored role or verified
    /// flag. Returns the stored identity.
    fn upsert(
        &self,
        user: User,
    ) -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    /// Look up an identity by email.
    ///
    /// Returns an explicit `None` when the identity does not exist so
    /// guards can distinguish "absent" from "present without role" —
    /// absence must fail closed, never default.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, DbError>> + Send;

    /// List all identities with the given role.
    fn find_by_role(
        &self,
        role: UserRole,
    ) -> impl std::future::Future<Output = Result<Vec<User>, DbError>> + Send;

    /// Mark a seller as verified. Returns `false` when no identity with
    /// that email exists.
    fn set_verified(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Delete an identity. Returns `false` when nothing was deleted.
    /// Outstanding tokens for the email stay syntactically valid; guards
    /// handle the absent identity.
    fn delete_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
