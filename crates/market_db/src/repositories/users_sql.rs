//! SQL implementation of the user repository

use crate::error::DbError;
use crate::repositories::users::{User, UserRepository, UserRole};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the user repository
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

// `verified` is stored as INTEGER because the Any driver's decode support
// is narrow (same reason the schema carries no native timestamps).
fn row_to_user(row: &AnyRow) -> Result<User, DbError> {
    let role_str: String = row
        .try_get("role")
        .map_err(|e| DbError::QueryError(e.to_string()))?;
    let role: UserRole = role_str
        .parse()
        .map_err(|e: String| DbError::QueryError(e))?;
    let verified: i64 = row
        .try_get("verified")
        .map_err(|e| DbError::QueryError(e.to_string()))?;

    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        name: row.try_get("name").unwrap_or_default(),
        role,
        verified: verified != 0,
    })
}

impl UserRepository for SqlUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                verified INTEGER NOT NULL DEFAULT 0
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn upsert(&self, user: User) -> Result<User, DbError> {
        debug!("Registering identity: {}", user.email);

        // Insert-or-keep: a repeat registration must not clobber the
        // stored role or verified flag.
        let query = r#"
            INSERT INTO users (id, email, name, role, verified)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(email) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.role.as_str())
            .bind(if user.verified { 1i64 } else { 0i64 })
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        // Return whatever is stored, which may be the pre-existing row.
        self.find_by_email(&user.email).await?.ok_or_else(|| {
            DbError::QueryError(format!("user {} missing after upsert", user.email))
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let query = r#"
            SELECT id, email, name, role, verified
            FROM users
            WHERE email = $1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        result.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_role(&self, role: UserRole) -> Result<Vec<User>, DbError> {
        let query = r#"
            SELECT id, email, name, role, verified
            FROM users
            WHERE role = $1
        "#;

        let rows = sqlx::query(query)
            .bind(role.as_str())
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list users by role: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(row_to_user).collect()
    }

    async fn set_verified(&self, email: &str) -> Result<bool, DbError> {
        debug!("Verifying seller: {}", email);

        let query = r#"
            UPDATE users SET verified = 1 WHERE email = $1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to verify user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_email(&self, email: &str) -> Result<bool, DbError> {
        debug!("Deleting identity: {}", email);

        let query = r#"
            DELETE FROM users WHERE email = $1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
