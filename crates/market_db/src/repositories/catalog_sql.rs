//! SQL implementation of the catalog repository

use crate::error::DbError;
use crate::repositories::catalog::{CatalogRepository, Category, Product};
use crate::DbClient;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the catalog repository
#[derive(Debug, Clone)]
pub struct SqlCatalogRepository {
    db_client: DbClient,
}

impl SqlCatalogRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_product(row: &AnyRow) -> Result<Product, DbError> {
    Ok(Product {
        id: row
            .try_get("id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        category_id: row
            .try_get("category_id")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        seller_email: row
            .try_get("seller_email")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        price: row
            .try_get("price")
            .map_err(|e| DbError::QueryError(e.to_string()))?,
        description: row.try_get("description").ok(),
    })
}

impl CatalogRepository for SqlCatalogRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing catalog schema");

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL
            )
        "#,
            )
            .await?;

        self.db_client
            .execute(
                r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                category_id TEXT NOT NULL,
                seller_email TEXT NOT NULL,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT
            )
        "#,
            )
            .await?;

        Ok(())
    }

    async fn insert_category(&self, category: Category) -> Result<Category, DbError> {
        let query = r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            ON CONFLICT(id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(&category.id)
            .bind(&category.name)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert category: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query("SELECT id, name FROM categories")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list categories: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter()
            .map(|row| {
                Ok(Category {
                    id: row
                        .try_get("id")
                        .map_err(|e| DbError::QueryError(e.to_string()))?,
                    name: row
                        .try_get("name")
                        .map_err(|e| DbError::QueryError(e.to_string()))?,
                })
            })
            .collect()
    }

    async fn find_category(&self, id: &str) -> Result<Option<Category>, DbError> {
        let result = sqlx::query("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        result
            .map(|row| {
                Ok(Category {
                    id: row
                        .try_get("id")
                        .map_err(|e: sqlx::Error| DbError::QueryError(e.to_string()))?,
                    name: row
                        .try_get("name")
                        .map_err(|e: sqlx::Error| DbError::QueryError(e.to_string()))?,
                })
            })
            .transpose()
    }

    async fn products_in_category(&self, category_id: &str) -> Result<Vec<Product>, DbError> {
        let query = r#"
            SELECT id, category_id, seller_email, name, price, description
            FROM products
            WHERE category_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(category_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list products in category: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(row_to_product).collect()
    }

    async fn insert_product(&self, product: Product) -> Result<Product, DbError> {
        debug!(
            "Advertising product '{}' by {}",
            product.name, product.seller_email
        );

        let query = r#"
            INSERT INTO products (id, category_id, seller_email, name, price, description)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(&product.id)
            .bind(&product.category_id)
            .bind(&product.seller_email)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.description.as_deref())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert product: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(product)
    }

    async fn products_by_seller(&self, seller_email: &str) -> Result<Vec<Product>, DbError> {
        let query = r#"
            SELECT id, category_id, seller_email, name, price, description
            FROM products
            WHERE seller_email = $1
        "#;

        let rows = sqlx::query(query)
            .bind(seller_email)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_product).collect()
    }

    async fn all_products(&self) -> Result<Vec<Product>, DbError> {
        let query = r#"
            SELECT id, category_id, seller_email, name, price, description
            FROM products
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_product).collect()
    }

    async fn delete_product(&self, id: &str) -> Result<bool, DbError> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete product: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
