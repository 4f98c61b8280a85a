//! Repository trait for the catalog (categories and products)

use crate::error::DbError;

pub use market_common::models::{Category, Product};

/// Repository for browsing categories and managing seller listings.
pub trait CatalogRepository {
    /// Create the categories/products tables if they don't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert a category, keeping an existing one with the same id.
    fn insert_category(
        &self,
        category: Category,
    ) -> impl std::future::Future<Output = Result<Category, DbError>> + Send;

    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Category>, DbError>> + Send;

    fn find_category(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Category>, DbError>> + Send;

    /// All products advertised under a category.
    fn products_in_category(
        &self,
        category_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, DbError>> + Send;

    fn insert_product(
        &self,
        product: Product,
    ) -> impl std::future::Future<Output = Result<Product, DbError>> + Send;

    /// Products listed by one seller, for the seller dashboard.
    fn products_by_seller(
        &self,
        seller_email: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, DbError>> + Send;

    fn all_products(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, DbError>> + Send;

    /// Delete a product by id. Returns `false` when nothing was deleted.
    fn delete_product(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
