//! Bundles the SQL repositories over a shared client.

use crate::repositories::{
    BookingRepository, CatalogRepository, SqlBookingRepository, SqlCatalogRepository,
    SqlUserRepository, UserRepository,
};
use crate::{DbClient, DbError};

/// The full set of SQL repositories, cloned freely across handler state.
#[derive(Debug, Clone)]
pub struct SqlMarketRepositories {
    pub users: SqlUserRepository,
    pub catalog: SqlCatalogRepository,
    pub bookings: SqlBookingRepository,
}

impl SqlMarketRepositories {
    pub fn new(db_client: DbClient) -> Self {
        Self {
            users: SqlUserRepository::new(db_client.clone()),
            catalog: SqlCatalogRepository::new(db_client.clone()),
            bookings: SqlBookingRepository::new(db_client),
        }
    }

    /// Create every table this backend uses.
    pub async fn init_schemas(&self) -> Result<(), DbError> {
        self.users.init_schema().await?;
        self.catalog.init_schema().await?;
        self.bookings.init_schema().await?;
        Ok(())
    }
}
