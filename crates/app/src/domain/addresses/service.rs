//! Addresses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::addresses::{
        data::NewAddress,
        errors::AddressesServiceError,
        records::{AddressRecord, AddressUuid},
        repository::PgAddressesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn get_address(
        &self,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_address(&mut tx, address).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_address(
        &self,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_address(&mut tx, &address).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Retrieve a single address, whoever owns it.
    async fn get_address(
        &self,
        address: AddressUuid,
    ) -> Result<AddressRecord, AddressesServiceError>;

    /// Store a new address for a user or restaurant.
    async fn create_address(
        &self,
        address: NewAddress,
    ) -> Result<AddressRecord, AddressesServiceError>;
}
