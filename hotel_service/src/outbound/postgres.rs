//! Postgres adapter for the storage port, delegating to the table-scoped
//! operations in `hotel_db_client`.

use hotel_db_client::error::HotelDatabaseError;
use hotel_db_client::{occupation_guests, occupations};
use models_hotel::occupation::{
    NewOccupation, NewOccupationGuest, OccupationChanges, OccupationFilter,
    OccupationGuestRecord, OccupationRecord, OccupationWithRelations,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::ports::{OccupancyStore, StoreError};

impl From<HotelDatabaseError> for StoreError {
    fn from(err: HotelDatabaseError) -> Self {
        match err {
            HotelDatabaseError::NotFound => StoreError::NotFound,
            HotelDatabaseError::Conflict { constraint } => StoreError::Conflict {
                details: constraint,
            },
            HotelDatabaseError::Query(err) => StoreError::Other(anyhow::Error::new(err)),
        }
    }
}

#[derive(Clone)]
pub struct PgOccupancyStore {
    db: PgPool,
}

impl PgOccupancyStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl OccupancyStore for PgOccupancyStore {
    async fn insert_occupation(
        &self,
        occupation: &NewOccupation,
    ) -> Result<OccupationRecord, StoreError> {
        Ok(occupations::insert::insert_occupation(&self.db, occupation).await?)
    }

    async fn insert_occupation_guests(
        &self,
        links: &[NewOccupationGuest],
    ) -> Result<Vec<OccupationGuestRecord>, StoreError> {
        Ok(occupation_guests::insert::insert_occupation_guests(&self.db, links).await?)
    }

    async fn delete_occupation(&self, id: Uuid) -> Result<(), StoreError> {
        Ok(occupations::delete::delete_occupation(&self.db, id).await?)
    }

    async fn update_occupation(
        &self,
        id: Uuid,
        changes: &OccupationChanges,
    ) -> Result<OccupationRecord, StoreError> {
        Ok(occupations::update::update_occupation(&self.db, id, changes).await?)
    }

    async fn soft_delete_occupation(
        &self,
        id: Uuid,
        updated_by: Uuid,
    ) -> Result<OccupationRecord, StoreError> {
        Ok(occupations::soft_delete::soft_delete_occupation(&self.db, id, updated_by).await?)
    }

    async fn get_occupation(&self, id: Uuid) -> Result<Option<OccupationRecord>, StoreError> {
        Ok(occupations::get::get_occupation(&self.db, id).await?)
    }

    async fn get_occupation_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<OccupationWithRelations>, StoreError> {
        Ok(occupations::get::get_occupation_with_relations(&self.db, id).await?)
    }

    async fn list_occupations(
        &self,
        filter: &OccupationFilter,
    ) -> Result<Vec<OccupationWithRelations>, StoreError> {
        Ok(occupations::list::list_occupations(&self.db, filter).await?)
    }
}
