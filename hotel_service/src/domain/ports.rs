//! Storage port for occupation workflows.
//!
//! The port speaks in structured error kinds: the database adapter decides
//! what counts as a conflict (from SQLSTATE), and the workflows only ever
//! match on the kind.

use models_hotel::occupation::{
    NewOccupation, NewOccupationGuest, OccupationChanges, OccupationFilter,
    OccupationGuestRecord, OccupationRecord, OccupationWithRelations,
};
use thiserror::Error;
use uuid::Uuid;

/// Structured storage failure kinds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A server-side uniqueness or overlap constraint rejected the write.
    #[error("conflicting write: {details}")]
    Conflict { details: String },

    /// The targeted row does not exist.
    #[error("row not found")]
    NotFound,

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Table-scoped persistence operations the occupation workflows depend on.
/// Single-table writes are atomic; there is no multi-table transaction
/// primitive, which is exactly why the reservation workflow compensates.
pub trait OccupancyStore: Send + Sync {
    fn insert_occupation(
        &self,
        occupation: &NewOccupation,
    ) -> impl std::future::Future<Output = Result<OccupationRecord, StoreError>> + Send;

    fn insert_occupation_guests(
        &self,
        links: &[NewOccupationGuest],
    ) -> impl std::future::Future<Output = Result<Vec<OccupationGuestRecord>, StoreError>> + Send;

    /// Hard delete, used only as the compensating action.
    fn delete_occupation(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    fn update_occupation(
        &self,
        id: Uuid,
        changes: &OccupationChanges,
    ) -> impl std::future::Future<Output = Result<OccupationRecord, StoreError>> + Send;

    fn soft_delete_occupation(
        &self,
        id: Uuid,
        updated_by: Uuid,
    ) -> impl std::future::Future<Output = Result<OccupationRecord, StoreError>> + Send;

    fn get_occupation(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<OccupationRecord>, StoreError>> + Send;

    fn get_occupation_with_relations(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<OccupationWithRelations>, StoreError>> + Send;

    fn list_occupations(
        &self,
        filter: &OccupationFilter,
    ) -> impl std::future::Future<Output = Result<Vec<OccupationWithRelations>, StoreError>> + Send;
}
