//! Single-table occupation workflows: update, soft delete, fetch, list.
//! They share the reservation workflow's conflict and not-found
//! translations but need no compensation.

use anyhow::anyhow;
use field_validator::FieldValidator;
use models_hotel::occupation::{
    self, Occupation, OccupationFilter, OccupationListQuery, UpdateOccupationRequest,
};
use models_hotel::user::UserContext;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::error::{DomainError, Result};
use crate::domain::ports::{OccupancyStore, StoreError};
use crate::domain::reservation::ROOM_OCCUPIED_MESSAGE;
use crate::domain::validators::check_stay_window;

/// Applies a partial update. An update that validates to zero usable fields
/// is a caller error, surfaced here rather than in the extractor.
#[tracing::instrument(skip_all, fields(occupation_id = %id, user_id = %principal.user_id))]
pub async fn update_occupation<S: OccupancyStore>(
    store: &S,
    validator: &FieldValidator,
    principal: &UserContext,
    id: Uuid,
    payload: &Value,
) -> Result<Occupation> {
    let outcome = validator.validate_partial(payload);
    if !outcome.is_valid() {
        return Err(DomainError::Validation(outcome.errors));
    }
    if let Some(window_error) = check_stay_window(&outcome.data) {
        return Err(DomainError::Validation(vec![window_error]));
    }
    if outcome.data.is_empty() {
        return Err(DomainError::BadRequest(
            "At least one field must be provided for update".to_string(),
        ));
    }

    let request: UpdateOccupationRequest = outcome.into_typed().map_err(|err| {
        tracing::debug!(error = %err, "validated payload failed to type");
        DomainError::BadRequest("Invalid request body".to_string())
    })?;
    let changes = request.into_changes(principal.user_id);

    let record = store.update_occupation(id, &changes).await.map_err(|err| match err {
        StoreError::NotFound => DomainError::NotFound("Occupation"),
        StoreError::Conflict { details } => {
            tracing::warn!(details = %details, "update collided with another stay");
            DomainError::Conflict(ROOM_OCCUPIED_MESSAGE.to_string())
        }
        other => DomainError::Internal(anyhow!(other).context("updating occupation")),
    })?;

    occupation::to_api(record)
        .map_err(|err| DomainError::Internal(anyhow!(err).context("mapping occupation")))
}

/// Soft-deletes an occupation, refusing to delete twice.
#[tracing::instrument(skip_all, fields(occupation_id = %id, user_id = %principal.user_id))]
pub async fn delete_occupation<S: OccupancyStore>(
    store: &S,
    principal: &UserContext,
    id: Uuid,
) -> Result<Occupation> {
    let existing = store
        .get_occupation(id)
        .await
        .map_err(|err| DomainError::Internal(anyhow!(err).context("fetching occupation")))?
        .ok_or(DomainError::NotFound("Occupation"))?;

    if existing.deleted_at.is_some() {
        return Err(DomainError::BadRequest(
            "Occupation is already deleted".to_string(),
        ));
    }

    let record = store
        .soft_delete_occupation(id, principal.user_id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => DomainError::NotFound("Occupation"),
            other => DomainError::Internal(anyhow!(other).context("deleting occupation")),
        })?;

    occupation::to_api(record)
        .map_err(|err| DomainError::Internal(anyhow!(err).context("mapping occupation")))
}

#[tracing::instrument(skip_all, fields(occupation_id = %id))]
pub async fn get_occupation<S: OccupancyStore>(store: &S, id: Uuid) -> Result<Occupation> {
    let bundle = store
        .get_occupation_with_relations(id)
        .await
        .map_err(|err| DomainError::Internal(anyhow!(err).context("fetching occupation")))?
        .ok_or(DomainError::NotFound("Occupation"))?;

    occupation::with_relations_to_api(bundle)
        .map_err(|err| DomainError::Internal(anyhow!(err).context("mapping occupation")))
}

#[tracing::instrument(skip_all)]
pub async fn list_occupations<S: OccupancyStore>(
    store: &S,
    query: OccupationListQuery,
) -> Result<Vec<Occupation>> {
    let filter = OccupationFilter::from(query);
    let bundles = store
        .list_occupations(&filter)
        .await
        .map_err(|err| DomainError::Internal(anyhow!(err).context("listing occupations")))?;

    occupation::with_relations_to_api_array(bundles)
        .map_err(|err| DomainError::Internal(anyhow!(err).context("mapping occupations")))
}
