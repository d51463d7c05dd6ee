//! Reservation creation: two dependent writes with a compensating delete.
//!
//! The persistence gateway only guarantees single-table atomicity, so the
//! occupation row and its guest links cannot land in one transaction. The
//! workflow walks `PendingOccupation → GuestsLinked → Committed`, and on a
//! guest-link failure falls into `CompensatedRollback`: it best-effort
//! hard-deletes the occupation it just created and reports the request as
//! failed. A partially created reservation is never reported as success.

use anyhow::anyhow;
use field_validator::{validate_and_extract, FieldValidator};
use models_hotel::occupation::{
    self, CreateOccupationRequest, NewOccupationGuest, Occupation,
};
use models_hotel::user::UserContext;
use serde_json::Value;

use crate::domain::error::{DomainError, Result};
use crate::domain::ports::{OccupancyStore, StoreError};
use crate::domain::validators::check_stay_window;

/// Client-facing translation of an overlap-constraint rejection.
pub const ROOM_OCCUPIED_MESSAGE: &str =
    "Room is already occupied or reserved for this time period";

/// Fields a creation payload may contribute; anything else is dropped
/// before the payload is typed.
pub const OCCUPATION_CREATE_FIELDS: &[&str] = &[
    "roomId",
    "checkInDatetime",
    "checkOutDatetime",
    "stayType",
    "numberOfGuests",
    "totalPrice",
    "basePrice",
    "discountAmount",
    "status",
    "notes",
    "guests",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationState {
    PendingOccupation,
    GuestsLinked,
    Committed,
    CompensatedRollback,
}

/// Creates an occupation and its guest links, returning the created
/// resource with `guests` embedded.
#[tracing::instrument(skip_all, fields(user_id = %principal.user_id))]
pub async fn create_reservation<S: OccupancyStore>(
    store: &S,
    validator: &FieldValidator,
    principal: &UserContext,
    payload: &Value,
) -> Result<Occupation> {
    let outcome = validate_and_extract(payload, validator, OCCUPATION_CREATE_FIELDS);
    if !outcome.is_valid() {
        return Err(DomainError::Validation(outcome.errors));
    }
    if let Some(window_error) = check_stay_window(&outcome.data) {
        return Err(DomainError::Validation(vec![window_error]));
    }

    let request: CreateOccupationRequest = outcome.into_typed().map_err(|err| {
        tracing::debug!(error = %err, "validated payload failed to type");
        DomainError::BadRequest("Invalid request body".to_string())
    })?;

    let guests = request.guests.clone();
    let new_occupation = request.into_new(principal.user_id);

    let record = store.insert_occupation(&new_occupation).await.map_err(|err| match err {
        StoreError::Conflict { details } => {
            tracing::warn!(details = %details, "reservation window conflict");
            DomainError::Conflict(ROOM_OCCUPIED_MESSAGE.to_string())
        }
        other => DomainError::Internal(anyhow!(other).context("creating occupation")),
    })?;

    tracing::debug!(
        occupation_id = %record.id,
        state = ?ReservationState::PendingOccupation,
        "occupation row created, linking guests"
    );

    let links: Vec<NewOccupationGuest> = guests
        .iter()
        .map(|guest| NewOccupationGuest {
            occupation_id: record.id,
            guest_id: guest.guest_id,
            is_primary: guest.is_primary,
        })
        .collect();

    let link_records = match store.insert_occupation_guests(&links).await {
        Ok(link_records) => link_records,
        Err(err) => {
            tracing::error!(
                error = ?err,
                occupation_id = %record.id,
                "guest links failed, compensating occupation insert"
            );
            // Best effort: the delete is neither retried nor re-verified.
            if let Err(compensation_err) = store.delete_occupation(record.id).await {
                tracing::error!(
                    error = ?compensation_err,
                    occupation_id = %record.id,
                    "compensating delete failed, occupation row may be orphaned"
                );
            }
            tracing::debug!(
                occupation_id = %record.id,
                state = ?ReservationState::CompensatedRollback,
                "reservation rolled back"
            );
            return Err(DomainError::Internal(
                anyhow!(err).context("adding guests to occupation"),
            ));
        }
    };

    tracing::debug!(
        occupation_id = %record.id,
        state = ?ReservationState::GuestsLinked,
        "guest links created"
    );

    let mut created = occupation::to_api(record)
        .map_err(|err| DomainError::Internal(anyhow!(err).context("mapping occupation")))?;
    created.guests = Some(occupation::guests_to_api_array(link_records));

    tracing::info!(
        occupation_id = %created.id,
        guest_count = created.guests.as_ref().map_or(0, Vec::len),
        state = ?ReservationState::Committed,
        "reservation committed"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validators::Validators;
    use chrono::Utc;
    use models_hotel::occupation::{
        NewOccupation, OccupationChanges, OccupationFilter, OccupationGuestRecord,
        OccupationRecord, OccupationWithRelations,
    };
    use serde_json::json;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory store with switchable failure injection, recording every
    /// call so tests can assert on the write sequence.
    #[derive(Default)]
    struct FakeStore {
        fail_occupation_insert_with_conflict: bool,
        fail_guest_insert: bool,
        fail_compensation: bool,
        inserted_occupations: Mutex<Vec<OccupationRecord>>,
        inserted_links: Mutex<Vec<NewOccupationGuest>>,
        deleted_occupations: Mutex<Vec<Uuid>>,
    }

    impl FakeStore {
        fn occupation_row_exists(&self, id: Uuid) -> bool {
            let deleted = self.deleted_occupations.lock().unwrap();
            self.inserted_occupations
                .lock()
                .unwrap()
                .iter()
                .any(|record| record.id == id && !deleted.contains(&id))
        }
    }

    impl OccupancyStore for FakeStore {
        async fn insert_occupation(
            &self,
            occupation: &NewOccupation,
        ) -> std::result::Result<OccupationRecord, StoreError> {
            if self.fail_occupation_insert_with_conflict {
                return Err(StoreError::Conflict {
                    details: "occupations_no_overlap".to_string(),
                });
            }
            let now = Utc::now();
            let record = OccupationRecord {
                id: Uuid::new_v4(),
                room_id: occupation.room_id,
                check_in_datetime: occupation.check_in_datetime,
                check_out_datetime: occupation.check_out_datetime,
                stay_type: occupation.stay_type.clone(),
                number_of_guests: occupation.number_of_guests,
                total_price: occupation.total_price,
                base_price: occupation.base_price,
                discount_amount: occupation.discount_amount,
                status: occupation.status.clone(),
                notes: occupation.notes.clone(),
                created_by: Some(occupation.created_by),
                updated_by: None,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };
            self.inserted_occupations.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn insert_occupation_guests(
            &self,
            links: &[NewOccupationGuest],
        ) -> std::result::Result<Vec<OccupationGuestRecord>, StoreError> {
            if self.fail_guest_insert {
                return Err(StoreError::Other(anyhow!("connection reset by peer")));
            }
            self.inserted_links.lock().unwrap().extend_from_slice(links);
            Ok(links
                .iter()
                .map(|link| OccupationGuestRecord {
                    id: Uuid::new_v4(),
                    occupation_id: link.occupation_id,
                    guest_id: link.guest_id,
                    is_primary: link.is_primary,
                    created_at: Utc::now(),
                })
                .collect())
        }

        async fn delete_occupation(&self, id: Uuid) -> std::result::Result<(), StoreError> {
            if self.fail_compensation {
                return Err(StoreError::Other(anyhow!("connection reset by peer")));
            }
            self.deleted_occupations.lock().unwrap().push(id);
            Ok(())
        }

        async fn update_occupation(
            &self,
            _id: Uuid,
            _changes: &OccupationChanges,
        ) -> std::result::Result<OccupationRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn soft_delete_occupation(
            &self,
            _id: Uuid,
            _updated_by: Uuid,
        ) -> std::result::Result<OccupationRecord, StoreError> {
            Err(StoreError::NotFound)
        }

        async fn get_occupation(
            &self,
            _id: Uuid,
        ) -> std::result::Result<Option<OccupationRecord>, StoreError> {
            Ok(None)
        }

        async fn get_occupation_with_relations(
            &self,
            _id: Uuid,
        ) -> std::result::Result<Option<OccupationWithRelations>, StoreError> {
            Ok(None)
        }

        async fn list_occupations(
            &self,
            _filter: &OccupationFilter,
        ) -> std::result::Result<Vec<OccupationWithRelations>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn principal() -> UserContext {
        UserContext {
            user_id: Uuid::new_v4(),
            email: "front.desk@hotel.com".to_string(),
        }
    }

    fn payload() -> Value {
        json!({
            "roomId": "0b0e9a4e-9d3a-4f6b-8a62-34c41d2d42a1",
            "checkInDatetime": "2025-03-01T14:00:00Z",
            "checkOutDatetime": "2025-03-02T10:00:00Z",
            "stayType": "nightly",
            "numberOfGuests": 2,
            "totalPrice": 350000,
            "guests": [
                { "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": true },
                { "guestId": "9b6f3a7e-1f0c-4f0d-8a41-2f8a4f1f2d10", "isPrimary": false },
            ],
        })
    }

    #[tokio::test]
    async fn creates_occupation_with_guest_links() {
        let store = FakeStore::default();
        let validators = Validators::new();

        let created = create_reservation(&store, &validators.occupation, &principal(), &payload())
            .await
            .unwrap();

        let guests = created.guests.unwrap();
        assert_eq!(guests.len(), 2);
        assert_eq!(guests.iter().filter(|guest| guest.is_primary).count(), 1);
        assert_eq!(created.status.as_str(), "reserved");
        assert!(store.occupation_row_exists(created.id));
    }

    #[tokio::test]
    async fn invalid_guest_array_never_reaches_the_store() {
        let store = FakeStore::default();
        let validators = Validators::new();
        let mut body = payload();
        body["guests"] = json!([
            { "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": false },
        ]);

        let result = create_reservation(&store, &validators.occupation, &principal(), &body).await;

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert!(errors[0].message.contains("At least one guest must be marked as primary"));
        assert!(store.inserted_occupations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn guest_link_failure_compensates_and_reports_internal() {
        let store = FakeStore {
            fail_guest_insert: true,
            ..Default::default()
        };
        let validators = Validators::new();

        let result = create_reservation(&store, &validators.occupation, &principal(), &payload()).await;

        assert!(matches!(result, Err(DomainError::Internal(_))));
        let occupation_id = {
            let inserted = store.inserted_occupations.lock().unwrap();
            assert_eq!(inserted.len(), 1);
            inserted[0].id
        };
        // The compensating delete removed the row the workflow created.
        assert!(!store.occupation_row_exists(occupation_id));
    }

    #[tokio::test]
    async fn failed_compensation_still_reports_internal() {
        let store = FakeStore {
            fail_guest_insert: true,
            fail_compensation: true,
            ..Default::default()
        };
        let validators = Validators::new();

        let result = create_reservation(&store, &validators.occupation, &principal(), &payload()).await;

        // The client still sees a failure even though the occupation row
        // could not be removed.
        assert!(matches!(result, Err(DomainError::Internal(_))));
        assert!(store.deleted_occupations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn overlap_conflict_translates_and_skips_guest_insert() {
        let store = FakeStore {
            fail_occupation_insert_with_conflict: true,
            ..Default::default()
        };
        let validators = Validators::new();

        let result = create_reservation(&store, &validators.occupation, &principal(), &payload()).await;

        let Err(DomainError::Conflict(message)) = result else {
            panic!("expected conflict");
        };
        assert_eq!(message, ROOM_OCCUPIED_MESSAGE);
        assert!(store.inserted_links.lock().unwrap().is_empty());
        assert!(store.deleted_occupations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn inverted_stay_window_is_rejected_before_any_write() {
        let store = FakeStore::default();
        let validators = Validators::new();
        let mut body = payload();
        body["checkOutDatetime"] = json!("2025-03-01T10:00:00Z");

        let result = create_reservation(&store, &validators.occupation, &principal(), &body).await;

        let Err(DomainError::Validation(errors)) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(errors[0].field.as_deref(), Some("checkOutDatetime"));
        assert!(store.inserted_occupations.lock().unwrap().is_empty());
    }
}
