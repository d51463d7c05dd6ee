use models_hotel::occupation::OccupationRecord;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// Marks an occupation deleted without removing the row. Returns
/// [`HotelDatabaseError::NotFound`] when the row is absent or already
/// soft-deleted.
#[tracing::instrument(skip(db), fields(occupation_id = %id))]
pub async fn soft_delete_occupation(
    db: &Pool<Postgres>,
    id: Uuid,
    updated_by: Uuid,
) -> Result<OccupationRecord, HotelDatabaseError> {
    let result = sqlx::query_as::<_, OccupationRecord>(
        r#"
        UPDATE occupations
        SET deleted_at = NOW(), updated_at = NOW(), updated_by = $2
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(updated_by)
    .fetch_optional(db)
    .await;

    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HotelDatabaseError::NotFound),
        Err(err) => {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to soft-delete occupation");
            Err(classified)
        }
    }
}
