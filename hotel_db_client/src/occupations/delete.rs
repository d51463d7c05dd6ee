use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// Hard-deletes an occupation row. Only the reservation workflow calls this,
/// to undo a freshly inserted occupation whose guest links failed to land.
#[tracing::instrument(skip(db), fields(occupation_id = %id))]
pub async fn delete_occupation(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<(), HotelDatabaseError> {
    sqlx::query("DELETE FROM occupations WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to hard-delete occupation");
            classified
        })?;
    Ok(())
}
