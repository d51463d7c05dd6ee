use models_hotel::guest::GuestRecord;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

#[tracing::instrument(skip(db), fields(guest_id = %id))]
pub async fn get_guest(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<GuestRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, GuestRecord>("SELECT * FROM guests WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to fetch guest");
            classified
        })
}
