use models_hotel::guest::{GuestRecord, NewGuest};
use sqlx::{Pool, Postgres};

use crate::error::{classify, HotelDatabaseError};

#[tracing::instrument(skip(db, guest))]
pub async fn insert_guest(
    db: &Pool<Postgres>,
    guest: &NewGuest,
) -> Result<GuestRecord, HotelDatabaseError> {
    sqlx::query_as::<_, GuestRecord>(
        r#"
        INSERT INTO guests
            (first_name, last_name, email, phone, document_type, document_number,
             occupation, nationality)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&guest.first_name)
    .bind(&guest.last_name)
    .bind(&guest.email)
    .bind(&guest.phone)
    .bind(&guest.document_type)
    .bind(&guest.document_number)
    .bind(&guest.occupation)
    .bind(&guest.nationality)
    .fetch_one(db)
    .await
    .map_err(|err| {
        let classified = classify(err);
        tracing::error!(error = ?classified, "unable to insert guest");
        classified
    })
}
