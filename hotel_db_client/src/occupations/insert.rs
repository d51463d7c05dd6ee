use models_hotel::occupation::{NewOccupation, OccupationRecord};
use sqlx::{Pool, Postgres};

use crate::error::{classify, HotelDatabaseError};

/// Inserts a single occupation row. The room/period overlap constraint on
/// the table is the only thing standing between two concurrent reservations
/// of the same room; its rejection surfaces as
/// [`HotelDatabaseError::Conflict`].
#[tracing::instrument(skip(db, occupation), fields(room_id = %occupation.room_id))]
pub async fn insert_occupation(
    db: &Pool<Postgres>,
    occupation: &NewOccupation,
) -> Result<OccupationRecord, HotelDatabaseError> {
    let result = sqlx::query_as::<_, OccupationRecord>(
        r#"
        INSERT INTO occupations
            (room_id, check_in_datetime, check_out_datetime, stay_type, number_of_guests,
             total_price, base_price, discount_amount, status, notes, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(occupation.room_id)
    .bind(occupation.check_in_datetime)
    .bind(occupation.check_out_datetime)
    .bind(&occupation.stay_type)
    .bind(occupation.number_of_guests)
    .bind(occupation.total_price)
    .bind(occupation.base_price)
    .bind(occupation.discount_amount)
    .bind(&occupation.status)
    .bind(&occupation.notes)
    .bind(occupation.created_by)
    .fetch_one(db)
    .await;

    result.map_err(|err| {
        let classified = classify(err);
        match &classified {
            HotelDatabaseError::Conflict { constraint } => {
                tracing::warn!(
                    room_id = %occupation.room_id,
                    constraint = %constraint,
                    "occupation rejected by overlap constraint"
                );
            }
            other => {
                tracing::error!(error = ?other, "unable to insert occupation");
            }
        }
        classified
    })
}
