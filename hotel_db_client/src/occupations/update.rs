use models_hotel::occupation::{OccupationChanges, OccupationRecord};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// Applies a sparse column update: only fields carried by `changes` are
/// written. Soft-deleted rows are treated as gone.
#[tracing::instrument(skip(db, changes), fields(occupation_id = %id))]
pub async fn update_occupation(
    db: &Pool<Postgres>,
    id: Uuid,
    changes: &OccupationChanges,
) -> Result<OccupationRecord, HotelDatabaseError> {
    let mut builder = QueryBuilder::<Postgres>::new("UPDATE occupations SET updated_at = NOW()");
    push_changes(&mut builder, changes);
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" AND deleted_at IS NULL RETURNING *");

    let result = builder
        .build_query_as::<OccupationRecord>()
        .fetch_optional(db)
        .await;

    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HotelDatabaseError::NotFound),
        Err(err) => {
            let classified = classify(err);
            match &classified {
                HotelDatabaseError::Conflict { constraint } => {
                    tracing::warn!(
                        constraint = %constraint,
                        "occupation update rejected by overlap constraint"
                    );
                }
                other => {
                    tracing::error!(error = ?other, "unable to update occupation");
                }
            }
            Err(classified)
        }
    }
}

fn push_changes(builder: &mut QueryBuilder<'_, Postgres>, changes: &OccupationChanges) {
    if let Some(room_id) = changes.room_id {
        builder.push(", room_id = ");
        builder.push_bind(room_id);
    }
    if let Some(check_in_datetime) = changes.check_in_datetime {
        builder.push(", check_in_datetime = ");
        builder.push_bind(check_in_datetime);
    }
    if let Some(check_out_datetime) = changes.check_out_datetime {
        builder.push(", check_out_datetime = ");
        builder.push_bind(check_out_datetime);
    }
    if let Some(stay_type) = changes.stay_type.clone() {
        builder.push(", stay_type = ");
        builder.push_bind(stay_type);
    }
    if let Some(number_of_guests) = changes.number_of_guests {
        builder.push(", number_of_guests = ");
        builder.push_bind(number_of_guests);
    }
    if let Some(total_price) = changes.total_price {
        builder.push(", total_price = ");
        builder.push_bind(total_price);
    }
    if let Some(base_price) = changes.base_price {
        builder.push(", base_price = ");
        builder.push_bind(base_price);
    }
    if let Some(discount_amount) = changes.discount_amount {
        builder.push(", discount_amount = ");
        builder.push_bind(discount_amount);
    }
    if let Some(status) = changes.status.clone() {
        builder.push(", status = ");
        builder.push_bind(status);
    }
    if let Some(notes) = changes.notes.clone() {
        builder.push(", notes = ");
        builder.push_bind(notes);
    }
    builder.push(", updated_by = ");
    builder.push_bind(changes.updated_by);
}
