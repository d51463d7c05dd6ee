use models_hotel::occupation::{NewOccupationGuest, OccupationGuestRecord};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// Inserts every guest link in one statement so the batch lands atomically:
/// either all join rows for the occupation exist afterwards, or none do.
#[tracing::instrument(skip(db, links), fields(count = links.len()))]
pub async fn insert_occupation_guests(
    db: &Pool<Postgres>,
    links: &[NewOccupationGuest],
) -> Result<Vec<OccupationGuestRecord>, HotelDatabaseError> {
    let occupation_ids: Vec<Uuid> = links.iter().map(|link| link.occupation_id).collect();
    let guest_ids: Vec<Uuid> = links.iter().map(|link| link.guest_id).collect();
    let primaries: Vec<bool> = links.iter().map(|link| link.is_primary).collect();

    sqlx::query_as::<_, OccupationGuestRecord>(
        r#"
        INSERT INTO occupation_guests (occupation_id, guest_id, is_primary)
        SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::boolean[])
        RETURNING *
        "#,
    )
    .bind(occupation_ids)
    .bind(guest_ids)
    .bind(primaries)
    .fetch_all(db)
    .await
    .map_err(|err| {
        let classified = classify(err);
        tracing::error!(error = ?classified, "unable to insert occupation guests");
        classified
    })
}
