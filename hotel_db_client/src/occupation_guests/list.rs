use models_hotel::occupation::LinkedGuestRecord;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// Fetches the guest links for a set of occupations, with the guests' names
/// joined in for hydration. The join is LEFT so a dangling guest id still
/// yields the link row.
#[tracing::instrument(skip(db, occupation_ids), fields(count = occupation_ids.len()))]
pub async fn list_links_for_occupations(
    db: &Pool<Postgres>,
    occupation_ids: &[Uuid],
) -> Result<Vec<LinkedGuestRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, LinkedGuestRecord>(
        r#"
        SELECT og.id, og.occupation_id, og.guest_id, og.is_primary, og.created_at,
               g.first_name, g.last_name
        FROM occupation_guests og
        LEFT JOIN guests g ON g.id = og.guest_id
        WHERE og.occupation_id = ANY($1)
        ORDER BY og.created_at
        "#,
    )
    .bind(occupation_ids)
    .fetch_all(db)
    .await
    .map_err(|err| {
        let classified = classify(err);
        tracing::error!(error = ?classified, "unable to list occupation guests");
        classified
    })
}
