use models_hotel::occupation::{OccupationRecord, OccupationWithRelations};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};
use crate::occupation_guests::list::list_links_for_occupations;
use crate::rooms::get::get_room_summary;

/// Fetches one occupation row by primary key, soft-deleted rows included so
/// callers can distinguish "gone" from "never existed".
#[tracing::instrument(skip(db), fields(occupation_id = %id))]
pub async fn get_occupation(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<OccupationRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, OccupationRecord>("SELECT * FROM occupations WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to fetch occupation");
            classified
        })
}

/// Fetches one live occupation together with its room summary and guest
/// links. Related rows come from follow-up queries; a room that has since
/// vanished simply leaves the embed empty.
#[tracing::instrument(skip(db), fields(occupation_id = %id))]
pub async fn get_occupation_with_relations(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<OccupationWithRelations>, HotelDatabaseError> {
    let occupation = sqlx::query_as::<_, OccupationRecord>(
        "SELECT * FROM occupations WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|err| {
        let classified = classify(err);
        tracing::error!(error = ?classified, "unable to fetch occupation");
        classified
    })?;

    let Some(occupation) = occupation else {
        return Ok(None);
    };

    let room = get_room_summary(db, occupation.room_id).await?;
    let guests = list_links_for_occupations(db, &[occupation.id]).await?;

    Ok(Some(OccupationWithRelations {
        occupation,
        room,
        guests,
    }))
}
