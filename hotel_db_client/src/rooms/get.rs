use models_hotel::room::{RoomRecord, RoomSummaryRecord};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

/// How a caller identifies the room it wants.
#[derive(Debug, Clone)]
pub enum RoomLookup {
    Id(Uuid),
    RoomNumber(String),
}

#[tracing::instrument(skip(db))]
pub async fn get_room(
    db: &Pool<Postgres>,
    lookup: &RoomLookup,
) -> Result<Option<RoomRecord>, HotelDatabaseError> {
    let query = match lookup {
        RoomLookup::Id(id) => {
            sqlx::query_as::<_, RoomRecord>("SELECT * FROM rooms WHERE id = $1").bind(*id)
        }
        RoomLookup::RoomNumber(room_number) => {
            sqlx::query_as::<_, RoomRecord>("SELECT * FROM rooms WHERE room_number = $1")
                .bind(room_number.clone())
        }
    };

    query.fetch_optional(db).await.map_err(|err| {
        let classified = classify(err);
        tracing::error!(error = ?classified, "unable to fetch room");
        classified
    })
}

/// Fetches just the columns the occupation embeds need.
#[tracing::instrument(skip(db), fields(room_id = %id))]
pub async fn get_room_summary(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<RoomSummaryRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, RoomSummaryRecord>(
        "SELECT id, room_number, room_type FROM rooms WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(classify)
}
