use models_hotel::room::RoomRecord;
use sqlx::{Pool, Postgres};

use crate::error::{classify, HotelDatabaseError};

#[tracing::instrument(skip(db))]
pub async fn list_rooms(db: &Pool<Postgres>) -> Result<Vec<RoomRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, RoomRecord>("SELECT * FROM rooms ORDER BY room_number")
        .fetch_all(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to list rooms");
            classified
        })
}
