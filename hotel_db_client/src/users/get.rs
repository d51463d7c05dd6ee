use models_hotel::user::UserRecord;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};

#[tracing::instrument(skip(db), fields(user_id = %id))]
pub async fn get_user(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<UserRecord>, HotelDatabaseError> {
    sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to fetch user");
            classified
        })
}

/// Role lookups back the admin-only routes; a missing row means the
/// principal has no profile here and therefore no role.
#[tracing::instrument(skip(db), fields(user_id = %id))]
pub async fn get_user_role(
    db: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<String>, HotelDatabaseError> {
    sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to fetch user role");
            classified
        })
}
