use models_hotel::user::{NewUser, UserRecord};
use sqlx::{Pool, Postgres};

use crate::error::{classify, HotelDatabaseError};

/// Inserts the profile row for a principal the identity provider already
/// knows. A duplicate id or email classifies as a conflict.
#[tracing::instrument(skip(db, user), fields(user_id = %user.id))]
pub async fn insert_user(
    db: &Pool<Postgres>,
    user: &NewUser,
) -> Result<UserRecord, HotelDatabaseError> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        INSERT INTO users (id, email, first_name, last_name, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.role)
    .fetch_one(db)
    .await
    .map_err(|err| {
        let classified = classify(err);
        match &classified {
            HotelDatabaseError::Conflict { constraint } => {
                tracing::warn!(constraint = %constraint, "user already exists");
            }
            other => {
                tracing::error!(error = ?other, "unable to insert user");
            }
        }
        classified
    })
}
