use anyhow::anyhow;
use hotel_service::domain::error::DomainError;
use models_hotel::user::UserContext;
use sqlx::PgPool;

use crate::api::reply::ApiError;

/// Role gate for admin-only routes. The role lives in the users table, not
/// in the token, so a demotion takes effect immediately.
#[tracing::instrument(skip(db, principal), fields(user_id = %principal.user_id))]
pub async fn ensure_admin(
    db: &PgPool,
    principal: &UserContext,
    action: &str,
) -> Result<(), ApiError> {
    let role = hotel_db_client::users::get::get_user_role(db, principal.user_id)
        .await
        .map_err(|err| {
            ApiError(DomainError::Internal(
                anyhow!(err).context("verifying permissions"),
            ))
        })?;

    match role.as_deref() {
        Some("admin") => Ok(()),
        _ => Err(ApiError(DomainError::Forbidden(format!(
            "Only admins can {action}"
        )))),
    }
}
