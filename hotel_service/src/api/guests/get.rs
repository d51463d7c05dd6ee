use anyhow::anyhow;
use axum::extract::{Extension, Path, State};
use axum::response::Response;
use hotel_service::domain::error::DomainError;
use models_hotel::guest;
use models_hotel::user::UserContext;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::permissions::ensure_admin;
use crate::api::reply::{self, ApiError};

/// Fetch one guest. Admin only.
#[utoipa::path(
    get,
    path = "/guests/{id}",
    responses(
        (status = 200, description = "Guest fetched successfully", body = models_hotel::guest::Guest),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Guest not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Guests"]
)]
#[tracing::instrument(skip(context, user_context), fields(user_id = %user_context.user_id, guest_id = %id))]
pub async fn get_guest(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    ensure_admin(&context.db, &user_context, "get guests").await?;

    let record = hotel_db_client::guests::get::get_guest(&context.db, id)
        .await
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("fetching guest"))))?
        .ok_or(ApiError(DomainError::NotFound("Guest")))?;

    let guest = guest::to_api(record)
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("mapping guest"))))?;

    Ok(reply::success(guest, "Guest fetched successfully"))
}
