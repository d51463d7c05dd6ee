use axum::extract::{Extension, Path, State};
use axum::response::Response;
use hotel_service::domain::occupations;
use models_hotel::user::UserContext;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::permissions::ensure_admin;
use crate::api::reply::{self, ApiError};

/// Soft-delete an occupation. Admin only.
#[utoipa::path(
    delete,
    path = "/occupations/{id}",
    responses(
        (status = 200, description = "Occupation deleted successfully", body = models_hotel::occupation::Occupation),
        (status = 400, description = "Occupation is already deleted"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Occupation not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Occupations"]
)]
#[tracing::instrument(skip(context, user_context), fields(user_id = %user_context.user_id, occupation_id = %id))]
pub async fn delete_occupation(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    ensure_admin(&context.db, &user_context, "delete occupations").await?;

    let deleted = occupations::delete_occupation(&context.store, &user_context, id).await?;

    Ok(reply::success(deleted, "Occupation deleted successfully"))
}
