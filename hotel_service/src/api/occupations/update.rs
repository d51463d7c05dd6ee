use axum::extract::{Extension, Path, State};
use axum::response::{Json, Response};
use hotel_service::domain::occupations;
use models_hotel::user::UserContext;
use serde_json::Value;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// Partially update an occupation.
#[utoipa::path(
    patch,
    path = "/occupations/{id}",
    request_body = models_hotel::occupation::UpdateOccupationRequest,
    responses(
        (status = 200, description = "Occupation updated successfully", body = models_hotel::occupation::Occupation),
        (status = 400, description = "Validation failure, empty update, or conflicting window"),
        (status = 404, description = "Occupation not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Occupations"]
)]
#[tracing::instrument(skip(context, user_context, payload), fields(user_id = %user_context.user_id, occupation_id = %id))]
pub async fn update_occupation(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let updated = occupations::update_occupation(
        &context.store,
        &context.validators.occupation,
        &user_context,
        id,
        &payload,
    )
    .await?;

    Ok(reply::success(updated, "Occupation updated successfully"))
}
