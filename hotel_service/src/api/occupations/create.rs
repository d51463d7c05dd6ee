use axum::extract::{Extension, State};
use axum::response::{Json, Response};
use hotel_service::domain::reservation;
use models_hotel::user::UserContext;
use serde_json::Value;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// Create a reservation: the occupation row plus its guest links.
#[utoipa::path(
    post,
    path = "/occupations",
    request_body = models_hotel::occupation::CreateOccupationRequest,
    responses(
        (status = 201, description = "Occupation created successfully", body = models_hotel::occupation::Occupation),
        (status = 400, description = "Validation failure or conflicting reservation window"),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Occupations"]
)]
#[tracing::instrument(skip(context, user_context, payload), fields(user_id = %user_context.user_id))]
pub async fn create_occupation(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let created = reservation::create_reservation(
        &context.store,
        &context.validators.occupation,
        &user_context,
        &payload,
    )
    .await?;

    Ok(reply::created(created, "Occupation created successfully"))
}
