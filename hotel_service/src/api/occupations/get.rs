use axum::extract::{Path, State};
use axum::response::Response;
use hotel_service::domain::occupations;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// Fetch one occupation, hydrated with its room and guests.
#[utoipa::path(
    get,
    path = "/occupations/{id}",
    responses(
        (status = 200, description = "Occupation fetched successfully", body = models_hotel::occupation::Occupation),
        (status = 404, description = "Occupation not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Occupations"]
)]
#[tracing::instrument(skip(context), fields(occupation_id = %id))]
pub async fn get_occupation(
    State(context): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let occupation = occupations::get_occupation(&context.store, id).await?;

    Ok(reply::success(occupation, "Occupation fetched successfully"))
}
