use anyhow::anyhow;
use axum::extract::State;
use axum::response::Response;
use hotel_service::domain::error::DomainError;
use models_hotel::room;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// List every room.
#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "Rooms fetched successfully", body = Vec<models_hotel::room::Room>),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Rooms"]
)]
#[tracing::instrument(skip(context))]
pub async fn list_rooms(State(context): State<ApiContext>) -> Result<Response, ApiError> {
    let records = hotel_db_client::rooms::list::list_rooms(&context.db)
        .await
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("listing rooms"))))?;

    let rooms = room::to_api_array(records)
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("mapping rooms"))))?;

    Ok(reply::success(rooms, "Rooms fetched successfully"))
}
