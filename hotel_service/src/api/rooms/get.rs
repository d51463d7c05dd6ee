use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::response::Response;
use hotel_db_client::rooms::get::RoomLookup;
use hotel_service::domain::error::DomainError;
use models_hotel::room;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// Fetch one room, addressed by id or by room number.
#[utoipa::path(
    get,
    path = "/rooms/{key}",
    responses(
        (status = 200, description = "Room fetched successfully", body = models_hotel::room::Room),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Rooms"]
)]
#[tracing::instrument(skip(context))]
pub async fn get_room(
    State(context): State<ApiContext>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let lookup = match Uuid::parse_str(&key) {
        Ok(id) => RoomLookup::Id(id),
        Err(_) => RoomLookup::RoomNumber(key),
    };

    let record = hotel_db_client::rooms::get::get_room(&context.db, &lookup)
        .await
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("fetching room"))))?
        .ok_or(ApiError(DomainError::NotFound("Room")))?;

    let room = room::to_api(record)
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("mapping room"))))?;

    Ok(reply::success(room, "Room fetched successfully"))
}
