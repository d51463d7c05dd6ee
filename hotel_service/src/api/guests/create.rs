use anyhow::anyhow;
use axum::extract::{Extension, State};
use axum::response::{Json, Response};
use field_validator::validate_and_extract;
use hotel_service::domain::error::DomainError;
use models_hotel::guest::{self, CreateGuestRequest};
use models_hotel::user::UserContext;
use serde_json::Value;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

const GUEST_CREATE_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "email",
    "phone",
    "documentType",
    "documentNumber",
    "occupation",
    "nationality",
];

/// Register a guest.
#[utoipa::path(
    post,
    path = "/guests",
    request_body = CreateGuestRequest,
    responses(
        (status = 201, description = "Guest created successfully", body = models_hotel::guest::Guest),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Guests"]
)]
#[tracing::instrument(skip(context, user_context, payload), fields(user_id = %user_context.user_id))]
pub async fn create_guest(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let outcome = validate_and_extract(&payload, &context.validators.guest, GUEST_CREATE_FIELDS);
    if !outcome.is_valid() {
        return Err(ApiError(DomainError::Validation(outcome.errors)));
    }

    let request: CreateGuestRequest = outcome.into_typed().map_err(|err| {
        tracing::debug!(error = %err, "validated payload failed to type");
        ApiError(DomainError::BadRequest("Invalid request body".to_string()))
    })?;

    let record = hotel_db_client::guests::insert::insert_guest(&context.db, &request.into_new())
        .await
        .map_err(|err| {
            ApiError(DomainError::Internal(anyhow!(err).context("creating guest")))
        })?;

    let created = guest::to_api(record)
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("mapping guest"))))?;

    Ok(reply::created(created, "Guest created successfully"))
}
