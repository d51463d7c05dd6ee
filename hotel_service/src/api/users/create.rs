use anyhow::anyhow;
use axum::extract::{Extension, State};
use axum::response::{Json, Response};
use field_validator::validate_and_extract;
use hotel_db_client::error::HotelDatabaseError;
use hotel_service::domain::error::DomainError;
use models_hotel::user::{self, CreateUserRequest, NewUser, UserContext};
use serde_json::Value;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::api::permissions::ensure_admin;
use crate::api::reply::{self, ApiError};

const USER_CREATE_FIELDS: &[&str] = &["email", "password", "firstName", "lastName", "role"];

/// Create a staff user profile. Admin only. Credentials live with the
/// identity provider; this route validates them and persists the profile
/// row under a fresh id the provider is told to adopt.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = models_hotel::user::User),
        (status = 400, description = "Validation failure or duplicate user"),
        (status = 403, description = "Caller is not an admin"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Users"]
)]
#[tracing::instrument(skip(context, user_context, payload), fields(user_id = %user_context.user_id))]
pub async fn create_user(
    State(context): State<ApiContext>,
    Extension(user_context): Extension<UserContext>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    ensure_admin(&context.db, &user_context, "create users").await?;

    let outcome = validate_and_extract(&payload, &context.validators.user, USER_CREATE_FIELDS);
    if !outcome.is_valid() {
        return Err(ApiError(DomainError::Validation(outcome.errors)));
    }

    let request: CreateUserRequest = outcome.into_typed().map_err(|err| {
        tracing::debug!(error = %err, "validated payload failed to type");
        ApiError(DomainError::BadRequest("Invalid request body".to_string()))
    })?;

    let new_user = NewUser {
        id: Uuid::new_v4(),
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
        role: request.role.as_str().to_string(),
    };

    let record = hotel_db_client::users::insert::insert_user(&context.db, &new_user)
        .await
        .map_err(|err| match err {
            HotelDatabaseError::Conflict { .. } => ApiError(DomainError::Conflict(
                "User with this email already exists".to_string(),
            )),
            other => ApiError(DomainError::Internal(anyhow!(other).context("creating user"))),
        })?;

    let created = user::to_api(record)
        .map_err(|err| ApiError(DomainError::Internal(anyhow!(err).context("mapping user"))))?;

    Ok(reply::created(created, "User created successfully"))
}
