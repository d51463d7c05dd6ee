use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use model_response::ApiResponse;
use models_hotel::user::UserContext;

use crate::error::AuthError;
use crate::headers::extract_bearer_token;
use crate::token::JwtVerifier;

/// Verifies the bearer token and attaches the resulting [`UserContext`] to
/// the request. Every route behind this middleware can assume an
/// authenticated principal.
pub async fn require_auth(
    State(verifier): State<JwtVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let access_token = extract_bearer_token(req.headers()).map_err(|err| {
        tracing::trace!(error = ?err, "unable to get access token");
        unauthorized("Authorization header required")
    })?;

    let claims = verifier.verify(&access_token).map_err(|err| {
        match err {
            AuthError::JwtExpired => tracing::trace!("access token expired"),
            _ => tracing::warn!(error = ?err, "unable to verify access token"),
        }
        unauthorized("Invalid or expired token")
    })?;

    let user_context = UserContext::try_from(claims).map_err(|err| {
        tracing::warn!(error = ?err, "token verified but subject is unusable");
        unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(user_context);
    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error(message)),
    )
        .into_response()
}
