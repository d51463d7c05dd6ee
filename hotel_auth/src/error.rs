#[derive(thiserror::Error, Debug, serde::Serialize)]
#[serde(tag = "type")]
pub enum AuthError {
    #[error("invalid Authorization header format")]
    InvalidAuthorizationHeaderFormat,
    #[error("no access token provided")]
    NoAccessTokenProvided,
    #[error("jwt validation failed: {details}")]
    JwtValidationFailed { details: String },
    #[error("jwt is expired")]
    JwtExpired,
    #[error("token subject is not a valid user id")]
    InvalidSubject,
}
