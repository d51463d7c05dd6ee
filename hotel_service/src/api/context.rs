use axum::extract::FromRef;
use hotel_auth::token::JwtVerifier;
use hotel_service::domain::validators::Validators;
use hotel_service::outbound::PgOccupancyStore;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone, FromRef)]
pub struct ApiContext {
    /// Hotel database connection.
    pub db: PgPool,
    pub config: Arc<Config>,
    /// Access-token verifier shared with the auth middleware.
    pub verifier: JwtVerifier,
    /// Validator instances built once at startup and shared read-only.
    pub validators: Arc<Validators>,
    /// Storage adapter the occupation workflows run against.
    pub store: PgOccupancyStore,
}
