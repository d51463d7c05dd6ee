use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::context::ApiContext;

pub mod context;
mod guests;
mod health;
mod occupations;
mod permissions;
mod reply;
mod rooms;
pub mod swagger;
mod users;

pub async fn setup_and_serve(state: ApiContext) -> anyhow::Result<()> {
    let port = state.config.port;
    let env = state.config.environment;
    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", swagger::ApiDoc::openapi()));

    let bind_address = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to address {}", bind_address))?;

    tracing::info!(
        "hotel service is up and running with environment {:?} on port {}",
        &env,
        &port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error running axum server")
}

fn api_router(app_state: ApiContext) -> Router {
    let require_auth = axum::middleware::from_fn_with_state(
        app_state.verifier.clone(),
        hotel_auth::middleware::require_auth,
    );

    Router::new()
        .nest("/occupations", occupations::router())
        .nest("/guests", guests::router())
        .nest("/rooms", rooms::router())
        .nest("/users", users::router())
        .layer(require_auth)
        .method_not_allowed_fallback(reply::method_not_allowed)
        .with_state(app_state)
}
