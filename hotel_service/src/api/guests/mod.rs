use axum::routing::{get, post};
use axum::Router;

use crate::api::context::ApiContext;

pub mod create;
pub mod get;

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/", post(create::create_guest))
        .route("/{id}", get(get::get_guest))
}
