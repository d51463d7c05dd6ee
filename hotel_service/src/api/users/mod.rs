use axum::routing::post;
use axum::Router;

use crate::api::context::ApiContext;

pub mod create;

pub fn router() -> Router<ApiContext> {
    Router::new().route("/", post(create::create_user))
}
