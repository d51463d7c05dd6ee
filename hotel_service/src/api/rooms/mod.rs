use axum::routing::get;
use axum::Router;

use crate::api::context::ApiContext;

pub mod get;
pub mod list;

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/", get(list::list_rooms))
        .route("/{key}", get(get::get_room))
}
