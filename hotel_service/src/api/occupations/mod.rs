use axum::routing::{get, post};
use axum::Router;

use crate::api::context::ApiContext;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub fn router() -> Router<ApiContext> {
    Router::new()
        .route("/", post(create::create_occupation).get(list::list_occupations))
        .route(
            "/{id}",
            get(get::get_occupation)
                .patch(update::update_occupation)
                .delete(delete::delete_occupation),
        )
}
