use axum::extract::{Query, State};
use axum::response::Response;
use hotel_service::domain::occupations;
use models_hotel::occupation::OccupationListQuery;

use crate::api::context::ApiContext;
use crate::api::reply::{self, ApiError};

/// List occupations with the standard filters, room and guests hydrated.
#[utoipa::path(
    get,
    path = "/occupations",
    params(
        ("status" = Option<String>, Query, description = "Comma-separated status filter"),
        ("roomId" = Option<uuid::Uuid>, Query, description = "Filter by room"),
        ("stayType" = Option<String>, Query, description = "hourly or nightly"),
        ("checkInFrom" = Option<String>, Query, description = "Earliest check-in"),
        ("checkInTo" = Option<String>, Query, description = "Latest check-in"),
        ("checkOutFrom" = Option<String>, Query, description = "Earliest check-out"),
        ("checkOutTo" = Option<String>, Query, description = "Latest check-out"),
        ("minPrice" = Option<f64>, Query, description = "Minimum total price"),
        ("maxPrice" = Option<f64>, Query, description = "Maximum total price"),
        ("orderBy" = Option<String>, Query, description = "Sort column"),
        ("orderDirection" = Option<String>, Query, description = "asc or desc"),
    ),
    responses(
        (status = 200, description = "Occupations fetched successfully", body = Vec<models_hotel::occupation::Occupation>),
        (status = 500, description = "Internal server error")
    ),
    tags = ["Occupations"]
)]
#[tracing::instrument(skip(context, query))]
pub async fn list_occupations(
    State(context): State<ApiContext>,
    Query(query): Query<OccupationListQuery>,
) -> Result<Response, ApiError> {
    let occupations = occupations::list_occupations(&context.store, query).await?;

    Ok(reply::success(
        occupations,
        "Occupations fetched successfully",
    ))
}
