use std::collections::HashMap;

use models_hotel::occupation::{OccupationFilter, OccupationRecord, OccupationWithRelations};
use models_hotel::room::RoomSummaryRecord;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{classify, HotelDatabaseError};
use crate::occupation_guests::list::list_links_for_occupations;

/// Lists live occupations matching the filter, then hydrates room summaries
/// and guest links with two follow-up queries keyed by the returned ids.
#[tracing::instrument(skip(db, filter))]
pub async fn list_occupations(
    db: &Pool<Postgres>,
    filter: &OccupationFilter,
) -> Result<Vec<OccupationWithRelations>, HotelDatabaseError> {
    let mut builder =
        QueryBuilder::<Postgres>::new("SELECT * FROM occupations WHERE deleted_at IS NULL");
    push_filter(&mut builder, filter);

    let occupations = builder
        .build_query_as::<OccupationRecord>()
        .fetch_all(db)
        .await
        .map_err(|err| {
            let classified = classify(err);
            tracing::error!(error = ?classified, "unable to list occupations");
            classified
        })?;

    if occupations.is_empty() {
        return Ok(Vec::new());
    }

    let occupation_ids: Vec<Uuid> = occupations.iter().map(|record| record.id).collect();
    let room_ids: Vec<Uuid> = occupations.iter().map(|record| record.room_id).collect();

    let mut rooms: HashMap<Uuid, RoomSummaryRecord> = sqlx::query_as::<_, RoomSummaryRecord>(
        "SELECT id, room_number, room_type FROM rooms WHERE id = ANY($1)",
    )
    .bind(&room_ids)
    .fetch_all(db)
    .await
    .map_err(classify)?
    .into_iter()
    .map(|summary| (summary.id, summary))
    .collect();

    let mut links_by_occupation: HashMap<Uuid, Vec<_>> = HashMap::new();
    for link in list_links_for_occupations(db, &occupation_ids).await? {
        links_by_occupation
            .entry(link.link.occupation_id)
            .or_default()
            .push(link);
    }

    Ok(occupations
        .into_iter()
        .map(|occupation| {
            let room = rooms.remove(&occupation.room_id);
            let guests = links_by_occupation.remove(&occupation.id).unwrap_or_default();
            OccupationWithRelations {
                occupation,
                room,
                guests,
            }
        })
        .collect())
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &OccupationFilter) {
    if !filter.statuses.is_empty() {
        builder.push(" AND status = ANY(");
        builder.push_bind(filter.statuses.clone());
        builder.push(")");
    }
    if let Some(room_id) = filter.room_id {
        builder.push(" AND room_id = ");
        builder.push_bind(room_id);
    }
    if let Some(stay_type) = filter.stay_type.clone() {
        builder.push(" AND stay_type = ");
        builder.push_bind(stay_type);
    }
    if let Some(check_in_from) = filter.check_in_from {
        builder.push(" AND check_in_datetime >= ");
        builder.push_bind(check_in_from);
    }
    if let Some(check_in_to) = filter.check_in_to {
        builder.push(" AND check_in_datetime <= ");
        builder.push_bind(check_in_to);
    }
    if let Some(check_out_from) = filter.check_out_from {
        builder.push(" AND check_out_datetime >= ");
        builder.push_bind(check_out_from);
    }
    if let Some(check_out_to) = filter.check_out_to {
        builder.push(" AND check_out_datetime <= ");
        builder.push_bind(check_out_to);
    }
    if let Some(min_price) = filter.min_price {
        builder.push(" AND total_price >= ");
        builder.push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        builder.push(" AND total_price <= ");
        builder.push_bind(max_price);
    }

    builder.push(" ORDER BY ");
    builder.push(order_column(filter.order_by.as_deref()));
    builder.push(if filter.ascending { " ASC" } else { " DESC" });
}

/// Sort columns are whitelisted; anything unrecognized falls back to
/// creation time so caller input never reaches the SQL text.
fn order_column(requested: Option<&str>) -> &'static str {
    match requested {
        Some("checkInDatetime" | "check_in_datetime") => "check_in_datetime",
        Some("checkOutDatetime" | "check_out_datetime") => "check_out_datetime",
        Some("totalPrice" | "total_price") => "total_price",
        Some("numberOfGuests" | "number_of_guests") => "number_of_guests",
        Some("status") => "status",
        _ => "created_at",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_query_only_excludes_deleted() {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM occupations WHERE deleted_at IS NULL");
        push_filter(&mut builder, &OccupationFilter::default());
        let sql = builder.sql();

        assert!(!sql.contains("status = ANY"));
        assert!(!sql.contains("room_id"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn filter_conditions_appear_when_set() {
        let filter = OccupationFilter {
            statuses: vec!["reserved".to_string(), "checked_in".to_string()],
            room_id: Some(Uuid::new_v4()),
            min_price: Some(100.0),
            order_by: Some("checkInDatetime".to_string()),
            ascending: true,
            ..Default::default()
        };

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT * FROM occupations WHERE deleted_at IS NULL");
        push_filter(&mut builder, &filter);
        let sql = builder.sql();

        assert!(sql.contains("status = ANY($1)"));
        assert!(sql.contains("room_id = $2"));
        assert!(sql.contains("total_price >= $3"));
        assert!(sql.ends_with("ORDER BY check_in_datetime ASC"));
    }

    #[test]
    fn order_column_is_whitelisted() {
        assert_eq!(order_column(Some("totalPrice")), "total_price");
        assert_eq!(order_column(Some("status")), "status");
        assert_eq!(order_column(Some("id; DROP TABLE occupations")), "created_at");
        assert_eq!(order_column(None), "created_at");
    }
}
