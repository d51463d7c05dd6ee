//! Occupation (room stay) shapes and mappers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{formats::CommaSeparator, serde_as, StringWithSeparator};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::datetime::{flexible, flexible_option};
use crate::error::MappingError;
use crate::guest::GuestSummary;
use crate::room::{self, RoomSummary, RoomSummaryRecord};

/// Billing granularity of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StayType {
    Hourly,
    Nightly,
}

impl StayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StayType::Hourly => "hourly",
            StayType::Nightly => "nightly",
        }
    }
}

impl FromStr for StayType {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hourly" => Ok(StayType::Hourly),
            "nightly" => Ok(StayType::Nightly),
            other => Err(MappingError::UnexpectedValue {
                column: "stay_type",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle of an occupation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OccupationStatus {
    Reserved,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl OccupationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccupationStatus::Reserved => "reserved",
            OccupationStatus::CheckedIn => "checked_in",
            OccupationStatus::CheckedOut => "checked_out",
            OccupationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OccupationStatus {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reserved" => Ok(OccupationStatus::Reserved),
            "checked_in" => Ok(OccupationStatus::CheckedIn),
            "checked_out" => Ok(OccupationStatus::CheckedOut),
            "cancelled" => Ok(OccupationStatus::Cancelled),
            other => Err(MappingError::UnexpectedValue {
                column: "status",
                value: other.to_string(),
            }),
        }
    }
}

// ===== Wire shapes =====

/// An occupation as it travels over the API, optionally hydrated with its
/// room and guest links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Occupation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub check_in_datetime: DateTime<Utc>,
    pub check_out_datetime: DateTime<Utc>,
    pub stay_type: StayType,
    pub number_of_guests: i32,
    pub total_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    pub status: OccupationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<Vec<OccupationGuest>>,
}

/// A guest link on an occupation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupationGuest {
    pub id: Uuid,
    pub occupation_id: Uuid,
    pub guest_id: Uuid,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestSummary>,
}

/// Creation payload, deserialized from the validated data bag.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOccupationRequest {
    pub room_id: Uuid,
    #[serde(with = "flexible")]
    pub check_in_datetime: DateTime<Utc>,
    #[serde(with = "flexible")]
    pub check_out_datetime: DateTime<Utc>,
    pub stay_type: StayType,
    pub number_of_guests: i32,
    pub total_price: f64,
    pub base_price: Option<f64>,
    pub discount_amount: Option<f64>,
    pub status: Option<OccupationStatus>,
    pub notes: Option<String>,
    pub guests: Vec<CreateOccupationGuestRequest>,
}

/// One guest entry inside a creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOccupationGuestRequest {
    pub guest_id: Uuid,
    pub is_primary: bool,
}

/// Update payload: any subset of the creation fields.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOccupationRequest {
    pub room_id: Option<Uuid>,
    #[serde(default, with = "flexible_option")]
    pub check_in_datetime: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible_option")]
    pub check_out_datetime: Option<DateTime<Utc>>,
    pub stay_type: Option<StayType>,
    pub number_of_guests: Option<i32>,
    pub total_price: Option<f64>,
    pub base_price: Option<f64>,
    pub discount_amount: Option<f64>,
    pub status: Option<OccupationStatus>,
    pub notes: Option<String>,
}

/// Sort direction for occupation listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Query parameters accepted by the occupation listing endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupationListQuery {
    /// Comma-separated status filter.
    #[serde_as(as = "Option<StringWithSeparator::<CommaSeparator, String>>")]
    #[serde(default)]
    pub status: Option<Vec<String>>,
    pub room_id: Option<Uuid>,
    pub stay_type: Option<StayType>,
    #[serde(default, with = "flexible_option")]
    pub check_in_from: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible_option")]
    pub check_in_to: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible_option")]
    pub check_out_from: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible_option")]
    pub check_out_to: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
}

/// Listing filter in persistence vocabulary.
#[derive(Debug, Clone, Default)]
pub struct OccupationFilter {
    pub statuses: Vec<String>,
    pub room_id: Option<Uuid>,
    pub stay_type: Option<String>,
    pub check_in_from: Option<DateTime<Utc>>,
    pub check_in_to: Option<DateTime<Utc>>,
    pub check_out_from: Option<DateTime<Utc>>,
    pub check_out_to: Option<DateTime<Utc>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub order_by: Option<String>,
    pub ascending: bool,
}

impl From<OccupationListQuery> for OccupationFilter {
    fn from(query: OccupationListQuery) -> Self {
        OccupationFilter {
            statuses: query.status.unwrap_or_default(),
            room_id: query.room_id,
            stay_type: query.stay_type.map(|stay_type| stay_type.as_str().to_string()),
            check_in_from: query.check_in_from,
            check_in_to: query.check_in_to,
            check_out_from: query.check_out_from,
            check_out_to: query.check_out_to,
            min_price: query.min_price,
            max_price: query.max_price,
            order_by: query.order_by,
            ascending: matches!(query.order_direction, Some(OrderDirection::Asc)),
        }
    }
}

// ===== Persistence shapes =====

/// Row of the `occupations` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OccupationRecord {
    pub id: Uuid,
    pub room_id: Uuid,
    pub check_in_datetime: DateTime<Utc>,
    pub check_out_datetime: DateTime<Utc>,
    pub stay_type: String,
    pub number_of_guests: i32,
    pub total_price: f64,
    pub base_price: Option<f64>,
    pub discount_amount: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Row of the `occupation_guests` join table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OccupationGuestRecord {
    pub id: Uuid,
    pub occupation_id: Uuid,
    pub guest_id: Uuid,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// Join row plus the linked guest's name columns, when the listing query
/// joined them in.
#[derive(Debug, Clone, FromRow)]
pub struct LinkedGuestRecord {
    #[sqlx(flatten)]
    pub link: OccupationGuestRecord,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// An occupation row bundled with whatever related rows the query produced.
#[derive(Debug, Clone)]
pub struct OccupationWithRelations {
    pub occupation: OccupationRecord,
    pub room: Option<RoomSummaryRecord>,
    pub guests: Vec<LinkedGuestRecord>,
}

/// Column values for inserting a new occupation.
#[derive(Debug, Clone)]
pub struct NewOccupation {
    pub room_id: Uuid,
    pub check_in_datetime: DateTime<Utc>,
    pub check_out_datetime: DateTime<Utc>,
    pub stay_type: String,
    pub number_of_guests: i32,
    pub total_price: f64,
    pub base_price: Option<f64>,
    pub discount_amount: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub created_by: Uuid,
}

/// Column values for one guest-link insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOccupationGuest {
    pub occupation_id: Uuid,
    pub guest_id: Uuid,
    pub is_primary: bool,
}

/// Sparse column set for `UPDATE occupations SET …`: only `Some` fields are
/// written, so a partial payload stays partial all the way to the database.
#[derive(Debug, Clone, Default)]
pub struct OccupationChanges {
    pub room_id: Option<Uuid>,
    pub check_in_datetime: Option<DateTime<Utc>>,
    pub check_out_datetime: Option<DateTime<Utc>>,
    pub stay_type: Option<String>,
    pub number_of_guests: Option<i32>,
    pub total_price: Option<f64>,
    pub base_price: Option<f64>,
    pub discount_amount: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub updated_by: Uuid,
}

impl CreateOccupationRequest {
    /// Lowers the request to insert columns, stamping the creating
    /// principal. Status defaults to `reserved`.
    pub fn into_new(self, created_by: Uuid) -> NewOccupation {
        NewOccupation {
            room_id: self.room_id,
            check_in_datetime: self.check_in_datetime,
            check_out_datetime: self.check_out_datetime,
            stay_type: self.stay_type.as_str().to_string(),
            number_of_guests: self.number_of_guests,
            total_price: self.total_price,
            base_price: self.base_price,
            discount_amount: self.discount_amount,
            status: self
                .status
                .unwrap_or(OccupationStatus::Reserved)
                .as_str()
                .to_string(),
            notes: self.notes,
            created_by,
        }
    }
}

impl UpdateOccupationRequest {
    pub fn into_changes(self, updated_by: Uuid) -> OccupationChanges {
        OccupationChanges {
            room_id: self.room_id,
            check_in_datetime: self.check_in_datetime,
            check_out_datetime: self.check_out_datetime,
            stay_type: self.stay_type.map(|stay_type| stay_type.as_str().to_string()),
            number_of_guests: self.number_of_guests,
            total_price: self.total_price,
            base_price: self.base_price,
            discount_amount: self.discount_amount,
            status: self.status.map(|status| status.as_str().to_string()),
            notes: self.notes,
            updated_by,
        }
    }
}

// ===== Mappers =====

pub fn to_api(record: OccupationRecord) -> Result<Occupation, MappingError> {
    Ok(Occupation {
        id: record.id,
        room_id: record.room_id,
        check_in_datetime: record.check_in_datetime,
        check_out_datetime: record.check_out_datetime,
        stay_type: record.stay_type.parse()?,
        number_of_guests: record.number_of_guests,
        total_price: record.total_price,
        base_price: record.base_price,
        discount_amount: record.discount_amount,
        status: record.status.parse()?,
        notes: record.notes,
        created_by: record.created_by,
        updated_by: record.updated_by,
        created_at: record.created_at,
        updated_at: record.updated_at,
        deleted_at: record.deleted_at,
        room: None,
        guests: None,
    })
}

pub fn to_api_array(records: Vec<OccupationRecord>) -> Result<Vec<Occupation>, MappingError> {
    records.into_iter().map(to_api).collect()
}

/// Inverse of [`to_api`], dropping hydrated relations (they live in other
/// tables).
pub fn into_record(occupation: &Occupation) -> OccupationRecord {
    OccupationRecord {
        id: occupation.id,
        room_id: occupation.room_id,
        check_in_datetime: occupation.check_in_datetime,
        check_out_datetime: occupation.check_out_datetime,
        stay_type: occupation.stay_type.as_str().to_string(),
        number_of_guests: occupation.number_of_guests,
        total_price: occupation.total_price,
        base_price: occupation.base_price,
        discount_amount: occupation.discount_amount,
        status: occupation.status.as_str().to_string(),
        notes: occupation.notes.clone(),
        created_by: occupation.created_by,
        updated_by: occupation.updated_by,
        created_at: occupation.created_at,
        updated_at: occupation.updated_at,
        deleted_at: occupation.deleted_at,
    }
}

pub fn guest_to_api(record: OccupationGuestRecord) -> OccupationGuest {
    OccupationGuest {
        id: record.id,
        occupation_id: record.occupation_id,
        guest_id: record.guest_id,
        is_primary: record.is_primary,
        created_at: record.created_at,
        guest: None,
    }
}

pub fn guests_to_api_array(records: Vec<OccupationGuestRecord>) -> Vec<OccupationGuest> {
    records.into_iter().map(guest_to_api).collect()
}

fn linked_guest_to_api(row: LinkedGuestRecord) -> OccupationGuest {
    let guest = match (row.first_name, row.last_name) {
        (Some(first_name), Some(last_name)) => Some(GuestSummary {
            id: row.link.guest_id,
            first_name,
            last_name,
        }),
        _ => None,
    };
    OccupationGuest {
        guest,
        ..guest_to_api(row.link)
    }
}

/// Hydrating mapper: attaches the room summary and guest links when the
/// query carried them. A missing room join skips hydration rather than
/// failing the whole row.
pub fn with_relations_to_api(
    bundle: OccupationWithRelations,
) -> Result<Occupation, MappingError> {
    let mut occupation = to_api(bundle.occupation)?;
    if let Some(room_record) = bundle.room {
        occupation.room = Some(room::summary_to_api(room_record)?);
    }
    occupation.guests = Some(bundle.guests.into_iter().map(linked_guest_to_api).collect());
    Ok(occupation)
}

pub fn with_relations_to_api_array(
    bundles: Vec<OccupationWithRelations>,
) -> Result<Vec<Occupation>, MappingError> {
    bundles.into_iter().map(with_relations_to_api).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> OccupationRecord {
        OccupationRecord {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in_datetime: Utc.with_ymd_and_hms(2025, 3, 1, 14, 0, 0).unwrap(),
            check_out_datetime: Utc.with_ymd_and_hms(2025, 3, 2, 10, 0, 0).unwrap(),
            stay_type: "nightly".to_string(),
            number_of_guests: 2,
            total_price: 350_000.0,
            base_price: Some(400_000.0),
            discount_amount: Some(50_000.0),
            status: "reserved".to_string(),
            notes: Some("late arrival".to_string()),
            created_by: Some(Uuid::new_v4()),
            updated_by: None,
            created_at: Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap(),
            deleted_at: None,
        }
    }

    #[test]
    fn record_round_trips_through_api_shape() {
        let original = record();
        let api = to_api(original.clone()).unwrap();
        assert_eq!(into_record(&api), original);
    }

    #[test]
    fn api_shape_serializes_camel_case() {
        let api = to_api(record()).unwrap();
        let value = serde_json::to_value(&api).unwrap();

        assert!(value.get("roomId").is_some());
        assert!(value.get("checkInDatetime").is_some());
        assert_eq!(value["stayType"], "nightly");
        assert_eq!(value["status"], "reserved");
        // Unhydrated relations stay off the wire entirely.
        assert!(value.get("room").is_none());
        assert!(value.get("guests").is_none());
    }

    #[test]
    fn unknown_status_is_a_mapping_error() {
        let mut bad = record();
        bad.status = "double_booked".to_string();
        assert!(matches!(
            to_api(bad),
            Err(MappingError::UnexpectedValue { column: "status", .. })
        ));
    }

    #[test]
    fn create_request_lowers_with_default_status() {
        let request: CreateOccupationRequest = serde_json::from_value(serde_json::json!({
            "roomId": "0b0e9a4e-9d3a-4f6b-8a62-34c41d2d42a1",
            "checkInDatetime": "2025-03-01T14:00:00Z",
            "checkOutDatetime": "2025-03-02T10:00:00Z",
            "stayType": "nightly",
            "numberOfGuests": 2,
            "totalPrice": 350000,
            "guests": [{ "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": true }]
        }))
        .unwrap();

        let creator = Uuid::new_v4();
        let new = request.into_new(creator);

        assert_eq!(new.status, "reserved");
        assert_eq!(new.stay_type, "nightly");
        assert_eq!(new.created_by, creator);
        assert!(new.base_price.is_none());
    }

    #[test]
    fn sparse_update_stays_sparse() {
        let request: UpdateOccupationRequest = serde_json::from_value(serde_json::json!({
            "status": "checked_in",
            "notes": "early check-in"
        }))
        .unwrap();

        let updater = Uuid::new_v4();
        let changes = request.into_changes(updater);

        assert_eq!(changes.status.as_deref(), Some("checked_in"));
        assert_eq!(changes.notes.as_deref(), Some("early check-in"));
        assert!(changes.room_id.is_none());
        assert!(changes.check_in_datetime.is_none());
        assert!(changes.total_price.is_none());
        assert_eq!(changes.updated_by, updater);
    }

    #[test]
    fn hydration_skips_missing_room_join() {
        let bundle = OccupationWithRelations {
            occupation: record(),
            room: None,
            guests: vec![LinkedGuestRecord {
                link: OccupationGuestRecord {
                    id: Uuid::new_v4(),
                    occupation_id: Uuid::new_v4(),
                    guest_id: Uuid::new_v4(),
                    is_primary: true,
                    created_at: Utc.with_ymd_and_hms(2025, 2, 20, 9, 0, 0).unwrap(),
                },
                first_name: Some("Ana".to_string()),
                last_name: Some("Duarte".to_string()),
            }],
        };

        let api = with_relations_to_api(bundle).unwrap();

        assert!(api.room.is_none());
        let guests = api.guests.unwrap();
        assert_eq!(guests.len(), 1);
        assert!(guests[0].is_primary);
        assert_eq!(guests[0].guest.as_ref().unwrap().first_name, "Ana");
    }

    #[test]
    fn list_query_lowers_to_filter() {
        let query: OccupationListQuery = serde_json::from_value(serde_json::json!({
            "status": "reserved,checked_in",
            "stayType": "hourly",
            "orderBy": "checkInDatetime",
            "orderDirection": "asc"
        }))
        .unwrap();

        let filter = OccupationFilter::from(query);

        assert_eq!(filter.statuses, vec!["reserved", "checked_in"]);
        assert_eq!(filter.stay_type.as_deref(), Some("hourly"));
        assert!(filter.ascending);
        assert_eq!(filter.order_by.as_deref(), Some("checkInDatetime"));
    }
}
