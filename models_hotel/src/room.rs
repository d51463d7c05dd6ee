//! Room shapes and mappers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::MappingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Familiar,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Familiar => "familiar",
        }
    }
}

impl FromStr for RoomType {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(RoomType::Single),
            "double" => Ok(RoomType::Double),
            "familiar" => Ok(RoomType::Familiar),
            other => Err(MappingError::UnexpectedValue {
                column: "room_type",
                value: other.to_string(),
            }),
        }
    }
}

/// A room as it travels over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub floor: i32,
    pub capacity: i32,
    pub price_per_night: f64,
    pub price_per_hour: f64,
    pub extra_person_charge_per_night: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The short embed attached to hydrated occupations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
}

/// Row of the `rooms` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RoomRecord {
    pub id: Uuid,
    pub room_number: String,
    pub room_type: String,
    pub floor: i32,
    pub capacity: i32,
    pub price_per_night: f64,
    pub price_per_hour: f64,
    pub extra_person_charge_per_night: f64,
    pub status: String,
    pub description: Option<String>,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// The joined columns a hydrating occupation query selects from `rooms`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RoomSummaryRecord {
    pub id: Uuid,
    pub room_number: String,
    pub room_type: String,
}

pub fn to_api(record: RoomRecord) -> Result<Room, MappingError> {
    Ok(Room {
        id: record.id,
        room_number: record.room_number,
        room_type: record.room_type.parse()?,
        floor: record.floor,
        capacity: record.capacity,
        price_per_night: record.price_per_night,
        price_per_hour: record.price_per_hour,
        extra_person_charge_per_night: record.extra_person_charge_per_night,
        status: record.status,
        description: record.description,
        amenities: record.amenities,
        created_at: record.created_at,
        updated_at: record.updated_at,
        deleted_at: record.deleted_at,
    })
}

pub fn to_api_array(records: Vec<RoomRecord>) -> Result<Vec<Room>, MappingError> {
    records.into_iter().map(to_api).collect()
}

pub fn summary_to_api(record: RoomSummaryRecord) -> Result<RoomSummary, MappingError> {
    Ok(RoomSummary {
        id: record.id,
        room_number: record.room_number,
        room_type: record.room_type.parse()?,
    })
}

/// Inverse of [`to_api`].
pub fn into_record(room: &Room) -> RoomRecord {
    RoomRecord {
        id: room.id,
        room_number: room.room_number.clone(),
        room_type: room.room_type.as_str().to_string(),
        floor: room.floor,
        capacity: room.capacity,
        price_per_night: room.price_per_night,
        price_per_hour: room.price_per_hour,
        extra_person_charge_per_night: room.extra_person_charge_per_night,
        status: room.status.clone(),
        description: room.description.clone(),
        amenities: room.amenities.clone(),
        created_at: room.created_at,
        updated_at: room.updated_at,
        deleted_at: room.deleted_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> RoomRecord {
        RoomRecord {
            id: Uuid::new_v4(),
            room_number: "204".to_string(),
            room_type: "double".to_string(),
            floor: 2,
            capacity: 3,
            price_per_night: 280_000.0,
            price_per_hour: 60_000.0,
            extra_person_charge_per_night: 40_000.0,
            status: "available".to_string(),
            description: Some("Street-facing double".to_string()),
            amenities: vec!["wifi".to_string(), "air_conditioning".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
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
    fn unknown_room_type_is_a_mapping_error() {
        let mut bad = record();
        bad.room_type = "penthouse".to_string();
        assert!(to_api(bad).is_err());
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = summary_to_api(RoomSummaryRecord {
            id: Uuid::new_v4(),
            room_number: "204".to_string(),
            room_type: "double".to_string(),
        })
        .unwrap();
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["roomNumber"], "204");
        assert_eq!(value["roomType"], "double");
    }
}
