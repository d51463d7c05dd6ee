//! Guest shapes and mappers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::MappingError;

/// Identity document kinds accepted at the front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DocumentType {
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "National ID")]
    NationalId,
    #[serde(rename = "Identity Card")]
    IdentityCard,
    #[serde(rename = "Citizenship Card")]
    CitizenshipCard,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::NationalId => "National ID",
            DocumentType::IdentityCard => "Identity Card",
            DocumentType::CitizenshipCard => "Citizenship Card",
        }
    }
}

impl FromStr for DocumentType {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Passport" => Ok(DocumentType::Passport),
            "National ID" => Ok(DocumentType::NationalId),
            "Identity Card" => Ok(DocumentType::IdentityCard),
            "Citizenship Card" => Ok(DocumentType::CitizenshipCard),
            other => Err(MappingError::UnexpectedValue {
                column: "document_type",
                value: other.to_string(),
            }),
        }
    }
}

/// A guest as it travels over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    pub document_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub total_stays: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_stay_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The name-only embed attached to occupation guest links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Creation payload, deserialized from the validated data bag.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: String,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
}

/// Row of the `guests` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GuestRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type: Option<String>,
    pub document_number: String,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub special_requests: Option<String>,
    pub total_stays: i32,
    pub last_stay_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for inserting a new guest.
#[derive(Debug, Clone)]
pub struct NewGuest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_type: Option<String>,
    pub document_number: String,
    pub occupation: Option<String>,
    pub nationality: Option<String>,
}

impl CreateGuestRequest {
    pub fn into_new(self) -> NewGuest {
        NewGuest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            document_type: self
                .document_type
                .map(|document_type| document_type.as_str().to_string()),
            document_number: self.document_number,
            occupation: self.occupation,
            nationality: self.nationality,
        }
    }
}

pub fn to_api(record: GuestRecord) -> Result<Guest, MappingError> {
    Ok(Guest {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        email: record.email,
        phone: record.phone,
        document_type: record
            .document_type
            .as_deref()
            .map(DocumentType::from_str)
            .transpose()?,
        document_number: record.document_number,
        occupation: record.occupation,
        nationality: record.nationality,
        address: record.address,
        emergency_contact_name: record.emergency_contact_name,
        emergency_contact_phone: record.emergency_contact_phone,
        special_requests: record.special_requests,
        total_stays: record.total_stays,
        last_stay_date: record.last_stay_date,
        notes: record.notes,
        is_active: record.is_active,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

pub fn to_api_array(records: Vec<GuestRecord>) -> Result<Vec<Guest>, MappingError> {
    records.into_iter().map(to_api).collect()
}

/// Inverse of [`to_api`].
pub fn into_record(guest: &Guest) -> GuestRecord {
    GuestRecord {
        id: guest.id,
        first_name: guest.first_name.clone(),
        last_name: guest.last_name.clone(),
        email: guest.email.clone(),
        phone: guest.phone.clone(),
        document_type: guest
            .document_type
            .map(|document_type| document_type.as_str().to_string()),
        document_number: guest.document_number.clone(),
        occupation: guest.occupation.clone(),
        nationality: guest.nationality.clone(),
        address: guest.address.clone(),
        emergency_contact_name: guest.emergency_contact_name.clone(),
        emergency_contact_phone: guest.emergency_contact_phone.clone(),
        special_requests: guest.special_requests.clone(),
        total_stays: guest.total_stays,
        last_stay_date: guest.last_stay_date,
        notes: guest.notes.clone(),
        is_active: guest.is_active,
        created_at: guest.created_at,
        updated_at: guest.updated_at,
    }
}
