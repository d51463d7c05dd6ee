//! Staff user shapes, mappers, and the authenticated-principal adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::MappingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Receptionist,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Receptionist => "receptionist",
        }
    }
}

impl FromStr for UserRole {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(UserRole::Admin),
            "receptionist" => Ok(UserRole::Receptionist),
            other => Err(MappingError::UnexpectedValue {
                column: "role",
                value: other.to_string(),
            }),
        }
    }
}

/// The authenticated principal attached to every request by the auth
/// middleware. Deliberately exhaustive: handlers consume these two fields
/// and never reach into raw token claims.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub email: String,
}

/// A staff user as it travels over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload, deserialized from the validated data bag. The password
/// never reaches this service's tables; it is forwarded to the identity
/// provider that owns credentials.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Row of the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for inserting a new user profile row. The id comes from
/// the identity provider so both systems agree on the principal.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

pub fn to_api(record: UserRecord) -> Result<User, MappingError> {
    Ok(User {
        id: record.id,
        email: record.email,
        first_name: record.first_name,
        last_name: record.last_name,
        role: record.role.parse()?,
        is_active: record.is_active,
        last_login_at: record.last_login_at,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

pub fn to_api_array(records: Vec<UserRecord>) -> Result<Vec<User>, MappingError> {
    records.into_iter().map(to_api).collect()
}

/// Inverse of [`to_api`].
pub fn into_record(user: &User) -> UserRecord {
    UserRecord {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        role: user.role.as_str().to_string(),
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "front.desk@hotel.com".to_string(),
            first_name: "Luis".to_string(),
            last_name: "Benitez".to_string(),
            role: "receptionist".to_string(),
            is_active: true,
            last_login_at: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn record_round_trips_through_api_shape() {
        let original = record();
        let api = to_api(original.clone()).unwrap();
        assert_eq!(into_record(&api), original);
    }

    #[test]
    fn unknown_role_is_a_mapping_error() {
        let mut bad = record();
        bad.role = "owner".to_string();
        assert!(to_api(bad).is_err());
    }
}
