//! Per-entity validation rule sets.
//!
//! Built once in `main` and shared read-only through the API context, so a
//! test can hand a workflow an alternate rule set without touching globals.

use field_validator::{FieldConfig, FieldType, FieldValidator, ValidationRule};
use model_response::ErrorDetails;
use serde_json::{Map, Value};
use uuid::Uuid;

const NAME_PATTERN: &str = r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$";
const DOCUMENT_NUMBER_PATTERN: &str = "^[a-zA-Z0-9-]+$";

/// The validators the request handlers share.
#[derive(Debug)]
pub struct Validators {
    pub occupation: FieldValidator,
    pub guest: FieldValidator,
    pub user: FieldValidator,
}

impl Validators {
    pub fn new() -> Self {
        Self {
            occupation: FieldValidator::new(occupation_rules()),
            guest: FieldValidator::new(guest_rules()),
            user: FieldValidator::new(user_rules()),
        }
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::new()
    }
}

fn occupation_rules() -> FieldConfig {
    FieldConfig::new()
        .field(
            "roomId",
            ValidationRule::new().required().of_type(FieldType::Uuid),
        )
        .field(
            "checkInDatetime",
            ValidationRule::new().required().of_type(FieldType::DateTime),
        )
        .field(
            "checkOutDatetime",
            ValidationRule::new().required().of_type(FieldType::DateTime),
        )
        .field(
            "stayType",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .one_of(["hourly", "nightly"]),
        )
        .field(
            "numberOfGuests",
            ValidationRule::new()
                .required()
                .of_type(FieldType::Number)
                .min(1.0),
        )
        .field(
            "totalPrice",
            ValidationRule::new()
                .required()
                .of_type(FieldType::Number)
                .min(0.0),
        )
        .field(
            "basePrice",
            ValidationRule::new().of_type(FieldType::Number).min(0.0),
        )
        .field(
            "discountAmount",
            ValidationRule::new().of_type(FieldType::Number).min(0.0),
        )
        .field(
            "status",
            ValidationRule::new()
                .of_type(FieldType::String)
                .one_of(["reserved", "checked_in", "checked_out", "cancelled"]),
        )
        .field(
            "notes",
            ValidationRule::new().of_type(FieldType::String).max_length(1000),
        )
        .field("guests", ValidationRule::new().required().custom(guests_rule))
}

/// The guest-array invariant is enforced before any write is attempted:
/// a non-empty array of `{guestId, isPrimary}` objects with exactly one
/// primary guest.
fn guests_rule(value: &Value) -> Option<String> {
    let Some(guests) = value.as_array() else {
        return Some("guests must be an array".to_string());
    };

    if guests.is_empty() {
        return Some("guests array must contain at least one guest".to_string());
    }

    for (index, guest) in guests.iter().enumerate() {
        let Some(entry) = guest.as_object() else {
            return Some(format!("guests[{index}] must be an object"));
        };
        match entry.get("guestId").and_then(Value::as_str) {
            None => {
                return Some(format!(
                    "guests[{index}].guestId is required and must be a string"
                ))
            }
            Some(guest_id) if Uuid::parse_str(guest_id).is_err() => {
                return Some(format!("guests[{index}].guestId must be a valid UUID"))
            }
            Some(_) => {}
        }
        if !entry.get("isPrimary").is_some_and(Value::is_boolean) {
            return Some(format!("guests[{index}].isPrimary must be a boolean"));
        }
    }

    let primary_count = guests
        .iter()
        .filter(|guest| guest.get("isPrimary") == Some(&Value::Bool(true)))
        .count();

    if primary_count == 0 {
        return Some(
            "At least one guest must be marked as primary (isPrimary: true)".to_string(),
        );
    }
    if primary_count > 1 {
        return Some("Only one guest can be marked as primary (isPrimary: true)".to_string());
    }

    None
}

/// Cross-field rule the single-field engine cannot express: when both ends
/// of the stay window are present, check-out must come strictly after
/// check-in.
pub fn check_stay_window(data: &Map<String, Value>) -> Option<ErrorDetails> {
    let check_in = data
        .get("checkInDatetime")
        .and_then(Value::as_str)
        .and_then(|text| models_hotel::datetime::parse(text).ok())?;
    let check_out = data
        .get("checkOutDatetime")
        .and_then(Value::as_str)
        .and_then(|text| models_hotel::datetime::parse(text).ok())?;

    if check_out <= check_in {
        return Some(ErrorDetails::new(
            "checkOutDatetime",
            "checkOutDatetime must be after checkInDatetime",
        ));
    }
    None
}

fn guest_rules() -> FieldConfig {
    FieldConfig::new()
        .field(
            "firstName",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .min_length(2)
                .max_length(100)
                .pattern(NAME_PATTERN),
        )
        .field(
            "lastName",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .min_length(2)
                .max_length(100)
                .pattern(NAME_PATTERN),
        )
        .field(
            "email",
            ValidationRule::new().of_type(FieldType::Email).max_length(255),
        )
        .field(
            "phone",
            ValidationRule::new().of_type(FieldType::Phone).max_length(20),
        )
        .field(
            "documentType",
            ValidationRule::new().of_type(FieldType::String).one_of([
                "Passport",
                "National ID",
                "Identity Card",
                "Citizenship Card",
            ]),
        )
        .field(
            "documentNumber",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .max_length(50)
                .pattern(DOCUMENT_NUMBER_PATTERN),
        )
        .field(
            "occupation",
            ValidationRule::new().of_type(FieldType::String).max_length(100),
        )
        .field(
            "nationality",
            ValidationRule::new().of_type(FieldType::String).max_length(100),
        )
}

fn user_rules() -> FieldConfig {
    FieldConfig::new()
        .field(
            "email",
            ValidationRule::new()
                .required()
                .of_type(FieldType::Email)
                .max_length(255),
        )
        .field(
            "password",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .min_length(6)
                .max_length(128)
                .custom(password_strength),
        )
        .field(
            "firstName",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .min_length(2)
                .max_length(100),
        )
        .field(
            "lastName",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .min_length(2)
                .max_length(100),
        )
        .field(
            "role",
            ValidationRule::new()
                .required()
                .of_type(FieldType::String)
                .one_of(["admin", "receptionist"]),
        )
}

fn password_strength(value: &Value) -> Option<String> {
    let password = value.as_str()?;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        None
    } else {
        Some(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number"
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn occupation_payload(guests: Value) -> Map<String, Value> {
        json!({
            "roomId": "0b0e9a4e-9d3a-4f6b-8a62-34c41d2d42a1",
            "checkInDatetime": "2025-03-01T14:00:00Z",
            "checkOutDatetime": "2025-03-02T10:00:00Z",
            "stayType": "nightly",
            "numberOfGuests": 2,
            "totalPrice": 350000,
            "guests": guests,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn valid_reservation_payload_passes() {
        let validators = Validators::new();
        let payload = occupation_payload(json!([
            { "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": true },
            { "guestId": "9b6f3a7e-1f0c-4f0d-8a41-2f8a4f1f2d10", "isPrimary": false },
        ]));

        assert!(validators.occupation.validate(&payload).is_empty());
    }

    #[test]
    fn no_primary_guest_is_rejected() {
        let validators = Validators::new();
        let payload = occupation_payload(json!([
            { "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": false },
        ]));

        let errors = validators.occupation.validate(&payload);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "At least one guest must be marked as primary (isPrimary: true)"
        );
    }

    #[test]
    fn two_primary_guests_are_rejected() {
        let validators = Validators::new();
        let payload = occupation_payload(json!([
            { "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f", "isPrimary": true },
            { "guestId": "9b6f3a7e-1f0c-4f0d-8a41-2f8a4f1f2d10", "isPrimary": true },
        ]));

        let errors = validators.occupation.validate(&payload);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Only one guest can be marked as primary (isPrimary: true)"
        );
    }

    #[test]
    fn malformed_guest_entries_are_rejected() {
        let validators = Validators::new();

        let cases: Vec<(Value, &str)> = vec![
            (json!("two"), "guests must be an array"),
            (json!([]), "guests array must contain at least one guest"),
            (json!([42]), "guests[0] must be an object"),
            (
                json!([{ "isPrimary": true }]),
                "guests[0].guestId is required and must be a string",
            ),
            (
                json!([{ "guestId": "front-desk", "isPrimary": true }]),
                "guests[0].guestId must be a valid UUID",
            ),
            (
                json!([{ "guestId": "4e9430f3-5d3b-4b2c-9e05-7d5a3fc95c8f" }]),
                "guests[0].isPrimary must be a boolean",
            ),
        ];

        for (guests, expected) in cases {
            let errors = validators.occupation.validate(&occupation_payload(guests));
            assert_eq!(errors.len(), 1, "expected single error for {expected}");
            assert_eq!(errors[0].message, expected);
        }
    }

    #[test]
    fn stay_window_must_move_forward() {
        let payload = occupation_payload(json!([]));
        assert!(check_stay_window(&payload).is_none());

        let mut inverted = payload;
        inverted.insert(
            "checkOutDatetime".to_string(),
            json!("2025-03-01T10:00:00Z"),
        );
        let error = check_stay_window(&inverted).unwrap();
        assert_eq!(error.field.as_deref(), Some("checkOutDatetime"));
    }

    #[test]
    fn password_strength_requires_mixed_characters() {
        let validators = Validators::new();
        let weak = json!({
            "email": "staff@hotel.com",
            "password": "abcdef",
            "firstName": "Luis",
            "lastName": "Benitez",
            "role": "receptionist",
        });

        let errors = validators.user.validate(weak.as_object().unwrap());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("uppercase"));

        let strong = json!({
            "email": "staff@hotel.com",
            "password": "Abcdef1",
            "firstName": "Luis",
            "lastName": "Benitez",
            "role": "receptionist",
        });
        assert!(validators.user.validate(strong.as_object().unwrap()).is_empty());
    }
}
