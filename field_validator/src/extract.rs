use model_response::ErrorDetails;
use serde_json::{Map, Value};

use crate::validator::FieldValidator;

/// Result of driving a validator over a whole payload. `data` only ever
/// contains fields that are declared in the validator's config and passed
/// their checks, so nothing unvalidated can travel onward to persistence.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub errors: Vec<ErrorDetails>,
    pub data: Map<String, Value>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Deserializes the trimmed data bag into a typed request.
    pub fn into_typed<T>(self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(Value::Object(self.data))
    }

    fn rejected(errors: Vec<ErrorDetails>) -> Self {
        Self {
            errors,
            data: Map::new(),
        }
    }

    fn non_object_payload() -> Self {
        Self::rejected(vec![ErrorDetails::payload(
            "request body must be a JSON object",
        )])
    }
}

/// Full-mode extraction for creation requests: every configured rule runs,
/// and on success the returned bag holds only the allow-listed fields that
/// are present in the payload.
pub fn validate_and_extract(
    payload: &Value,
    validator: &FieldValidator,
    allowed: &[&str],
) -> ValidationOutcome {
    let Some(data) = payload.as_object() else {
        return ValidationOutcome::non_object_payload();
    };

    let errors = validator.validate(data);
    if !errors.is_empty() {
        return ValidationOutcome::rejected(errors);
    }

    let mut extracted = Map::new();
    for &field in allowed {
        // The allow-list is intersected with the config so a typo in a
        // caller's list can never smuggle an unvalidated field through.
        if !validator.config().contains(field) {
            continue;
        }
        if let Some(value) = data.get(field) {
            if !value.is_null() {
                extracted.insert(field.to_string(), value.clone());
            }
        }
    }

    ValidationOutcome {
        errors: Vec::new(),
        data: extracted,
    }
}

impl FieldValidator {
    /// Partial-mode validation for updates: only fields present in the
    /// payload are checked (required-ness is waived for the rest), errors
    /// aggregate across all present fields, and the bag holds the present
    /// fields that validated. Deciding what an empty bag means is left to
    /// the caller.
    pub fn validate_partial(&self, payload: &Value) -> ValidationOutcome {
        let Some(data) = payload.as_object() else {
            return ValidationOutcome::non_object_payload();
        };

        let mut errors = Vec::new();
        let mut extracted = Map::new();

        for (field, value) in data {
            if value.is_null() || value.as_str().is_some_and(str::is_empty) {
                continue;
            }
            let Some(rule) = self.config().rule(field) else {
                continue;
            };

            let field_errors = self.validate_field(field, Some(value), rule);
            if field_errors.is_empty() {
                extracted.insert(field.clone(), value.clone());
            } else {
                errors.extend(field_errors);
            }
        }

        ValidationOutcome {
            errors,
            data: extracted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{FieldConfig, FieldType, ValidationRule};
    use serde_json::json;

    fn guest_validator() -> FieldValidator {
        FieldValidator::new(
            FieldConfig::new()
                .field(
                    "firstName",
                    ValidationRule::new()
                        .required()
                        .of_type(FieldType::String)
                        .min_length(2),
                )
                .field(
                    "lastName",
                    ValidationRule::new()
                        .required()
                        .of_type(FieldType::String)
                        .min_length(2),
                )
                .field("email", ValidationRule::new().of_type(FieldType::Email))
                .field(
                    "nationality",
                    ValidationRule::new().of_type(FieldType::String).max_length(100),
                ),
        )
    }

    #[test]
    fn full_mode_trims_to_allow_list() {
        let validator = guest_validator();
        let payload = json!({
            "firstName": "Ana",
            "lastName": "Duarte",
            "email": "ana@example.com",
            "nationality": "Paraguayan",
            "isAdmin": true,
        });

        let outcome =
            validate_and_extract(&payload, &validator, &["firstName", "lastName", "email"]);

        assert!(outcome.is_valid());
        assert_eq!(outcome.data.len(), 3);
        assert!(outcome.data.contains_key("firstName"));
        // Valid but not requested by the caller.
        assert!(!outcome.data.contains_key("nationality"));
        // Never configured, never extracted.
        assert!(!outcome.data.contains_key("isAdmin"));
    }

    #[test]
    fn full_mode_allow_list_cannot_escape_config() {
        let validator = guest_validator();
        let payload = json!({ "firstName": "Ana", "lastName": "Duarte", "isAdmin": true });

        let outcome = validate_and_extract(
            &payload,
            &validator,
            &["firstName", "lastName", "isAdmin"],
        );

        assert!(outcome.is_valid());
        assert!(!outcome.data.contains_key("isAdmin"));
    }

    #[test]
    fn full_mode_rejects_with_field_errors_and_empty_bag() {
        let validator = guest_validator();
        let payload = json!({ "firstName": "A", "email": "nope" });

        let outcome = validate_and_extract(&payload, &validator, &["firstName", "email"]);

        assert!(!outcome.is_valid());
        assert!(outcome.data.is_empty());
        let fields: Vec<_> = outcome
            .errors
            .iter()
            .filter_map(|e| e.field.as_deref())
            .collect();
        assert_eq!(fields, ["firstName", "lastName", "email"]);
    }

    #[test]
    fn non_object_payload_is_a_single_error() {
        let validator = guest_validator();
        let outcome = validate_and_extract(&json!([1, 2]), &validator, &["firstName"]);

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].field.is_none());
    }

    #[test]
    fn partial_mode_waives_required_for_absent_fields() {
        let validator = guest_validator();
        let outcome = validator.validate_partial(&json!({ "email": "ana@example.com" }));

        assert!(outcome.is_valid());
        assert_eq!(outcome.data.len(), 1);
        assert_eq!(outcome.data["email"], json!("ana@example.com"));
    }

    #[test]
    fn partial_mode_validates_present_fields() {
        let validator = guest_validator();
        let outcome =
            validator.validate_partial(&json!({ "firstName": "A", "email": "ana@example.com" }));

        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field.as_deref(), Some("firstName"));
        // The field that validated is still extracted.
        assert_eq!(outcome.data.len(), 1);
        assert!(outcome.data.contains_key("email"));
    }

    #[test]
    fn partial_mode_skips_unconfigured_and_null_fields() {
        let validator = guest_validator();
        let outcome = validator.validate_partial(&json!({
            "email": null,
            "nationality": "",
            "role": "admin",
        }));

        assert!(outcome.is_valid());
        assert!(outcome.data.is_empty());
    }

    #[test]
    fn partial_mode_is_idempotent() {
        let validator = guest_validator();
        let payload = json!({ "firstName": "Ana", "email": "broken", "nationality": "PY" });

        let first = validator.validate_partial(&payload);
        let second = validator.validate_partial(&payload);

        assert_eq!(first.errors, second.errors);
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn into_typed_deserializes_the_bag() {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct NewGuest {
            first_name: String,
            last_name: String,
            email: Option<String>,
        }

        let validator = guest_validator();
        let payload = json!({ "firstName": "Ana", "lastName": "Duarte" });
        let outcome =
            validate_and_extract(&payload, &validator, &["firstName", "lastName", "email"]);

        let guest: NewGuest = outcome.into_typed().unwrap();
        assert_eq!(guest.first_name, "Ana");
        assert_eq!(guest.last_name, "Duarte");
        assert!(guest.email.is_none());
    }
}
