use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use model_response::ErrorDetails;
use regex::Regex;
use serde_json::{Map, Value};

use crate::rule::{FieldConfig, FieldType, ValidationRule};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    )
    .unwrap();
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();
    static ref UUID_REGEX: Regex = Regex::new(
        r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$"
    )
    .unwrap();
    static ref TIME_REGEX: Regex =
        Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$").unwrap();
}

/// Evaluates one [`FieldConfig`] against JSON payloads. Stateless: the same
/// instance can be shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    config: FieldConfig,
}

impl FieldValidator {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Full-mode validation: every configured field is checked, including
    /// required-presence for fields absent from the payload.
    pub fn validate(&self, data: &Map<String, Value>) -> Vec<ErrorDetails> {
        let mut errors = Vec::new();
        for (field, rule) in self.config.iter() {
            errors.extend(self.validate_field(field, data.get(field), rule));
        }
        errors
    }

    /// Validates a single value against a rule, in the fixed order:
    /// required-presence, then type (short-circuiting format checks on
    /// mismatch), then length/pattern/enum/range (all evaluated), then the
    /// custom check last. Absent optional fields produce no errors.
    pub fn validate_field(
        &self,
        field: &str,
        value: Option<&Value>,
        rule: &ValidationRule,
    ) -> Vec<ErrorDetails> {
        let mut errors = Vec::new();

        let Some(value) = value.filter(|v| !is_missing(v)) else {
            if rule.required {
                errors.push(ErrorDetails::new(field, format!("{field} is required")));
            }
            return errors;
        };

        if let Some(field_type) = rule.field_type {
            if let Some(message) = type_error(field, value, field_type) {
                errors.push(ErrorDetails::new(field, message));
                return errors;
            }
        }

        if let Some(text) = value.as_str() {
            let length = text.chars().count();
            if let Some(min_length) = rule.min_length {
                if length < min_length {
                    errors.push(ErrorDetails::new(
                        field,
                        format!("{field} must be at least {min_length} characters"),
                    ));
                }
            }
            if let Some(max_length) = rule.max_length {
                if length > max_length {
                    errors.push(ErrorDetails::new(
                        field,
                        format!("{field} must be at most {max_length} characters"),
                    ));
                }
            }
            if let Some(pattern) = &rule.pattern {
                if !pattern.is_match(text) {
                    errors.push(ErrorDetails::new(
                        field,
                        format!("{field} has invalid format"),
                    ));
                }
            }
        }

        if let Some(allowed) = &rule.one_of {
            if !allowed.contains(value) {
                let choices = allowed
                    .iter()
                    .map(|choice| match choice {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(ErrorDetails::new(
                    field,
                    format!("{field} must be one of: {choices}"),
                ));
            }
        }

        if let Some(number) = value.as_f64() {
            if let Some(min) = rule.min {
                if number < min {
                    errors.push(ErrorDetails::new(
                        field,
                        format!("{field} must be greater than or equal to {min}"),
                    ));
                }
            }
            if let Some(max) = rule.max {
                if number > max {
                    errors.push(ErrorDetails::new(
                        field,
                        format!("{field} must be less than or equal to {max}"),
                    ));
                }
            }
        }

        if let Some(custom) = &rule.custom {
            if let Some(message) = custom(value) {
                errors.push(ErrorDetails::new(field, message));
            }
        }

        errors
    }
}

/// Absent, null, and empty-string all count as "not provided".
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn type_error(field: &str, value: &Value, field_type: FieldType) -> Option<String> {
    let valid = match field_type {
        FieldType::String => value.is_string(),
        FieldType::Number => value.as_f64().is_some_and(|number| !number.is_nan()),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Email => check_string(value, |text| EMAIL_REGEX.is_match(text)),
        FieldType::Phone => check_string(value, |text| PHONE_REGEX.is_match(text)),
        FieldType::Date => check_string(value, |text| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        }),
        FieldType::DateTime => check_string(value, is_parseable_datetime),
        FieldType::Uuid => check_string(value, |text| UUID_REGEX.is_match(text)),
        FieldType::Time => check_string(value, |text| TIME_REGEX.is_match(text)),
    };

    if valid {
        return None;
    }

    let message = match field_type {
        FieldType::String => format!("{field} must be a string"),
        FieldType::Number => format!("{field} must be a number"),
        FieldType::Boolean => format!("{field} must be a boolean"),
        FieldType::Email => format!("{field} must be a valid email"),
        FieldType::Phone => format!("{field} must be a valid phone number"),
        FieldType::Date => format!("{field} must be a valid date"),
        FieldType::DateTime => format!("{field} must be a valid datetime"),
        FieldType::Uuid => format!("{field} must be a valid UUID"),
        FieldType::Time => format!("{field} must be in HH:mm:ss or HH:mm format"),
    };
    Some(message)
}

fn check_string(value: &Value, check: impl Fn(&str) -> bool) -> bool {
    value.as_str().is_some_and(check)
}

fn is_parseable_datetime(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}
