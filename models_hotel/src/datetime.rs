//! Datetime parsing shared by the request shapes: accepts RFC 3339 or a
//! naive `YYYY-MM-DDTHH:MM:SS[.frac]` timestamp interpreted as UTC, matching
//! what the validation engine admits for `datetime` fields.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::MappingError;

pub fn parse(text: &str) -> Result<DateTime<Utc>, MappingError> {
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        })
        .map_err(|_| MappingError::InvalidDatetime(text.to_string()))
}

/// Serde adapter for required datetime fields.
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse(&text).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }
}

/// Serde adapter for optional datetime fields.
pub mod flexible_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        text.map(|text| super::parse(&text).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_some(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_and_naive() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 14, 0, 0).unwrap();
        assert_eq!(super::parse("2025-03-01T14:00:00Z").unwrap(), expected);
        assert_eq!(super::parse("2025-03-01T14:00:00").unwrap(), expected);
        assert_eq!(
            super::parse("2025-03-01T11:00:00-03:00").unwrap(),
            expected
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(super::parse("next tuesday").is_err());
        assert!(super::parse("2025-03-01").is_err());
    }
}
