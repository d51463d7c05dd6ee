//! Database errors and their classification.

use thiserror::Error;

/// SQLSTATE for an exclusion-constraint violation, raised by the
/// room/period overlap constraint on `occupations`.
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors that can occur during hotel database operations.
#[derive(Debug, Error)]
pub enum HotelDatabaseError {
    /// The targeted row does not exist (or is already soft-deleted).
    #[error("row not found")]
    NotFound,

    /// A server-side uniqueness or overlap constraint rejected the write.
    #[error("conflicting write rejected by constraint {constraint}")]
    Conflict { constraint: String },

    /// Any other query failure.
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

/// Maps a raw sqlx error onto the structured kinds above. Constraint
/// violations are recognized from SQLSTATE, never from message text.
pub fn classify(err: sqlx::Error) -> HotelDatabaseError {
    match err {
        sqlx::Error::RowNotFound => HotelDatabaseError::NotFound,
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || is_conflict_code(db_err.code().as_deref()) =>
        {
            HotelDatabaseError::Conflict {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            }
        }
        other => HotelDatabaseError::Query(other),
    }
}

pub fn is_conflict_code(code: Option<&str>) -> bool {
    matches!(code, Some(EXCLUSION_VIOLATION) | Some(UNIQUE_VIOLATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_codes() {
        assert!(is_conflict_code(Some("23P01")));
        assert!(is_conflict_code(Some("23505")));
        assert!(!is_conflict_code(Some("23503"))); // foreign key
        assert!(!is_conflict_code(Some("40001"))); // serialization failure
        assert!(!is_conflict_code(None));
    }

    #[test]
    fn row_not_found_classifies_to_not_found() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            HotelDatabaseError::NotFound
        ));
    }

    #[test]
    fn other_errors_stay_queries() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            HotelDatabaseError::Query(_)
        ));
    }
}
