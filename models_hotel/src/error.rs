use thiserror::Error;

/// Failures translating between persistence records and wire shapes.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A text column held a value outside the domain vocabulary.
    #[error("unexpected {column} value: {value}")]
    UnexpectedValue {
        column: &'static str,
        value: String,
    },

    /// A datetime string could not be parsed.
    #[error("invalid datetime: {0}")]
    InvalidDatetime(String),
}
