use thiserror::Error;

/// Errors from database bootstrap and connection checks
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Cannot connect to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to create {object}: {source}")]
    Schema {
        object: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Query failed ({operation}): {source}")]
    Query {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, DbError>;
