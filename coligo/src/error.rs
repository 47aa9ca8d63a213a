//! Error types for coligo

use thiserror::Error;

use crate::Value;

/// Result type alias for coligo operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure an attribute access, record operation or query can raise.
#[derive(Debug, Error)]
pub enum Error {
    /// No accessor override, shadow property or field answers to this name
    #[error("{name} is not available in current scope")]
    AttributeNotFound { name: String },

    /// The primary-key field is missing, null or empty
    #[error("record ID not defined for table `{table}` (primary key `{primary_key}`)")]
    PrimaryKeyNotSet { table: String, primary_key: String },

    /// Retrieve matched zero rows
    #[error("no results found in `{table}` with record ID = {key}")]
    RecordNotFound { table: String, key: Value },

    /// Query executed without a FROM clause
    #[error("from clause not set; call `from()` before `execute()`")]
    QueryIncomplete,

    /// `or_where` called with nothing to combine against
    #[error("no where clause set; call `where` before `or_where`")]
    NoPriorWhereClause,

    /// Connection requested before the host initialised it
    #[error("database connection not set")]
    ConnectionNotInitialized,

    /// Driver error, passed through unmodified
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A parameter the driver cannot represent
    #[error("cannot bind parameter {index}: {message}")]
    Bind { index: usize, message: String },

    /// Row decode error
    #[error("decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Runtime start-up failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn attribute_not_found(name: impl Into<String>) -> Self {
        Self::AttributeNotFound { name: name.into() }
    }

    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a zero-row retrieve
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this is a dispatch miss
    pub fn is_attribute_not_found(&self) -> bool {
        matches!(self, Self::AttributeNotFound { .. })
    }

    /// Check if a result column had no supported decoding
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if the failure came from the driver
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
