//! Error types for the MSSQL MCP Server.
//!
//! This module defines all error types using `thiserror`. The display text of
//! every variant is the bare message: tool responses prefix it with `Error: `,
//! so driver and server messages reach the caller unchanged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Required configuration (the connection string) is missing or unusable.
    #[error("{message}")]
    Configuration { message: String },

    /// Caller input rejected before any query was built.
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Database {
        message: String,
        /// SQL Server error number, e.g. 208 for an invalid object name
        code: Option<u32>,
    },

    #[error("{message}")]
    Connection { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a database error with an optional server error number.
    pub fn database(message: impl Into<String>, code: Option<u32>) -> Self {
        Self::Database {
            message: message.into(),
            code,
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short category name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Validation { .. } => "validation",
            Self::Database { .. } => "database",
            Self::Connection { .. } => "connection",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Convert tiberius errors to DbError.
impl From<tiberius::error::Error> for DbError {
    fn from(err: tiberius::error::Error) -> Self {
        match err {
            tiberius::error::Error::Server(token) => {
                DbError::database(token.message().to_string(), Some(token.code()))
            }
            tiberius::error::Error::Io { message, .. } => DbError::connection(message),
            other => DbError::database(other.to_string(), None),
        }
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::connection(err.to_string())
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
