//! Error types and driver error mapping.
//!
//! The compiler itself never fails. Errors come from the driver layer, which
//! hands a [`DriverError`] to the dialect's [`error_fn`](crate::Config::error_fn)
//! to turn constraint violations into [`Error::Constraint`].

use std::fmt;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A statement violated a table constraint.
    #[error("{kind} constraint '{key}' violated")]
    Constraint {
        /// Kind of constraint.
        kind: ConstraintKind,
        /// Constraint or index name reported by the database.
        key: String,
        /// Original driver error.
        source: DriverError,
    },

    /// Any other driver error.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// The server reported an increment that is not an integer.
    #[error("Invalid auto increment value: {0}")]
    InvalidIncrement(String),

    /// The ids of a bulk insert do not fit in an `i64`.
    #[error("Primary key overflow allocating {rows} ids from {last_id} by {inc}")]
    IdOverflow {
        /// Id reported by the driver.
        last_id: i64,
        /// Dialect increment.
        inc: i64,
        /// Rows in the batch.
        rows: usize,
    },

    /// A dialect name that no preset matches.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Kind of a violated constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Unique or primary key constraint.
    Unique,
    /// Foreign key constraint.
    ForeignKey,
    /// Check constraint.
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
        })
    }
}

/// Error as reported by a database driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DriverError {
    /// Vendor error code, when the driver exposes one.
    pub code: Option<i64>,
    /// Error message.
    pub message: String,
}

impl DriverError {
    /// Creates an error without a code.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Creates an error with a vendor code.
    #[must_use]
    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    fn constraint(self, kind: ConstraintKind, key: &str) -> Error {
        Error::Constraint {
            kind,
            key: key.to_owned(),
            source: self,
        }
    }
}

/// Returns the text between the first `left` and the following `right`.
///
/// Returns `s` unchanged when `left` does not occur, and everything after
/// `left` when `right` does not follow it.
#[must_use]
pub fn extract_string<'a>(s: &'a str, left: &str, right: &str) -> &'a str {
    match s.split_once(left) {
        Some((_, rest)) => rest.split(right).next().unwrap_or(rest),
        None => s,
    }
}

/// Maps PostgreSQL `violates ... constraint "<key>"` messages.
#[must_use]
pub fn postgres_error(err: DriverError) -> Error {
    let kind = match extract_string(&err.message, "violates ", " constraint") {
        "unique" => ConstraintKind::Unique,
        "foreign key" => ConstraintKind::ForeignKey,
        "check" => ConstraintKind::Check,
        _ => return Error::Driver(err),
    };
    let key = extract_string(&err.message, "constraint \"", "\"").to_owned();
    err.constraint(kind, &key)
}

/// Maps MySQL errors 1062 (duplicate entry) and 1452 (foreign key).
#[must_use]
pub fn mysql_error(err: DriverError) -> Error {
    let code = err.code.or_else(|| {
        err.message
            .split(':')
            .next()
            .and_then(|head| head.strip_prefix("Error "))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse().ok())
    });

    match code {
        Some(1062) => {
            let key = extract_string(&err.message, "key '", "'").to_owned();
            err.constraint(ConstraintKind::Unique, &key)
        }
        Some(1452) => {
            let key = extract_string(&err.message, "CONSTRAINT `", "`").to_owned();
            err.constraint(ConstraintKind::ForeignKey, &key)
        }
        _ => Error::Driver(err),
    }
}

/// SQLite extended result code for a unique constraint.
pub const SQLITE_CONSTRAINT_UNIQUE: i64 = 2067;
/// SQLite extended result code for a primary key constraint.
pub const SQLITE_CONSTRAINT_PRIMARYKEY: i64 = 1555;
/// SQLite extended result code for a check constraint.
pub const SQLITE_CONSTRAINT_CHECK: i64 = 275;

/// Maps SQLite extended constraint codes; the key follows `failed: `.
#[must_use]
pub fn sqlite_error(err: DriverError) -> Error {
    let kind = match err.code {
        Some(SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY) => ConstraintKind::Unique,
        Some(SQLITE_CONSTRAINT_CHECK) => ConstraintKind::Check,
        _ => return Error::Driver(err),
    };
    let key = err
        .message
        .split_once("failed: ")
        .map_or(err.message.as_str(), |(_, key)| key)
        .to_owned();
    err.constraint(kind, &key)
}
