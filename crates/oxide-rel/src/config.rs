//! Per-dialect compiler configuration.
//!
//! A [`Config`] is built once per adapter and shared by reference with every
//! [`Builder`](crate::Builder). Applications usually pick a preset from their
//! own settings:
//!
//! ```rust
//! use oxide_rel::{Config, Dialect};
//!
//! let dialect: Dialect = "postgresql".parse().unwrap();
//! let config = Config::for_dialect(dialect);
//! assert_eq!(config.placeholder, "$");
//! assert!(config.ordinal);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{self, DriverError, Error, Result};
use crate::escape::Escaper;
use crate::ids::{self, Session};
use crate::schema::{Column, ColumnType};

/// Maps a driver error into a crate error.
pub type ErrorFn = fn(DriverError) -> Error;

/// Resolves the bulk insert id step for a session.
pub type IncrementFn = fn(&dyn Session) -> Result<i64>;

/// Maps a column to its SQL type and size.
pub type MapColumnFn = fn(&Column) -> ColumnSpec;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL and MariaDB.
    MySql,
    /// PostgreSQL.
    #[serde(alias = "postgresql")]
    Postgres,
    /// SQLite.
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(Error::UnknownDialect(s.to_owned())),
        }
    }
}

/// SQL type of a column as rendered in DDL: `sql_type[(m[,n])][ UNSIGNED]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Type name.
    pub sql_type: String,
    /// First size argument; omitted when zero.
    pub m: u32,
    /// Second size argument; omitted when zero.
    pub n: u32,
    /// Emits `UNSIGNED`.
    pub unsigned: bool,
}

impl ColumnSpec {
    fn new(sql_type: impl Into<String>, m: u32, n: u32) -> Self {
        Self {
            sql_type: sql_type.into(),
            m,
            n,
            unsigned: false,
        }
    }
}

/// Compiler settings for one dialect.
#[derive(Debug, Clone)]
pub struct Config {
    /// Placeholder text, `?` or `$`.
    pub placeholder: String,
    /// Appends a running number to each placeholder (`$1`, `$2`, ...).
    pub ordinal: bool,
    /// Identifier quote; empty disables escaping.
    pub escape_char: String,
    /// Emits `DEFAULT VALUES` for inserts without columns.
    pub insert_default_values: bool,
    /// Dialect, for the DDL clauses that differ.
    pub dialect: Dialect,
    /// Driver error mapping.
    pub error_fn: ErrorFn,
    /// Bulk insert id step; `None` means `1`.
    pub increment_fn: Option<IncrementFn>,
    /// Column type mapping.
    pub map_column_fn: MapColumnFn,
    /// Identifier cache.
    pub escaper: Arc<Escaper>,
}

impl Config {
    /// MySQL: `?` placeholders, backtick quoting, step from the server.
    #[must_use]
    pub fn mysql() -> Self {
        Self {
            placeholder: String::from("?"),
            ordinal: false,
            escape_char: String::from("`"),
            insert_default_values: false,
            dialect: Dialect::MySql,
            error_fn: error::mysql_error,
            increment_fn: Some(ids::mysql_increment),
            map_column_fn: mysql_column,
            escaper: Arc::default(),
        }
    }

    /// PostgreSQL: `$n` placeholders, double-quote quoting, `DEFAULT VALUES`.
    ///
    /// Generated keys are read back with `RETURNING` instead of a step.
    #[must_use]
    pub fn postgres() -> Self {
        Self {
            placeholder: String::from("$"),
            ordinal: true,
            escape_char: String::from("\""),
            insert_default_values: true,
            dialect: Dialect::Postgres,
            error_fn: error::postgres_error,
            increment_fn: None,
            map_column_fn: postgres_column,
            escaper: Arc::default(),
        }
    }

    /// SQLite: `?` placeholders, backtick quoting, `DEFAULT VALUES`, step `-1`.
    #[must_use]
    pub fn sqlite() -> Self {
        Self {
            placeholder: String::from("?"),
            ordinal: false,
            escape_char: String::from("`"),
            insert_default_values: true,
            dialect: Dialect::Sqlite,
            error_fn: error::sqlite_error,
            increment_fn: Some(ids::sqlite_increment),
            map_column_fn: sqlite_column,
            escaper: Arc::default(),
        }
    }

    /// Preset for `dialect`.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::MySql => Self::mysql(),
            Dialect::Postgres => Self::postgres(),
            Dialect::Sqlite => Self::sqlite(),
        }
    }

    /// Shares `escaper` with other configs.
    #[must_use]
    pub fn with_escaper(mut self, escaper: Arc<Escaper>) -> Self {
        self.escaper = escaper;
        self
    }

    /// Overrides the placeholder and numbering.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>, ordinal: bool) -> Self {
        self.placeholder = placeholder.into();
        self.ordinal = ordinal;
        self
    }

    /// Overrides the identifier quote.
    #[must_use]
    pub fn with_escape_char(mut self, escape_char: impl Into<String>) -> Self {
        self.escape_char = escape_char.into();
        self
    }

    /// Overrides `DEFAULT VALUES` support.
    #[must_use]
    pub const fn with_insert_default_values(mut self, enabled: bool) -> Self {
        self.insert_default_values = enabled;
        self
    }

    /// Overrides the driver error mapping.
    #[must_use]
    pub fn with_error_fn(mut self, error_fn: ErrorFn) -> Self {
        self.error_fn = error_fn;
        self
    }

    /// Overrides the bulk insert id step.
    #[must_use]
    pub fn with_increment_fn(mut self, increment_fn: Option<IncrementFn>) -> Self {
        self.increment_fn = increment_fn;
        self
    }

    /// Overrides the column type mapping.
    #[must_use]
    pub fn with_map_column_fn(mut self, map_column_fn: MapColumnFn) -> Self {
        self.map_column_fn = map_column_fn;
        self
    }

    /// Maps a driver error through `error_fn`.
    #[must_use]
    pub fn map_error(&self, err: DriverError) -> Error {
        (self.error_fn)(err)
    }

    /// Bulk insert id step for `session`; `1` without an `increment_fn`.
    ///
    /// # Errors
    ///
    /// Propagates the error of `increment_fn`.
    pub fn increment(&self, session: &dyn Session) -> Result<i64> {
        self.increment_fn.map_or(Ok(1), |increment| increment(session))
    }

    /// Maps a column through `map_column_fn`.
    #[must_use]
    pub fn map_column(&self, column: &Column) -> ColumnSpec {
        (self.map_column_fn)(column)
    }
}

/// Column mapping shared by MySQL and the other presets.
#[must_use]
pub fn mysql_column(column: &Column) -> ColumnSpec {
    let mut spec = match &column.column_type {
        ColumnType::Id => ColumnSpec::new("INT UNSIGNED AUTO_INCREMENT PRIMARY KEY", 0, 0),
        ColumnType::BigId => ColumnSpec::new("BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY", 0, 0),
        ColumnType::Bool => ColumnSpec::new("BOOL", 0, 0),
        ColumnType::SmallInt => ColumnSpec::new("SMALLINT", column.limit, 0),
        ColumnType::Int => ColumnSpec::new("INT", column.limit, 0),
        ColumnType::BigInt => ColumnSpec::new("BIGINT", column.limit, 0),
        ColumnType::Float => ColumnSpec::new("FLOAT", column.precision, 0),
        ColumnType::Decimal => ColumnSpec::new("DECIMAL", column.precision, column.scale),
        ColumnType::String => {
            let limit = if column.limit == 0 { 255 } else { column.limit };
            ColumnSpec::new("VARCHAR", limit, 0)
        }
        ColumnType::Text => ColumnSpec::new("TEXT", column.limit, 0),
        ColumnType::Json => ColumnSpec::new("JSON", 0, 0),
        ColumnType::Binary => ColumnSpec::new("BINARY", column.limit, 0),
        ColumnType::Date => ColumnSpec::new("DATE", 0, 0),
        ColumnType::DateTime => ColumnSpec::new("DATETIME", 0, 0),
        ColumnType::Time => ColumnSpec::new("TIME", 0, 0),
        ColumnType::Timestamp => ColumnSpec::new("TIMESTAMP", 0, 0),
        ColumnType::Custom(sql_type) => ColumnSpec::new(sql_type.as_str(), 0, 0),
    };
    // Id types spell out UNSIGNED before AUTO_INCREMENT.
    spec.unsigned =
        column.unsigned && !matches!(column.column_type, ColumnType::Id | ColumnType::BigId);
    spec
}

/// PostgreSQL column mapping: serial keys, `TIMESTAMPTZ`, no unsigned.
#[must_use]
pub fn postgres_column(column: &Column) -> ColumnSpec {
    let mut spec = match column.column_type {
        ColumnType::Id => ColumnSpec::new("SERIAL NOT NULL PRIMARY KEY", 0, 0),
        ColumnType::BigId => ColumnSpec::new("BIGSERIAL NOT NULL PRIMARY KEY", 0, 0),
        ColumnType::DateTime => ColumnSpec::new("TIMESTAMPTZ", 0, 0),
        ColumnType::Binary => ColumnSpec::new("BYTEA", 0, 0),
        ColumnType::SmallInt | ColumnType::Int | ColumnType::BigInt | ColumnType::Text => {
            ColumnSpec {
                m: 0,
                ..mysql_column(column)
            }
        }
        _ => mysql_column(column),
    };
    spec.unsigned = false;
    spec
}

/// SQLite column mapping: `INTEGER PRIMARY KEY AUTOINCREMENT` keys.
#[must_use]
pub fn sqlite_column(column: &Column) -> ColumnSpec {
    match column.column_type {
        ColumnType::Id | ColumnType::BigId => {
            ColumnSpec::new("INTEGER PRIMARY KEY AUTOINCREMENT", 0, 0)
        }
        _ => mysql_column(column),
    }
}
