//! Bind arguments and inline literals.
//!
//! Compiled statements never interpolate values: every argument travels next to
//! the SQL text as a [`SqlValue`]. Inline rendering exists only for DDL, where
//! `DEFAULT` clauses cannot be parameterized.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used for inline timestamp literals.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A statement argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    /// Date and time without timezone.
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Renders the value as a SQL literal, for `DEFAULT` clauses.
    ///
    /// Statements built by [`Builder`](crate::Builder) bind values as
    /// arguments and never call this.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => "NULL".to_owned(),
            Self::Bool(true) => "TRUE".to_owned(),
            Self::Bool(false) => "FALSE".to_owned(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => quote_literal(s),
            Self::Blob(bytes) => {
                let mut sql = String::with_capacity(bytes.len() * 2 + 3);
                sql.push_str("X'");
                for byte in bytes {
                    let _ = write!(sql, "{byte:02X}");
                }
                sql.push('\'');
                sql
            }
            Self::Timestamp(t) => quote_literal(&t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        if let Self::Int(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Wraps text in single quotes, doubling embedded quotes.
pub(crate) fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Conversion into a statement argument.
///
/// Filter, mutate and column-default constructors accept any `impl ToSqlValue`.
pub trait ToSqlValue {
    fn to_sql_value(self) -> SqlValue;
}

macro_rules! impl_to_sql_value {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(self)
                }
            }
        )+
    };
    ($variant:ident: $($ty:ty),+ => $convert:expr) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant($convert(self))
                }
            }
        )+
    };
}

impl_to_sql_value!(Bool: bool);
impl_to_sql_value!(Int: i64);
impl_to_sql_value!(Int: i32, i16, u32, u16, u8 => i64::from);
impl_to_sql_value!(Float: f64);
impl_to_sql_value!(Float: f32 => f64::from);
impl_to_sql_value!(Text: String);
impl_to_sql_value!(Text: &str => String::from);
impl_to_sql_value!(Blob: Vec<u8>);
impl_to_sql_value!(Blob: &[u8] => Vec::from);
impl_to_sql_value!(Timestamp: NaiveDateTime);

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}
