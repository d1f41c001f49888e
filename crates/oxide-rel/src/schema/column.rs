//! Column definitions.

use crate::value::{SqlValue, ToSqlValue};

use super::SchemaOp;

/// Abstract column type, mapped to SQL by the dialect's
/// [`map_column_fn`](crate::Config::map_column_fn).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing integer primary key.
    Id,
    /// Auto-incrementing big integer primary key.
    BigId,
    /// Boolean.
    Bool,
    /// Small integer.
    SmallInt,
    /// Integer.
    Int,
    /// Big integer.
    BigInt,
    /// Floating point.
    Float,
    /// Fixed-point decimal.
    Decimal,
    /// Bounded string.
    String,
    /// Unbounded text.
    Text,
    /// JSON document.
    Json,
    /// Binary data.
    Binary,
    /// Date.
    Date,
    /// Date and time.
    DateTime,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// Dialect-specific type emitted as-is.
    Custom(String),
}

/// Column default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Literal value, rendered inline.
    Value(SqlValue),
    /// Raw SQL expression (e.g., `CURRENT_TIMESTAMP`).
    Expression(String),
}

impl DefaultValue {
    /// Text following `DEFAULT`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Value(value) => value.to_sql_inline(),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// A column definition or column change.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// What to do with the column.
    pub op: SchemaOp,
    /// Column name.
    pub name: String,
    /// New name, for renames.
    pub new_name: String,
    /// Column type.
    pub column_type: ColumnType,
    /// Size limit for string, binary and integer columns.
    pub limit: u32,
    /// Total digits for float and decimal columns.
    pub precision: u32,
    /// Digits after the decimal point.
    pub scale: u32,
    /// Unsigned integer.
    pub unsigned: bool,
    /// `NOT NULL`.
    pub required: bool,
    /// `UNIQUE`.
    pub unique: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Column comment.
    pub comment: String,
    /// Raw options appended to the definition.
    pub options: String,
}

impl Column {
    /// A new column of `column_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            op: SchemaOp::Create,
            name: name.into(),
            new_name: String::new(),
            column_type,
            limit: 0,
            precision: 0,
            scale: 0,
            unsigned: false,
            required: false,
            unique: false,
            default: None,
            comment: String::new(),
            options: String::new(),
        }
    }

    /// Changes the type or attributes of an existing column.
    #[must_use]
    pub fn alter(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            op: SchemaOp::Alter,
            ..Self::new(name, column_type)
        }
    }

    /// Renames an existing column.
    #[must_use]
    pub fn rename(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Rename,
            new_name: new_name.into(),
            ..Self::new(name, ColumnType::Custom(String::new()))
        }
    }

    /// Drops an existing column.
    #[must_use]
    pub fn drop(name: impl Into<String>) -> Self {
        Self {
            op: SchemaOp::Drop,
            ..Self::new(name, ColumnType::Custom(String::new()))
        }
    }

    /// Sets the size limit.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the precision.
    #[must_use]
    pub const fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Marks the column as unsigned.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets a literal default value.
    #[must_use]
    pub fn default(mut self, value: impl ToSqlValue) -> Self {
        self.default = Some(DefaultValue::Value(value.to_sql_value()));
        self
    }

    /// Sets a raw SQL expression as default.
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets raw options.
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}
