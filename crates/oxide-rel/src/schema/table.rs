//! Table definitions.

use super::{Column, ColumnType, Definition, Index, IndexOp, IndexType, SchemaOp};

/// A table statement: create, alter, rename or drop.
///
/// # Example
///
/// ```rust
/// use oxide_rel::{Builder, Column, ColumnType, Config, Table};
///
/// let table = Table::create("users")
///     .id("id")
///     .column(Column::new("email", ColumnType::String).required().unique())
///     .int("age");
///
/// let config = Config::postgres();
/// let sql = Builder::new(&config).table(&table);
/// assert_eq!(
///     sql,
///     "CREATE TABLE \"users\" (\"id\" SERIAL NOT NULL PRIMARY KEY, \
///      \"email\" VARCHAR(255) UNIQUE NOT NULL, \"age\" INT);"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// What to do with the table.
    pub op: SchemaOp,
    /// Table name.
    pub name: String,
    /// New name, for renames.
    pub new_name: String,
    /// Columns, keys and raw definitions.
    pub definitions: Vec<Definition>,
    /// `IF NOT EXISTS` on create, `IF EXISTS` on drop.
    pub optional: bool,
    /// Raw options appended after the definitions.
    pub options: String,
}

impl Table {
    fn with_op(op: SchemaOp, name: impl Into<String>) -> Self {
        Self {
            op,
            name: name.into(),
            new_name: String::new(),
            definitions: Vec::new(),
            optional: false,
            options: String::new(),
        }
    }

    /// `CREATE TABLE name`
    #[must_use]
    pub fn create(name: impl Into<String>) -> Self {
        Self::with_op(SchemaOp::Create, name)
    }

    /// `ALTER TABLE name`, one statement per definition.
    #[must_use]
    pub fn alter(name: impl Into<String>) -> Self {
        Self::with_op(SchemaOp::Alter, name)
    }

    /// `ALTER TABLE name RENAME TO new_name`
    #[must_use]
    pub fn rename(name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
            ..Self::with_op(SchemaOp::Rename, name)
        }
    }

    /// `DROP TABLE name`
    #[must_use]
    pub fn drop(name: impl Into<String>) -> Self {
        Self::with_op(SchemaOp::Drop, name)
    }

    /// Adds `IF NOT EXISTS` / `IF EXISTS`.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets raw table options, e.g. `ENGINE=InnoDB`.
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }

    /// Adds a column definition. Inside `alter` this emits `ADD COLUMN`.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.definitions.push(Definition::Column(column));
        self
    }

    /// Adds a key definition. Inside `alter` a created key emits `ADD <key>`.
    #[must_use]
    pub fn key(mut self, index: Index) -> Self {
        self.definitions.push(Definition::Index(index));
        self
    }

    /// Adds a raw definition, emitted verbatim.
    #[must_use]
    pub fn fragment(mut self, sql: impl Into<String>) -> Self {
        self.definitions.push(Definition::Raw(sql.into()));
        self
    }

    /// Adds an auto-incrementing primary key column.
    #[must_use]
    pub fn id(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Id))
    }

    /// Adds a big auto-incrementing primary key column.
    #[must_use]
    pub fn big_id(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::BigId))
    }

    /// Adds a boolean column.
    #[must_use]
    pub fn bool(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Bool))
    }

    /// Adds a small integer column.
    #[must_use]
    pub fn small_int(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::SmallInt))
    }

    /// Adds an integer column.
    #[must_use]
    pub fn int(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Int))
    }

    /// Adds a big integer column.
    #[must_use]
    pub fn big_int(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::BigInt))
    }

    /// Adds a float column.
    #[must_use]
    pub fn float(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Float))
    }

    /// Adds a decimal column.
    #[must_use]
    pub fn decimal(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Decimal))
    }

    /// Adds a string column.
    #[must_use]
    pub fn string(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::String))
    }

    /// Adds a text column.
    #[must_use]
    pub fn text(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Text))
    }

    /// Adds a JSON column.
    #[must_use]
    pub fn json(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Json))
    }

    /// Adds a binary column.
    #[must_use]
    pub fn binary(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Binary))
    }

    /// Adds a date column.
    #[must_use]
    pub fn date(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Date))
    }

    /// Adds a date-time column.
    #[must_use]
    pub fn datetime(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::DateTime))
    }

    /// Adds a time column.
    #[must_use]
    pub fn time(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Time))
    }

    /// Adds a timestamp column.
    #[must_use]
    pub fn timestamp(self, name: impl Into<String>) -> Self {
        self.column(Column::new(name, ColumnType::Timestamp))
    }

    /// Adds `PRIMARY KEY (columns)`.
    #[must_use]
    pub fn primary_key<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.key(Index::primary_key(columns))
    }

    /// Adds `UNIQUE (columns)`.
    #[must_use]
    pub fn unique<S: Into<String>>(self, columns: impl IntoIterator<Item = S>) -> Self {
        self.key(Index::unique(columns))
    }

    /// Adds `FOREIGN KEY (column) REFERENCES ref_table (ref_column)`.
    #[must_use]
    pub fn foreign_key(
        self,
        column: impl Into<String>,
        ref_table: impl Into<String>,
        ref_column: impl Into<String>,
    ) -> Self {
        self.key(Index::foreign_key(
            [column.into()],
            ref_table,
            [ref_column.into()],
        ))
    }

    /// Renames a column.
    #[must_use]
    pub fn rename_column(self, name: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.column(Column::rename(name, new_name))
    }

    /// Changes a column; `column` carries the new type and attributes.
    #[must_use]
    pub fn alter_column(self, column: Column) -> Self {
        self.column(Column {
            op: SchemaOp::Alter,
            ..column
        })
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(self, name: impl Into<String>) -> Self {
        self.column(Column::drop(name))
    }

    /// Renames an index.
    #[must_use]
    pub fn rename_index(self, name: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.key(Index {
            op: IndexOp::Rename,
            name: name.into(),
            new_name: new_name.into(),
            ..Index::default()
        })
    }

    /// Drops an index.
    #[must_use]
    pub fn drop_index(self, name: impl Into<String>) -> Self {
        self.drop_key(IndexType::Simple, name)
    }

    /// Drops a foreign key constraint.
    #[must_use]
    pub fn drop_foreign_key(self, name: impl Into<String>) -> Self {
        self.drop_key(IndexType::ForeignKey, name)
    }

    /// Drops the primary key.
    #[must_use]
    pub fn drop_primary_key(self) -> Self {
        self.drop_key(IndexType::PrimaryKey, "")
    }

    fn drop_key(self, index_type: IndexType, name: impl Into<String>) -> Self {
        self.key(Index {
            op: IndexOp::Drop,
            index_type,
            name: name.into(),
            ..Index::default()
        })
    }
}
