//! Schema definitions compiled by [`Builder::table`](crate::Builder::table)
//! and [`Builder::index`](crate::Builder::index).

mod column;
mod index;
mod table;

pub use column::{Column, ColumnType, DefaultValue};
pub use index::{ForeignKeyAction, Index, IndexOp, IndexType, Reference};
pub use table::Table;

/// What to do with a table or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaOp {
    /// Create (or add, inside `ALTER TABLE`).
    #[default]
    Create,
    /// Change in place.
    Alter,
    /// Rename.
    Rename,
    /// Drop.
    Drop,
}

/// One entry of a table statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// A column.
    Column(Column),
    /// A key or index.
    Index(Index),
    /// Raw SQL, emitted verbatim.
    Raw(String),
}
