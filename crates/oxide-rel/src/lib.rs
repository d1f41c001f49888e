//! # oxide-rel
//!
//! A dialect-aware query and DDL compiler for relational databases.
//!
//! This crate provides:
//! - A composable predicate AST with negation simplification
//! - A statement builder for `SELECT`, aggregates, inserts, updates and deletes
//! - DDL generation for tables, columns and indexes
//! - Primary key allocation for bulk inserts
//! - Mapping of driver errors into constraint errors
//!
//! It performs no I/O: values go in, `(statement, args)` pairs come out.
//!
//! ## Compiling a Query
//!
//! ```rust
//! use oxide_rel::{Builder, Config, Filter, Join, Query, SqlValue};
//!
//! let config = Config::mysql();
//! let query = Query::from("users")
//!     .select(["users.*"])
//!     .join(Join::join("teams"))
//!     .filter(Filter::eq("users.active", true).and(!Filter::nil("teams.name")))
//!     .sort_desc("users.id")
//!     .limit(20);
//!
//! let (sql, args) = Builder::new(&config).find(&query);
//! assert_eq!(
//!     sql,
//!     "SELECT `users`.* FROM `users` \
//!      JOIN `teams` ON `users`.`team_id`=`teams`.`id` \
//!      WHERE (`users`.`active`=? AND `teams`.`name` IS NOT NULL) \
//!      ORDER BY `users`.`id` DESC LIMIT 20;"
//! );
//! assert_eq!(args, vec![SqlValue::Bool(true)]);
//! ```
//!
//! ## Values Are Never Interpolated
//!
//! ```rust
//! use oxide_rel::{Builder, Config, Mutates};
//!
//! let config = Config::postgres();
//! let mutates = Mutates::new().set("name", "'; DROP TABLE users; --");
//! let (sql, args) = Builder::new(&config).returning("id").insert("users", &mutates);
//!
//! assert_eq!(sql, "INSERT INTO \"users\" (\"name\") VALUES ($1) RETURNING \"id\";");
//! assert_eq!(args.len(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod escape;
pub mod filter;
pub mod ids;
pub mod mutate;
pub mod query;
pub mod schema;
pub mod value;

pub use builder::Builder;
pub use config::{ColumnSpec, Config, Dialect};
pub use error::{ConstraintKind, DriverError, Error, Result};
pub use escape::Escaper;
pub use filter::Filter;
pub use ids::{allocate_ids, Session};
pub use mutate::{Mutate, Mutates};
pub use query::{Join, JoinType, Lock, Query, Sort, SortDirection};
pub use schema::{
    Column, ColumnType, Definition, ForeignKeyAction, Index, IndexOp, IndexType, SchemaOp, Table,
};
pub use value::{SqlValue, ToSqlValue};
