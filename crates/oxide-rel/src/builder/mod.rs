//! Statement compiler.
//!
//! A [`Builder`] compiles one statement. It borrows the dialect [`Config`] and
//! owns the placeholder counter, so ordinal placeholders keep counting across
//! every clause of the statement (`WHERE` then `HAVING`, `SET` then `WHERE`).
//!
//! # Example
//!
//! ```rust
//! use oxide_rel::{Builder, Config, Filter, Query};
//!
//! let config = Config::postgres();
//! let query = Query::from("users")
//!     .filter(Filter::eq("status", "active"))
//!     .limit(10);
//!
//! let (sql, args) = Builder::new(&config).find(&query);
//! assert_eq!(sql, "SELECT * FROM \"users\" WHERE \"status\"=$1 LIMIT 10;");
//! assert_eq!(args.len(), 1);
//! ```

mod ddl;
mod mutation;
mod query;

use std::sync::Arc;

use tracing::trace;

use crate::config::Config;
use crate::filter::Filter;
use crate::value::SqlValue;

/// Compiles queries, mutations and schema changes for one dialect.
///
/// Create one builder per statement; it is not meant to be reused.
#[derive(Debug)]
pub struct Builder<'a> {
    config: &'a Config,
    count: usize,
    returning: Option<String>,
}

impl<'a> Builder<'a> {
    /// Creates a builder for `config`.
    #[must_use]
    pub const fn new(config: &'a Config) -> Self {
        Self {
            config,
            count: 0,
            returning: None,
        }
    }

    /// Appends `RETURNING field` to inserts.
    #[must_use]
    pub fn returning(mut self, field: impl Into<String>) -> Self {
        self.returning = Some(field.into());
        self
    }

    /// Escapes an identifier with the dialect's quote.
    #[must_use]
    pub fn escape(&self, field: &str) -> Arc<str> {
        self.config
            .escaper
            .escape(&self.config.escape_char, field)
    }

    /// Compiles a predicate; a vacuous filter yields empty text.
    pub fn filter(&mut self, filter: &Filter) -> (String, Vec<SqlValue>) {
        let mut sql = String::new();
        let mut args = Vec::new();
        if !filter.is_vacuous() {
            self.write_filter(&mut sql, &mut args, filter);
        }
        (sql, args)
    }

    /// Next placeholder.
    fn ph(&mut self) -> String {
        if self.config.ordinal {
            self.count += 1;
            format!("{}{}", self.config.placeholder, self.count)
        } else {
            self.config.placeholder.clone()
        }
    }

    /// Writes ` <keyword> <filter>` unless the filter compiles to nothing.
    fn write_clause(
        &mut self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
        keyword: &str,
        filter: &Filter,
    ) {
        if filter.is_vacuous() {
            return;
        }
        sql.push(' ');
        sql.push_str(keyword);
        sql.push(' ');
        self.write_filter(sql, args, filter);
    }

    fn write_filter(&mut self, sql: &mut String, args: &mut Vec<SqlValue>, filter: &Filter) {
        match filter {
            Filter::And(inner) => self.write_group(sql, args, " AND ", inner),
            Filter::Or(inner) => self.write_group(sql, args, " OR ", inner),
            Filter::Not(inner) => {
                sql.push_str("NOT ");
                self.write_group(sql, args, " AND ", inner);
            }
            Filter::Eq(field, value) => self.write_comparison(sql, args, field, "=", value),
            Filter::Ne(field, value) => self.write_comparison(sql, args, field, "<>", value),
            Filter::Lt(field, value) => self.write_comparison(sql, args, field, "<", value),
            Filter::Lte(field, value) => self.write_comparison(sql, args, field, "<=", value),
            Filter::Gt(field, value) => self.write_comparison(sql, args, field, ">", value),
            Filter::Gte(field, value) => self.write_comparison(sql, args, field, ">=", value),
            Filter::Nil(field) => {
                sql.push_str(&self.escape(field));
                sql.push_str(" IS NULL");
            }
            Filter::NotNil(field) => {
                sql.push_str(&self.escape(field));
                sql.push_str(" IS NOT NULL");
            }
            Filter::In(field, values) => self.write_inclusion(sql, args, field, " IN (", values),
            Filter::Nin(field, values) => {
                self.write_inclusion(sql, args, field, " NOT IN (", values);
            }
            Filter::Like(field, pattern) => {
                self.write_like(sql, args, field, " LIKE ", pattern);
            }
            Filter::NotLike(field, pattern) => {
                self.write_like(sql, args, field, " NOT LIKE ", pattern);
            }
            Filter::Fragment(expr, values) => {
                sql.push_str(expr);
                args.extend(values.iter().cloned());
            }
        }
    }

    /// Joins inner filters with `op`, in parentheses only when there are
    /// several. Vacuous inner filters are skipped.
    fn write_group(
        &mut self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
        op: &str,
        inner: &[Filter],
    ) {
        let inner: Vec<&Filter> = inner.iter().filter(|f| !f.is_vacuous()).collect();
        let wrap = inner.len() > 1;

        if wrap {
            sql.push('(');
        }
        for (i, filter) in inner.into_iter().enumerate() {
            if i > 0 {
                sql.push_str(op);
            }
            self.write_filter(sql, args, filter);
        }
        if wrap {
            sql.push(')');
        }
    }

    fn write_comparison(
        &mut self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
        field: &str,
        op: &str,
        value: &SqlValue,
    ) {
        sql.push_str(&self.escape(field));
        sql.push_str(op);
        sql.push_str(&self.ph());
        args.push(value.clone());
    }

    fn write_inclusion(
        &mut self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
        field: &str,
        open: &str,
        values: &[SqlValue],
    ) {
        sql.push_str(&self.escape(field));
        sql.push_str(open);
        for i in 0..values.len() {
            if i > 0 {
                sql.push(',');
            }
            sql.push_str(&self.ph());
        }
        sql.push(')');
        args.extend(values.iter().cloned());
    }

    fn write_like(
        &mut self,
        sql: &mut String,
        args: &mut Vec<SqlValue>,
        field: &str,
        op: &str,
        pattern: &str,
    ) {
        sql.push_str(&self.escape(field));
        sql.push_str(op);
        sql.push_str(&self.ph());
        args.push(SqlValue::Text(pattern.to_owned()));
    }

    /// Writes escaped identifiers separated by `sep`.
    fn write_fields<S: AsRef<str>>(&self, sql: &mut String, fields: &[S], sep: &str) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                sql.push_str(sep);
            }
            sql.push_str(&self.escape(field.as_ref()));
        }
    }

    fn write_returning(&self, sql: &mut String) {
        if let Some(field) = &self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.escape(field));
        }
    }
}

/// Terminates and logs a compiled statement.
fn finish(kind: &str, mut sql: String, args: Vec<SqlValue>) -> (String, Vec<SqlValue>) {
    sql.push(';');
    trace!(kind, statement = %sql, args = args.len(), "Compiled statement");
    (sql, args)
}
