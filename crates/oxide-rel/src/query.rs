//! Query model compiled by [`Builder::find`](crate::Builder::find) and
//! [`Builder::aggregate`](crate::Builder::aggregate).

use crate::filter::Filter;
use crate::value::SqlValue;

/// A `SELECT` over one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Table to select from.
    pub table: String,
    /// Selected fields.
    pub select: Select,
    /// Join clauses, in order.
    pub joins: Vec<Join>,
    /// `WHERE` predicate.
    pub filter: Filter,
    /// `GROUP BY` and `HAVING`.
    pub group: Group,
    /// `ORDER BY` entries.
    pub sort: Vec<Sort>,
    /// Row limit.
    pub limit: Option<u64>,
    /// Row offset, only emitted together with a limit.
    pub offset: Option<u64>,
    /// Lock suffix such as `FOR UPDATE`.
    pub lock: Option<Lock>,
    /// Hand-written statement replacing everything else.
    pub raw: Option<Raw>,
}

impl Query {
    /// Starts a query on `table`.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// A query that compiles to `statement` verbatim.
    #[must_use]
    pub fn raw(statement: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            raw: Some(Raw {
                statement: statement.into(),
                args,
            }),
            ..Self::default()
        }
    }

    /// Selects `fields` instead of `*`.
    #[must_use]
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds `DISTINCT`.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.select.distinct = true;
        self
    }

    /// Appends a join clause.
    #[must_use]
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// ANDs `filter` into the `WHERE` predicate.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = std::mem::take(&mut self.filter).and(filter);
        self
    }

    /// Groups by `fields`.
    #[must_use]
    pub fn group<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.group.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// ANDs `filter` into the `HAVING` predicate.
    #[must_use]
    pub fn having(mut self, filter: Filter) -> Self {
        self.group.having = std::mem::take(&mut self.group.having).and(filter);
        self
    }

    /// Sorts ascending on `field`.
    #[must_use]
    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(Sort::asc(field));
        self
    }

    /// Sorts descending on `field`.
    #[must_use]
    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort.push(Sort::desc(field));
        self
    }

    /// Sets the row limit.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the row offset.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Appends a lock clause.
    #[must_use]
    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }
}

/// Select list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    /// Emits `SELECT DISTINCT`.
    pub distinct: bool,
    /// Selected fields; empty means `*`.
    pub fields: Vec<String>,
}

/// Group clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// `GROUP BY` fields; `HAVING` is only emitted when this is not empty.
    pub fields: Vec<String>,
    /// `HAVING` predicate.
    pub having: Filter,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An `ORDER BY` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    /// Field to sort on.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending on `field`.
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending on `field`.
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Row lock appended after the limit, e.g. `FOR UPDATE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lock(pub String);

impl Lock {
    /// Free-form lock clause.
    #[must_use]
    pub fn new(clause: impl Into<String>) -> Self {
        Self(clause.into())
    }

    /// `FOR UPDATE`
    #[must_use]
    pub fn for_update() -> Self {
        Self::new("FOR UPDATE")
    }
}

/// Hand-written statement and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    /// SQL text.
    pub statement: String,
    /// Bind arguments.
    pub args: Vec<SqlValue>,
}

/// Join mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// Plain `JOIN`.
    #[default]
    Join,
    /// `INNER JOIN`.
    Inner,
    /// `LEFT JOIN`.
    Left,
    /// `RIGHT JOIN`.
    Right,
    /// `FULL JOIN`.
    Full,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// A join clause.
///
/// Without explicit columns an `On` join is inferred as
/// `<table>.<join table minus trailing s>_id=<join table>.id`.
#[derive(Debug, Clone, PartialEq)]
pub enum Join {
    /// `<mode> <table> ON <from>=<to>`
    On {
        /// Join mode.
        mode: JoinType,
        /// Joined table.
        table: String,
        /// Column of the queried table.
        from: Option<String>,
        /// Column of the joined table.
        to: Option<String>,
        /// Arguments, placed before the `WHERE` arguments.
        args: Vec<SqlValue>,
    },
    /// Hand-written join text.
    Fragment {
        /// SQL text.
        expr: String,
        /// Bind arguments.
        args: Vec<SqlValue>,
    },
}

impl Join {
    /// Joins `table` with `mode` on `from=to`, inferring missing columns.
    #[must_use]
    pub fn with(
        mode: JoinType,
        table: impl Into<String>,
        from: Option<String>,
        to: Option<String>,
    ) -> Self {
        Self::On {
            mode,
            table: table.into(),
            from,
            to,
            args: Vec::new(),
        }
    }

    /// `JOIN table` with inferred columns.
    #[must_use]
    pub fn join(table: impl Into<String>) -> Self {
        Self::with(JoinType::Join, table, None, None)
    }

    /// `JOIN table ON from=to`
    #[must_use]
    pub fn join_on(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::with(JoinType::Join, table, Some(from.into()), Some(to.into()))
    }

    /// `INNER JOIN table` with inferred columns.
    #[must_use]
    pub fn inner(table: impl Into<String>) -> Self {
        Self::with(JoinType::Inner, table, None, None)
    }

    /// `INNER JOIN table ON from=to`
    #[must_use]
    pub fn inner_on(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::with(JoinType::Inner, table, Some(from.into()), Some(to.into()))
    }

    /// `LEFT JOIN table` with inferred columns.
    #[must_use]
    pub fn left(table: impl Into<String>) -> Self {
        Self::with(JoinType::Left, table, None, None)
    }

    /// `LEFT JOIN table ON from=to`
    #[must_use]
    pub fn left_on(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::with(JoinType::Left, table, Some(from.into()), Some(to.into()))
    }

    /// `RIGHT JOIN table` with inferred columns.
    #[must_use]
    pub fn right(table: impl Into<String>) -> Self {
        Self::with(JoinType::Right, table, None, None)
    }

    /// `RIGHT JOIN table ON from=to`
    #[must_use]
    pub fn right_on(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::with(JoinType::Right, table, Some(from.into()), Some(to.into()))
    }

    /// `FULL JOIN table` with inferred columns.
    #[must_use]
    pub fn full(table: impl Into<String>) -> Self {
        Self::with(JoinType::Full, table, None, None)
    }

    /// `FULL JOIN table ON from=to`
    #[must_use]
    pub fn full_on(
        table: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::with(JoinType::Full, table, Some(from.into()), Some(to.into()))
    }

    /// Hand-written join, e.g. `JOIN users ON users.id = ?`.
    #[must_use]
    pub fn fragment(expr: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self::Fragment {
            expr: expr.into(),
            args,
        }
    }

    /// Arguments contributed by this join.
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        match self {
            Self::On { args, .. } | Self::Fragment { args, .. } => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = Query::from("users")
            .select(["id", "name"])
            .distinct()
            .filter(Filter::eq("active", true))
            .filter(Filter::gt("age", 18))
            .sort_desc("created_at")
            .limit(10)
            .offset(20);

        assert_eq!(query.table, "users");
        assert!(query.select.distinct);
        assert_eq!(query.select.fields, vec!["id", "name"]);
        assert_eq!(
            query.filter,
            Filter::And(vec![Filter::eq("active", true), Filter::gt("age", 18)])
        );
        assert_eq!(query.sort, vec![Sort::desc("created_at")]);
        assert_eq!((query.limit, query.offset), (Some(10), Some(20)));
    }

    #[test]
    fn test_single_filter_is_not_wrapped() {
        let query = Query::from("users").filter(Filter::eq("id", 1));
        assert_eq!(query.filter, Filter::eq("id", 1));
    }

    #[test]
    fn test_join_constructors() {
        assert_eq!(
            Join::left_on("transactions", "users.id", "transactions.user_id"),
            Join::On {
                mode: JoinType::Left,
                table: String::from("transactions"),
                from: Some(String::from("users.id")),
                to: Some(String::from("transactions.user_id")),
                args: vec![],
            }
        );
        assert_eq!(JoinType::Full.as_str(), "FULL JOIN");
        assert!(Join::inner("users").args().is_empty());
    }

    #[test]
    fn test_keywords() {
        let sort = Sort::desc("id");
        let direction = sort.direction;
        assert_eq!(direction.as_str(), "DESC");
        assert_eq!(sort.direction.as_str(), "DESC");
        assert_eq!(SortDirection::default().as_str(), "ASC");
        assert_eq!(JoinType::default().as_str(), "JOIN");
    }

    #[test]
    fn test_lock() {
        assert_eq!(Lock::for_update(), Lock(String::from("FOR UPDATE")));
    }
}
