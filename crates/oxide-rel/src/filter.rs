//! Predicate AST.
//!
//! A [`Filter`] is a closed tree: `And`, `Or` and `Not` carry inner filters,
//! every other variant is a leaf naming a field. The tree is compiled into a
//! `WHERE`/`HAVING` clause by [`Builder::filter`](crate::Builder::filter).
//!
//! # Example
//!
//! ```rust
//! use oxide_rel::Filter;
//!
//! let filter = Filter::eq("status", "active")
//!     .and(Filter::gte("age", 18))
//!     .or(Filter::nil("deleted_at"));
//!
//! assert!(!filter.is_none());
//! assert_eq!(!Filter::lt("age", 18), Filter::gte("age", 18));
//! ```

use std::ops;

use crate::value::{SqlValue, ToSqlValue};

/// A boolean predicate over table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All inner filters hold.
    And(Vec<Filter>),
    /// Any inner filter holds.
    Or(Vec<Filter>),
    /// The conjunction of the inner filters does not hold.
    Not(Vec<Filter>),
    /// `field = value`
    Eq(String, SqlValue),
    /// `field <> value`
    Ne(String, SqlValue),
    /// `field < value`
    Lt(String, SqlValue),
    /// `field <= value`
    Lte(String, SqlValue),
    /// `field > value`
    Gt(String, SqlValue),
    /// `field >= value`
    Gte(String, SqlValue),
    /// `field IS NULL`
    Nil(String),
    /// `field IS NOT NULL`
    NotNil(String),
    /// `field IN (values)`
    In(String, Vec<SqlValue>),
    /// `field NOT IN (values)`
    Nin(String, Vec<SqlValue>),
    /// `field LIKE pattern`
    Like(String, String),
    /// `field NOT LIKE pattern`
    NotLike(String, String),
    /// Hand-written SQL, emitted unescaped, with its bind arguments.
    Fragment(String, Vec<SqlValue>),
}

impl Default for Filter {
    /// The empty conjunction, which compiles to no clause at all.
    fn default() -> Self {
        Self::And(Vec::new())
    }
}

impl Filter {
    /// Returns true for a combinator without inner filters.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::And(inner) | Self::Or(inner) | Self::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Returns true when only empty combinators remain at every level, so
    /// the filter compiles to no SQL at all.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        match self {
            Self::And(inner) | Self::Or(inner) | Self::Not(inner) => {
                inner.iter().all(Self::is_vacuous)
            }
            _ => false,
        }
    }

    /// Returns the logical negation of this filter.
    ///
    /// Leaves with a direct inverse are swapped (`Eq`/`Ne`, `Lt`/`Gte`,
    /// `Lte`/`Gt`, `Nil`/`NotNil`, `In`/`Nin`, `Like`/`NotLike`), so negating
    /// twice gives the original leaf back. A `Not` with a single inner filter
    /// unwraps to that filter. Everything else is wrapped in `Not`. A none
    /// filter stays none.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Eq(f, v) => Self::Ne(f, v),
            Self::Ne(f, v) => Self::Eq(f, v),
            Self::Lt(f, v) => Self::Gte(f, v),
            Self::Gte(f, v) => Self::Lt(f, v),
            Self::Lte(f, v) => Self::Gt(f, v),
            Self::Gt(f, v) => Self::Lte(f, v),
            Self::Nil(f) => Self::NotNil(f),
            Self::NotNil(f) => Self::Nil(f),
            Self::In(f, v) => Self::Nin(f, v),
            Self::Nin(f, v) => Self::In(f, v),
            Self::Like(f, p) => Self::NotLike(f, p),
            Self::NotLike(f, p) => Self::Like(f, p),
            Self::Not(mut inner) if inner.len() == 1 => inner.remove(0),
            other if other.is_none() => other,
            other => Self::Not(vec![other]),
        }
    }

    /// Negates the conjunction of `filters`.
    ///
    /// A single filter goes through [`Filter::negate`]; several are wrapped in
    /// one `Not`.
    #[must_use]
    pub fn not(filters: impl IntoIterator<Item = Self>) -> Self {
        let mut filters: Vec<Self> = filters.into_iter().collect();
        if filters.len() == 1 {
            filters.remove(0).negate()
        } else {
            Self::Not(filters)
        }
    }

    /// Combines with `other` using AND.
    ///
    /// A none operand is dropped and an existing `And` is extended in place.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::And(mut inner) => {
                inner.push(other);
                Self::And(inner)
            }
            this => Self::And(vec![this, other]),
        }
    }

    /// Combines with `other` using OR.
    ///
    /// A none operand is dropped and an existing `Or` is extended in place.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::Or(mut inner) => {
                inner.push(other);
                Self::Or(inner)
            }
            this => Self::Or(vec![this, other]),
        }
    }

    /// Conjunction of every filter.
    #[must_use]
    pub fn all(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    /// Disjunction of every filter.
    #[must_use]
    pub fn any(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(filters.into_iter().collect())
    }

    /// `field = value`
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Eq(field.into(), value.to_sql_value())
    }

    /// `field <> value`
    #[must_use]
    pub fn ne(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Ne(field.into(), value.to_sql_value())
    }

    /// `field < value`
    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Lt(field.into(), value.to_sql_value())
    }

    /// `field <= value`
    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Lte(field.into(), value.to_sql_value())
    }

    /// `field > value`
    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Gt(field.into(), value.to_sql_value())
    }

    /// `field >= value`
    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Gte(field.into(), value.to_sql_value())
    }

    /// `field IS NULL`
    #[must_use]
    pub fn nil(field: impl Into<String>) -> Self {
        Self::Nil(field.into())
    }

    /// `field IS NOT NULL`
    #[must_use]
    pub fn not_nil(field: impl Into<String>) -> Self {
        Self::NotNil(field.into())
    }

    /// `field IN (values)`
    #[must_use]
    pub fn is_in<V: ToSqlValue>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::In(
            field.into(),
            values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        )
    }

    /// `field NOT IN (values)`
    #[must_use]
    pub fn not_in<V: ToSqlValue>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::Nin(
            field.into(),
            values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        )
    }

    /// `field LIKE pattern`
    #[must_use]
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Like(field.into(), pattern.into())
    }

    /// `field NOT LIKE pattern`
    #[must_use]
    pub fn not_like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::NotLike(field.into(), pattern.into())
    }

    /// Raw SQL with bind arguments, e.g. `Filter::fragment("age > ?", vec![18.to_sql_value()])`.
    #[must_use]
    pub fn fragment(expr: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self::Fragment(expr.into(), args)
    }
}

impl ops::Not for Filter {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}
