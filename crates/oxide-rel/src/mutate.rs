//! Per-column write operations for insert and update.

use crate::value::{SqlValue, ToSqlValue};

/// A single column write.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutate {
    /// `field=value`
    Set(SqlValue),
    /// `field=field+value`
    Increment(SqlValue),
    /// The field key is raw SQL, bound with these arguments.
    Fragment(Vec<SqlValue>),
}

/// Ordered set of column writes, unique per field.
///
/// Compiled statements list columns in insertion order. Writing a field that
/// is already present replaces its operation without moving it.
///
/// ```rust
/// use oxide_rel::{Mutate, Mutates, SqlValue};
///
/// let mutates = Mutates::new()
///     .set("name", "Ada")
///     .inc("visits", 1)
///     .set("name", "Grace");
///
/// assert_eq!(mutates.len(), 2);
/// assert_eq!(
///     mutates.get("name"),
///     Some(&Mutate::Set(SqlValue::Text("Grace".into())))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mutates {
    entries: Vec<(String, Mutate)>,
}

impl Mutates {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records `mutate` for `field`, replacing any earlier one in place.
    pub fn insert(&mut self, field: impl Into<String>, mutate: Mutate) {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = mutate,
            None => self.entries.push((field, mutate)),
        }
    }

    /// Sets `field` to `value`.
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.insert(field, Mutate::Set(value.to_sql_value()));
        self
    }

    /// Increments `field` by `value`.
    #[must_use]
    pub fn inc(mut self, field: impl Into<String>, value: impl ToSqlValue) -> Self {
        self.insert(field, Mutate::Increment(value.to_sql_value()));
        self
    }

    /// Adds a raw assignment such as `counter=counter*?`.
    #[must_use]
    pub fn fragment(mut self, expr: impl Into<String>, args: Vec<SqlValue>) -> Self {
        self.insert(expr, Mutate::Fragment(args));
        self
    }

    /// Operation recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Mutate> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, mutate)| mutate)
    }

    /// Value of `field` when it is a plain `Set`.
    #[must_use]
    pub fn get_set(&self, field: &str) -> Option<&SqlValue> {
        match self.get(field) {
            Some(Mutate::Set(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterates over `(field, mutate)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mutate)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no field is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: Into<String>> FromIterator<(F, Mutate)> for Mutates {
    fn from_iter<I: IntoIterator<Item = (F, Mutate)>>(iter: I) -> Self {
        let mut mutates = Self::new();
        for (field, mutate) in iter {
            mutates.insert(field, mutate);
        }
        mutates
    }
}
