//! Identifier escaping.
//!
//! Column and table references are quoted with the dialect's escape character.
//! A reference can be more than a bare name, so [`Escaper`] recognizes a few
//! shapes before falling back to plain quoting:
//!
//! | input               | output (backtick dialect)       |
//! |---------------------|---------------------------------|
//! | `^FIELD(a, 1)`      | `FIELD(a, 1)`                   |
//! | `id AS user_id`     | `` `id` AS `user_id` ``         |
//! | `count(id)`         | `` count(`id`) ``               |
//! | `users.*`           | `` `users`.* ``                 |
//! | `users.id`          | `` `users`.`id` ``              |
//!
//! Results are memoized per `(field, escape_char)` and never evicted.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

/// A field starting with this character is emitted as-is, minus the marker.
pub const UNESCAPE_CHAR: char = '^';

/// Memoizing, thread-safe identifier escaper.
///
/// One escaper is usually shared (through `Arc`) by every
/// [`Config`](crate::Config) of a process.
#[derive(Default)]
pub struct Escaper {
    cache: DashMap<(String, String), Arc<str>>,
}

impl Escaper {
    /// Creates an escaper with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes `field` using `escape_char` as the quote.
    #[must_use]
    pub fn escape(&self, escape_char: &str, field: &str) -> Arc<str> {
        if escape_char.is_empty() || field == "*" {
            return Arc::from(field);
        }

        let key = (field.to_owned(), escape_char.to_owned());
        if let Some(hit) = self.cache.get(&key) {
            return Arc::clone(hit.value());
        }

        let escaped: Arc<str> = Arc::from(self.compute(escape_char, field));
        // A concurrent caller may have won the race; keep whichever landed first.
        Arc::clone(self.cache.entry(key).or_insert(escaped).value())
    }

    /// Number of cached identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn compute(&self, q: &str, field: &str) -> String {
        if let Some(raw) = field.strip_prefix(UNESCAPE_CHAR) {
            return raw.to_owned();
        }

        if let Some(pos) = field.to_ascii_lowercase().find(" as ") {
            let (left, right) = (&field[..pos], &field[pos + 4..]);
            return format!("{} AS {}", self.escape(q, left), self.escape(q, right));
        }

        if let (Some(start), Some(end)) = (field.find('('), field.rfind(')')) {
            if end == start + 1 {
                return field.to_owned();
            }
            if end > start {
                return format!(
                    "{}{}{}",
                    &field[..=start],
                    self.escape(q, &field[start + 1..end]),
                    &field[end..]
                );
            }
        }

        if let Some(prefix) = field.strip_suffix('*') {
            return match prefix.strip_suffix('.') {
                Some(table) => format!("{}.*", quote_path(q, table)),
                None => format!("{}*", quote_path(q, prefix)),
            };
        }

        quote_path(q, field)
    }
}

impl fmt::Debug for Escaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Escaper")
            .field("cached", &self.cache.len())
            .finish()
    }
}

/// Quotes `table.column` (split on the first dot) or a bare name.
fn quote_path(q: &str, path: &str) -> String {
    match path.split_once('.') {
        Some((table, column)) => format!("{}.{}", quote(q, table), quote(q, column)),
        None => quote(q, path),
    }
}

fn quote(q: &str, name: &str) -> String {
    let doubled = format!("{q}{q}");
    format!("{q}{}{q}", name.replace(q, &doubled))
}
