//! Primary keys for bulk inserts.
//!
//! A multi-row `INSERT` reports a single generated id. MySQL returns the id of
//! the first inserted row and steps by `auto_increment_increment`; SQLite
//! returns the id of the last row. [`allocate_ids`] turns that one id into a
//! key per row, given the step reported by
//! [`Config::increment`](crate::Config::increment).

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mutate::Mutates;
use crate::value::SqlValue;

/// Server-side lookups needed by increment functions.
///
/// Implemented by the driver layer; the compiler never talks to a database.
pub trait Session {
    /// Returns the value of a server variable, if it is set.
    ///
    /// # Errors
    ///
    /// Returns the mapped driver error when the lookup fails.
    fn variable(&self, name: &str) -> Result<Option<String>>;
}

/// MySQL server variable holding the auto increment step.
pub const AUTO_INCREMENT_INCREMENT: &str = "auto_increment_increment";

/// Reads `auto_increment_increment` from the server; defaults to `1`.
///
/// # Errors
///
/// Returns [`Error::InvalidIncrement`] when the variable is not an integer,
/// or the session's error when the lookup fails.
pub fn mysql_increment(session: &dyn Session) -> Result<i64> {
    let Some(value) = session.variable(AUTO_INCREMENT_INCREMENT)? else {
        debug!("{AUTO_INCREMENT_INCREMENT} not set, using 1");
        return Ok(1);
    };

    value.trim().parse().map_err(|_| {
        warn!(value = %value, "Unparsable {AUTO_INCREMENT_INCREMENT}");
        Error::InvalidIncrement(value)
    })
}

/// SQLite reports the last row id, so the sequence is walked backwards.
///
/// # Errors
///
/// Never fails.
pub const fn sqlite_increment(_session: &dyn Session) -> Result<i64> {
    Ok(-1)
}

/// Assigns a primary key to every row of a bulk insert.
///
/// `last_id` is the id reported by the driver and `inc` the dialect step. A
/// negative step means `last_id` belongs to the last row. A row that sets
/// `primary_field` itself keeps that value; when it is an integer the following
/// rows continue from it.
///
/// ```rust
/// use oxide_rel::{allocate_ids, Mutates, SqlValue};
///
/// let rows = vec![Mutates::new().set("name", "a"); 3];
/// assert_eq!(
///     allocate_ids(10, -1, "id", &rows).unwrap(),
///     vec![SqlValue::Int(8), SqlValue::Int(9), SqlValue::Int(10)]
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::IdOverflow`] when an id of the sequence does not fit in
/// an `i64`.
pub fn allocate_ids(
    last_id: i64,
    inc: i64,
    primary_field: &str,
    rows: &[Mutates],
) -> Result<Vec<SqlValue>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let overflow = || {
        warn!(last_id, inc, rows = rows.len(), "Primary key sequence overflows");
        Error::IdOverflow {
            last_id,
            inc,
            rows: rows.len(),
        }
    };

    let (mut base, step) = match inc {
        0 => {
            debug!("Zero increment, using 1");
            (last_id, 1)
        }
        inc if inc < 0 => {
            debug!(inc, "Negative increment, counting back from the last id");
            let first = i64::try_from(rows.len() - 1)
                .ok()
                .and_then(|n| n.checked_mul(inc))
                .and_then(|back| last_id.checked_add(back))
                .ok_or_else(overflow)?;
            (first, inc.checked_neg().ok_or_else(overflow)?)
        }
        inc => (last_id, inc),
    };

    let mut counter: i64 = 0;
    rows.iter()
        .map(|row| -> Result<SqlValue> {
            let Some(explicit) = row.get_set(primary_field) else {
                let id = counter
                    .checked_mul(step)
                    .and_then(|offset| base.checked_add(offset))
                    .ok_or_else(overflow)?;
                counter += 1;
                return Ok(SqlValue::Int(id));
            };
            if let Some(id) = explicit.as_i64() {
                base = id;
                counter = 1;
            }
            Ok(explicit.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::DriverError;

    struct Variables(HashMap<&'static str, &'static str>);

    impl Session for Variables {
        fn variable(&self, name: &str) -> Result<Option<String>> {
            Ok(self.0.get(name).map(|v| (*v).to_owned()))
        }
    }

    struct Broken;

    impl Session for Broken {
        fn variable(&self, _name: &str) -> Result<Option<String>> {
            Err(Error::Driver(DriverError::new("connection reset")))
        }
    }

    fn rows(n: usize) -> Vec<Mutates> {
        vec![Mutates::new().set("name", "x"); n]
    }

    fn ints(ids: &[i64]) -> Vec<SqlValue> {
        ids.iter().copied().map(SqlValue::Int).collect()
    }

    #[test]
    fn test_last_id_with_negative_increment() {
        assert_eq!(allocate_ids(10, -1, "id", &rows(3)).unwrap(), ints(&[8, 9, 10]));
    }

    #[test]
    fn test_first_id_with_positive_increment() {
        assert_eq!(allocate_ids(1, 1, "id", &rows(3)).unwrap(), ints(&[1, 2, 3]));
        assert_eq!(allocate_ids(5, 2, "id", &rows(3)).unwrap(), ints(&[5, 7, 9]));
    }

    #[test]
    fn test_zero_increment_steps_by_one() {
        assert_eq!(allocate_ids(4, 0, "id", &rows(2)).unwrap(), ints(&[4, 5]));
    }

    #[test]
    fn test_empty_batch() {
        assert!(allocate_ids(10, -1, "id", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_key_rebases_sequence() {
        let batch = vec![
            Mutates::new().set("name", "a"),
            Mutates::new().set("id", 20).set("name", "b"),
            Mutates::new().set("name", "c"),
        ];
        assert_eq!(allocate_ids(1, 1, "id", &batch).unwrap(), ints(&[1, 20, 21]));
    }

    #[test]
    fn test_non_integer_key_is_kept() {
        let batch = vec![
            Mutates::new().set("id", "abc"),
            Mutates::new().set("name", "b"),
        ];
        assert_eq!(
            allocate_ids(7, 1, "id", &batch).unwrap(),
            vec![SqlValue::Text(String::from("abc")), SqlValue::Int(7)]
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let after_max = vec![
            Mutates::new().set("id", i64::MAX),
            Mutates::new().set("name", "b"),
        ];
        assert!(matches!(
            allocate_ids(1, 1, "id", &after_max),
            Err(Error::IdOverflow { rows: 2, .. })
        ));
        assert!(matches!(
            allocate_ids(i64::MAX, 1, "id", &rows(2)),
            Err(Error::IdOverflow { .. })
        ));
        assert!(matches!(
            allocate_ids(10, i64::MIN, "id", &rows(1)),
            Err(Error::IdOverflow { inc: i64::MIN, .. })
        ));
        assert!(matches!(
            allocate_ids(i64::MIN + 1, -2, "id", &rows(3)),
            Err(Error::IdOverflow { .. })
        ));
    }

    #[test]
    fn test_sequence_ending_at_max() {
        assert_eq!(
            allocate_ids(i64::MAX, -1, "id", &rows(2)).unwrap(),
            ints(&[i64::MAX - 1, i64::MAX])
        );
    }

    #[test]
    fn test_mysql_increment() {
        let session = Variables(HashMap::from([(AUTO_INCREMENT_INCREMENT, "2")]));
        assert_eq!(mysql_increment(&session).unwrap(), 2);

        let session = Variables(HashMap::new());
        assert_eq!(mysql_increment(&session).unwrap(), 1);

        let session = Variables(HashMap::from([(AUTO_INCREMENT_INCREMENT, "two")]));
        assert!(matches!(
            mysql_increment(&session),
            Err(Error::InvalidIncrement(v)) if v == "two"
        ));

        assert!(matches!(mysql_increment(&Broken), Err(Error::Driver(_))));
    }

    #[test]
    fn test_sqlite_increment() {
        assert_eq!(sqlite_increment(&Broken).unwrap(), -1);
    }
}
