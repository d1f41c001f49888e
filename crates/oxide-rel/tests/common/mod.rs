#![allow(dead_code)]

use oxide_rel::{Config, Dialect, Mutates, SqlValue};

/// Every preset, for tests that must hold on all dialects.
pub fn all_configs() -> Vec<Config> {
    [Dialect::MySql, Dialect::Postgres, Dialect::Sqlite]
        .into_iter()
        .map(Config::for_dialect)
        .collect()
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_owned())
}

pub fn ints(values: &[i64]) -> Vec<SqlValue> {
    values.iter().copied().map(SqlValue::Int).collect()
}

/// `n` rows that only set `name`.
pub fn named_rows(n: usize) -> Vec<Mutates> {
    (0..n)
        .map(|i| Mutates::new().set("name", format!("row{i}")))
        .collect()
}
