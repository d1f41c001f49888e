use tracing::debug;

use crate::filter::Filter;
use crate::mutate::{Mutate, Mutates};
use crate::value::SqlValue;

use super::{finish, Builder};

impl Builder<'_> {
    /// Compiles a single-row `INSERT`.
    ///
    /// Only `Set` mutates are inserted. Without any, the dialect's
    /// `DEFAULT VALUES` form is used when supported, `() VALUES ()` otherwise.
    pub fn insert(&mut self, table: &str, mutates: &Mutates) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&self.escape(table));

        let mut columns = Vec::with_capacity(mutates.len());
        let mut args = Vec::with_capacity(mutates.len());
        for (field, mutate) in mutates.iter() {
            match mutate {
                Mutate::Set(value) => {
                    columns.push(field);
                    args.push(value.clone());
                }
                Mutate::Increment(_) | Mutate::Fragment(_) => {
                    debug!(table, field, "Skipping non-set mutate on insert");
                }
            }
        }

        if columns.is_empty() && self.config.insert_default_values {
            sql.push_str(" DEFAULT VALUES");
        } else {
            sql.push_str(" (");
            self.write_fields(&mut sql, &columns, ",");
            sql.push_str(") VALUES (");
            for i in 0..args.len() {
                if i > 0 {
                    sql.push(',');
                }
                sql.push_str(&self.ph());
            }
            sql.push(')');
        }

        self.write_returning(&mut sql);
        finish("insert", sql, args)
    }

    /// Compiles a multi-row `INSERT` over `fields`.
    ///
    /// A row without a `Set` for a field gets `DEFAULT` in that slot.
    pub fn insert_all<S: AsRef<str>>(
        &mut self,
        table: &str,
        fields: &[S],
        rows: &[Mutates],
    ) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(&self.escape(table));
        sql.push_str(" (");
        self.write_fields(&mut sql, fields, ",");
        sql.push_str(") VALUES ");

        let mut args = Vec::with_capacity(fields.len() * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            sql.push('(');
            for (j, field) in fields.iter().enumerate() {
                if j > 0 {
                    sql.push(',');
                }
                match row.get_set(field.as_ref()) {
                    Some(value) => {
                        sql.push_str(&self.ph());
                        args.push(value.clone());
                    }
                    None => sql.push_str("DEFAULT"),
                }
            }
            sql.push(')');
        }

        self.write_returning(&mut sql);
        finish("insert_all", sql, args)
    }

    /// Compiles an `UPDATE`.
    pub fn update(
        &mut self,
        table: &str,
        mutates: &Mutates,
        filter: &Filter,
    ) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("UPDATE ");
        sql.push_str(&self.escape(table));
        sql.push_str(" SET ");

        let mut args = Vec::with_capacity(mutates.len());
        for (i, (field, mutate)) in mutates.iter().enumerate() {
            if i > 0 {
                sql.push(',');
            }
            match mutate {
                Mutate::Set(value) => {
                    sql.push_str(&self.escape(field));
                    sql.push('=');
                    sql.push_str(&self.ph());
                    args.push(value.clone());
                }
                Mutate::Increment(value) => {
                    let escaped = self.escape(field);
                    sql.push_str(&escaped);
                    sql.push('=');
                    sql.push_str(&escaped);
                    sql.push('+');
                    sql.push_str(&self.ph());
                    args.push(value.clone());
                }
                Mutate::Fragment(values) => {
                    sql.push_str(field);
                    args.extend(values.iter().cloned());
                }
            }
        }

        self.write_clause(&mut sql, &mut args, "WHERE", filter);
        finish("update", sql, args)
    }

    /// Compiles a `DELETE`; a none filter deletes every row.
    pub fn delete(&mut self, table: &str, filter: &Filter) -> (String, Vec<SqlValue>) {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(&self.escape(table));

        let mut args = Vec::new();
        self.write_clause(&mut sql, &mut args, "WHERE", filter);
        finish("delete", sql, args)
    }
}
