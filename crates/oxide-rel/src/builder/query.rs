use crate::query::{Join, Query};
use crate::value::SqlValue;

use super::{finish, Builder};

impl Builder<'_> {
    /// Compiles a `SELECT`.
    ///
    /// A query with `raw` set compiles to that statement verbatim.
    pub fn find(&mut self, query: &Query) -> (String, Vec<SqlValue>) {
        if let Some(raw) = &query.raw {
            return (raw.statement.clone(), raw.args.clone());
        }

        let mut sql = String::from("SELECT ");
        if query.select.distinct {
            sql.push_str("DISTINCT ");
        }
        if query.select.fields.is_empty() {
            sql.push('*');
        } else {
            self.write_fields(&mut sql, &query.select.fields, ",");
        }

        let args = self.write_query(&mut sql, query);
        finish("find", sql, args)
    }

    /// Compiles `SELECT mode(field) AS mode` followed by the group fields.
    ///
    /// ```rust
    /// use oxide_rel::{Builder, Config, Query};
    ///
    /// let config = Config::mysql();
    /// let query = Query::from("orders").group(["user_id"]);
    /// let (sql, _) = Builder::new(&config).aggregate(&query, "sum", "total");
    /// assert_eq!(
    ///     sql,
    ///     "SELECT sum(`total`) AS `sum`,`user_id` FROM `orders` GROUP BY `user_id`;"
    /// );
    /// ```
    pub fn aggregate(
        &mut self,
        query: &Query,
        mode: &str,
        field: &str,
    ) -> (String, Vec<SqlValue>) {
        if let Some(raw) = &query.raw {
            return (raw.statement.clone(), raw.args.clone());
        }

        let mut sql = String::from("SELECT ");
        sql.push_str(&self.escape(&format!("{mode}({field}) AS {mode}")));
        if !query.group.fields.is_empty() {
            sql.push(',');
            self.write_fields(&mut sql, &query.group.fields, ",");
        }

        let args = self.write_query(&mut sql, query);
        finish("aggregate", sql, args)
    }

    /// Everything after the select list.
    fn write_query(&mut self, sql: &mut String, query: &Query) -> Vec<SqlValue> {
        let mut args = Vec::new();

        sql.push_str(" FROM ");
        sql.push_str(&self.escape(&query.table));

        for join in &query.joins {
            sql.push(' ');
            self.write_join(sql, &query.table, join);
            args.extend(join.args().iter().cloned());
        }

        self.write_clause(sql, &mut args, "WHERE", &query.filter);

        if !query.group.fields.is_empty() {
            sql.push_str(" GROUP BY ");
            self.write_fields(sql, &query.group.fields, ",");
            self.write_clause(sql, &mut args, "HAVING", &query.group.having);
        }

        if !query.sort.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, sort) in query.sort.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&self.escape(&sort.field));
                sql.push(' ');
                sql.push_str(sort.direction.as_str());
            }
        }

        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = query.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        if let Some(lock) = &query.lock {
            sql.push(' ');
            sql.push_str(&lock.0);
        }

        args
    }

    fn write_join(&self, sql: &mut String, table: &str, join: &Join) {
        match join {
            Join::On {
                mode,
                table: joined,
                from,
                to,
                ..
            } => {
                let from = from.clone().unwrap_or_else(|| {
                    let singular = joined.strip_suffix('s').unwrap_or(joined);
                    format!("{table}.{singular}_id")
                });
                let to = to.clone().unwrap_or_else(|| format!("{joined}.id"));

                sql.push_str(mode.as_str());
                sql.push(' ');
                sql.push_str(&self.escape(joined));
                sql.push_str(" ON ");
                sql.push_str(&self.escape(&from));
                sql.push('=');
                sql.push_str(&self.escape(&to));
            }
            Join::Fragment { expr, .. } => sql.push_str(expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::filter::Filter;
    use crate::query::{Join, Lock, Query};
    use crate::value::{SqlValue, ToSqlValue};
    use crate::Builder;

    #[test]
    fn test_find_all() {
        let config = Config::mysql();
        assert_eq!(
            Builder::new(&config).find(&Query::from("users")),
            (String::from("SELECT * FROM `users`;"), vec![])
        );
    }

    #[test]
    fn test_find_distinct_fields() {
        let config = Config::mysql();
        let query = Query::from("users").select(["id", "name"]).distinct();
        assert_eq!(
            Builder::new(&config).find(&query).0,
            "SELECT DISTINCT `id`,`name` FROM `users`;"
        );
    }

    #[test]
    fn test_find_every_clause() {
        let config = Config::mysql();
        let query = Query::from("users")
            .select(["users.*"])
            .join(Join::join("transactions"))
            .filter(Filter::eq("users.active", true))
            .group(["users.id"])
            .having(Filter::gt("count(transactions.id)", 2))
            .sort_asc("users.name")
            .sort_desc("users.id")
            .limit(10)
            .offset(5)
            .lock(Lock::for_update());

        let (sql, args) = Builder::new(&config).find(&query);
        assert_eq!(
            sql,
            "SELECT `users`.* FROM `users` \
             JOIN `transactions` ON `users`.`transaction_id`=`transactions`.`id` \
             WHERE `users`.`active`=? \
             GROUP BY `users`.`id` HAVING count(`transactions`.`id`)>? \
             ORDER BY `users`.`name` ASC, `users`.`id` DESC \
             LIMIT 10 OFFSET 5 FOR UPDATE;"
        );
        assert_eq!(args, vec![SqlValue::Bool(true), SqlValue::Int(2)]);
    }

    #[test]
    fn test_offset_requires_limit() {
        let config = Config::mysql();
        let query = Query::from("users").offset(5);
        assert_eq!(Builder::new(&config).find(&query).0, "SELECT * FROM `users`;");
    }

    #[test]
    fn test_having_requires_group() {
        let config = Config::mysql();
        let query = Query::from("users").having(Filter::gt("age", 1));
        assert_eq!(Builder::new(&config).find(&query).0, "SELECT * FROM `users`;");
    }

    #[test]
    fn test_join_args_precede_where_args() {
        let config = Config::mysql();
        let query = Query::from("users")
            .join(Join::fragment(
                "JOIN `roles` ON `roles`.`id`=`users`.`role_id` AND `roles`.`level`>?",
                vec![3.to_sql_value()],
            ))
            .join(Join::left_on("teams", "users.team_id", "teams.id"))
            .filter(Filter::eq("users.id", 1));

        let (sql, args) = Builder::new(&config).find(&query);
        assert_eq!(
            sql,
            "SELECT * FROM `users` \
             JOIN `roles` ON `roles`.`id`=`users`.`role_id` AND `roles`.`level`>? \
             LEFT JOIN `teams` ON `users`.`team_id`=`teams`.`id` \
             WHERE `users`.`id`=?;"
        );
        assert_eq!(args, vec![SqlValue::Int(3), SqlValue::Int(1)]);
    }

    #[test]
    fn test_ordinal_where_then_having() {
        let config = Config::postgres();
        let query = Query::from("users")
            .filter(Filter::eq("id", 10))
            .group(["role"])
            .having(Filter::gt("count(id)", 1));

        let (sql, args) = Builder::new(&config).find(&query);
        assert_eq!(
            sql,
            "SELECT * FROM \"users\" WHERE \"id\"=$1 GROUP BY \"role\" HAVING count(\"id\")>$2;"
        );
        assert_eq!(args, vec![SqlValue::Int(10), SqlValue::Int(1)]);
    }

    #[test]
    fn test_raw_is_verbatim() {
        let config = Config::postgres();
        let query = Query::raw("SELECT 1 WHERE ?", vec![SqlValue::Bool(true)]);
        assert_eq!(
            Builder::new(&config).find(&query),
            (String::from("SELECT 1 WHERE ?"), vec![SqlValue::Bool(true)])
        );
    }

    #[test]
    fn test_aggregate_count_all() {
        let config = Config::mysql();
        let query = Query::from("users").filter(Filter::eq("active", true));
        let (sql, args) = Builder::new(&config).aggregate(&query, "count", "*");
        assert_eq!(
            sql,
            "SELECT count(*) AS `count` FROM `users` WHERE `active`=?;"
        );
        assert_eq!(args, vec![SqlValue::Bool(true)]);
    }
}
