use tracing::trace;

use crate::config::Dialect;
use crate::schema::{Column, Definition, Index, IndexOp, IndexType, SchemaOp, Table};
use crate::value::quote_literal;

use super::Builder;

impl Builder<'_> {
    /// Compiles a table statement.
    ///
    /// `Alter` yields one `ALTER TABLE` statement per definition, separated by
    /// newlines. Outside MySQL, plain `INDEX` keys are compiled as separate
    /// `CREATE INDEX` statements following the table statement.
    #[must_use]
    pub fn table(&self, table: &Table) -> String {
        let name = self.escape(&table.name);
        let sql = match table.op {
            SchemaOp::Create => {
                let mut sql = String::from("CREATE TABLE ");
                if table.optional {
                    sql.push_str("IF NOT EXISTS ");
                }
                sql.push_str(&name);
                sql.push_str(" (");

                let mut indexes = Vec::new();
                let mut first = true;
                for definition in &table.definitions {
                    if let Some(index) = self.standalone_index(&table.name, definition) {
                        indexes.push(index);
                        continue;
                    }
                    if !first {
                        sql.push_str(", ");
                    }
                    first = false;
                    match definition {
                        Definition::Column(column) => self.write_column(&mut sql, column),
                        Definition::Index(index) => self.write_key(&mut sql, index),
                        Definition::Raw(raw) => sql.push_str(raw),
                    }
                }
                sql.push(')');
                write_options(&mut sql, &table.options);
                sql.push(';');

                for index in &indexes {
                    sql.push('\n');
                    sql.push_str(&self.index(index));
                }
                sql
            }
            SchemaOp::Alter => table
                .definitions
                .iter()
                .map(|definition| match self.standalone_index(&table.name, definition) {
                    Some(index) => self.index(&index),
                    None => format!("ALTER TABLE {name} {};", self.alter_clause(definition)),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            SchemaOp::Rename => format!(
                "ALTER TABLE {name} RENAME TO {};",
                self.escape(&table.new_name)
            ),
            SchemaOp::Drop => {
                let exists = if table.optional { "IF EXISTS " } else { "" };
                format!("DROP TABLE {exists}{name};")
            }
        };

        trace!(statement = %sql, "Compiled table");
        sql
    }

    /// Compiles a standalone index statement.
    #[must_use]
    pub fn index(&self, index: &Index) -> String {
        let mysql = self.config.dialect == Dialect::MySql;
        let name = self.escape(&index.name);
        let table = self.escape(&index.table);

        let sql = match index.op {
            IndexOp::Create => {
                let mut sql = String::from("CREATE ");
                if index.index_type == IndexType::Unique {
                    sql.push_str("UNIQUE ");
                }
                sql.push_str("INDEX ");
                if index.optional {
                    sql.push_str("IF NOT EXISTS ");
                }
                sql.push_str(&name);
                sql.push_str(" ON ");
                sql.push_str(&table);
                sql.push(' ');
                self.write_columns(&mut sql, &index.columns);
                if mysql {
                    write_comment(&mut sql, &index.comment);
                }
                write_options(&mut sql, &index.options);
                sql.push(';');
                sql
            }
            IndexOp::Rename => {
                let new_name = self.escape(&index.new_name);
                if mysql {
                    format!("ALTER TABLE {table} RENAME INDEX {name} TO {new_name};")
                } else {
                    format!("ALTER INDEX {name} RENAME TO {new_name};")
                }
            }
            IndexOp::Drop => {
                let exists = if index.optional { "IF EXISTS " } else { "" };
                if mysql {
                    format!("DROP INDEX {exists}{name} ON {table};")
                } else {
                    format!("DROP INDEX {exists}{name};")
                }
            }
        };

        trace!(statement = %sql, "Compiled index");
        sql
    }

    /// A plain index to create on `table`, when the dialect only accepts it
    /// as a standalone `CREATE INDEX`.
    fn standalone_index(&self, table: &str, definition: &Definition) -> Option<Index> {
        match definition {
            Definition::Index(index)
                if self.config.dialect != Dialect::MySql
                    && index.op == IndexOp::Create
                    && index.index_type == IndexType::Simple =>
            {
                Some(Index {
                    table: table.to_owned(),
                    ..index.clone()
                })
            }
            _ => None,
        }
    }

    fn alter_clause(&self, definition: &Definition) -> String {
        let mysql = self.config.dialect == Dialect::MySql;
        match definition {
            Definition::Column(column) => {
                let name = self.escape(&column.name);
                match column.op {
                    SchemaOp::Create => {
                        let mut sql = String::from("ADD COLUMN ");
                        self.write_column(&mut sql, column);
                        sql
                    }
                    SchemaOp::Alter if mysql => {
                        let mut sql = String::from("MODIFY COLUMN ");
                        self.write_column(&mut sql, column);
                        sql
                    }
                    SchemaOp::Alter => {
                        let mut sql = format!("ALTER COLUMN {name} TYPE ");
                        self.write_column_type(&mut sql, column);
                        sql
                    }
                    SchemaOp::Rename => {
                        format!("RENAME COLUMN {name} TO {}", self.escape(&column.new_name))
                    }
                    SchemaOp::Drop => format!("DROP COLUMN {name}"),
                }
            }
            Definition::Index(index) => {
                let name = self.escape(&index.name);
                match index.op {
                    IndexOp::Create => {
                        let mut sql = String::from("ADD ");
                        self.write_key(&mut sql, index);
                        sql
                    }
                    IndexOp::Rename => {
                        let keyword = if mysql { "INDEX" } else { "CONSTRAINT" };
                        format!(
                            "RENAME {keyword} {name} TO {}",
                            self.escape(&index.new_name)
                        )
                    }
                    IndexOp::Drop if mysql => match index.index_type {
                        IndexType::PrimaryKey => String::from("DROP PRIMARY KEY"),
                        IndexType::ForeignKey => format!("DROP FOREIGN KEY {name}"),
                        IndexType::Simple | IndexType::Unique => format!("DROP INDEX {name}"),
                    },
                    IndexOp::Drop => format!("DROP CONSTRAINT {name}"),
                }
            }
            Definition::Raw(raw) => raw.clone(),
        }
    }

    /// `name type[(m[,n])][ UNSIGNED][ UNIQUE][ NOT NULL][ DEFAULT v][ COMMENT 'c'][ options]`
    fn write_column(&self, sql: &mut String, column: &Column) {
        sql.push_str(&self.escape(&column.name));
        sql.push(' ');
        self.write_column_type(sql, column);

        if column.unique {
            sql.push_str(" UNIQUE");
        }
        if column.required {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if self.config.dialect == Dialect::MySql {
            write_comment(sql, &column.comment);
        }
        write_options(sql, &column.options);
    }

    fn write_column_type(&self, sql: &mut String, column: &Column) {
        let spec = self.config.map_column(column);
        sql.push_str(&spec.sql_type);
        if spec.m != 0 {
            sql.push_str(&format!("({}", spec.m));
            if spec.n != 0 {
                sql.push_str(&format!(",{}", spec.n));
            }
            sql.push(')');
        }
        if spec.unsigned {
            sql.push_str(" UNSIGNED");
        }
    }

    fn write_key(&self, sql: &mut String, index: &Index) {
        let constraint = |sql: &mut String| {
            if !index.name.is_empty() {
                sql.push_str("CONSTRAINT ");
                sql.push_str(&self.escape(&index.name));
                sql.push(' ');
            }
        };

        match index.index_type {
            IndexType::PrimaryKey => sql.push_str("PRIMARY KEY "),
            IndexType::Unique => {
                constraint(sql);
                sql.push_str("UNIQUE ");
            }
            IndexType::ForeignKey => {
                constraint(sql);
                sql.push_str("FOREIGN KEY ");
            }
            IndexType::Simple => {
                sql.push_str("INDEX ");
                sql.push_str(&self.escape(&index.name));
                sql.push(' ');
            }
        }
        self.write_columns(sql, &index.columns);

        if let Some(reference) = &index.reference {
            sql.push_str(" REFERENCES ");
            sql.push_str(&self.escape(&reference.table));
            sql.push(' ');
            self.write_columns(sql, &reference.columns);
            if let Some(action) = reference.on_delete {
                sql.push_str(" ON DELETE ");
                sql.push_str(action.as_sql());
            }
            if let Some(action) = reference.on_update {
                sql.push_str(" ON UPDATE ");
                sql.push_str(action.as_sql());
            }
        }

        if self.config.dialect == Dialect::MySql {
            write_comment(sql, &index.comment);
        }
        write_options(sql, &index.options);
    }

    fn write_columns(&self, sql: &mut String, columns: &[String]) {
        sql.push('(');
        self.write_fields(sql, columns, ", ");
        sql.push(')');
    }
}

fn write_comment(sql: &mut String, comment: &str) {
    if !comment.is_empty() {
        sql.push_str(" COMMENT ");
        sql.push_str(&quote_literal(comment));
    }
}

fn write_options(sql: &mut String, options: &str) {
    if !options.is_empty() {
        sql.push(' ');
        sql.push_str(options);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::schema::{Column, ColumnType, ForeignKeyAction, Index, Table};
    use crate::Builder;

    #[test]
    fn test_create_table_mysql() {
        let config = Config::mysql();
        let table = Table::create("products")
            .id("id")
            .column(Column::new("name", ColumnType::String).limit(100).required())
            .column(
                Column::new("price", ColumnType::Decimal)
                    .precision(10)
                    .scale(2)
                    .unsigned()
                    .default(0),
            )
            .column(Column::new("sku", ColumnType::String).unique().comment("stock unit"))
            .bool("active")
            .int("category_id")
            .foreign_key("category_id", "categories", "id")
            .options("ENGINE=InnoDB");

        assert_eq!(
            Builder::new(&config).table(&table),
            "CREATE TABLE `products` (\
             `id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, \
             `name` VARCHAR(100) NOT NULL, \
             `price` DECIMAL(10,2) UNSIGNED DEFAULT 0, \
             `sku` VARCHAR(255) UNIQUE COMMENT 'stock unit', \
             `active` BOOL, \
             `category_id` INT, \
             FOREIGN KEY (`category_id`) REFERENCES `categories` (`id`)\
             ) ENGINE=InnoDB;"
        );
    }

    #[test]
    fn test_create_table_keys() {
        let config = Config::postgres();
        let table = Table::create("memberships")
            .optional()
            .int("user_id")
            .int("team_id")
            .primary_key(["user_id", "team_id"])
            .key(Index::unique(["user_id"]).name("one_team"))
            .key(
                Index::foreign_key(["team_id"], "teams", ["id"])
                    .name("fk_team")
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Restrict),
            )
            .fragment("CHECK (user_id > 0)");

        assert_eq!(
            Builder::new(&config).table(&table),
            "CREATE TABLE IF NOT EXISTS \"memberships\" (\
             \"user_id\" INT, \"team_id\" INT, \
             PRIMARY KEY (\"user_id\", \"team_id\"), \
             CONSTRAINT \"one_team\" UNIQUE (\"user_id\"), \
             CONSTRAINT \"fk_team\" FOREIGN KEY (\"team_id\") REFERENCES \"teams\" (\"id\") \
             ON DELETE CASCADE ON UPDATE RESTRICT, \
             CHECK (user_id > 0));"
        );
    }

    #[test]
    fn test_alter_table_mysql() {
        let config = Config::mysql();
        let table = Table::alter("users")
            .string("nickname")
            .rename_column("name", "full_name")
            .alter_column(Column::new("age", ColumnType::BigInt).required())
            .drop_column("legacy")
            .unique(["email"])
            .rename_index("idx_a", "idx_b")
            .drop_index("idx_c")
            .drop_foreign_key("fk_team")
            .drop_primary_key();

        let statements: Vec<String> = Builder::new(&config)
            .table(&table)
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE `users` ADD COLUMN `nickname` VARCHAR(255);",
                "ALTER TABLE `users` RENAME COLUMN `name` TO `full_name`;",
                "ALTER TABLE `users` MODIFY COLUMN `age` BIGINT NOT NULL;",
                "ALTER TABLE `users` DROP COLUMN `legacy`;",
                "ALTER TABLE `users` ADD UNIQUE (`email`);",
                "ALTER TABLE `users` RENAME INDEX `idx_a` TO `idx_b`;",
                "ALTER TABLE `users` DROP INDEX `idx_c`;",
                "ALTER TABLE `users` DROP FOREIGN KEY `fk_team`;",
                "ALTER TABLE `users` DROP PRIMARY KEY;",
            ]
        );
    }

    #[test]
    fn test_alter_table_postgres() {
        let config = Config::postgres();
        let table = Table::alter("users")
            .alter_column(Column::new("name", ColumnType::String).limit(64))
            .rename_index("idx_a", "idx_b")
            .drop_foreign_key("fk_team");

        assert_eq!(
            Builder::new(&config).table(&table),
            "ALTER TABLE \"users\" ALTER COLUMN \"name\" TYPE VARCHAR(64);\n\
             ALTER TABLE \"users\" RENAME CONSTRAINT \"idx_a\" TO \"idx_b\";\n\
             ALTER TABLE \"users\" DROP CONSTRAINT \"fk_team\";"
        );
    }

    #[test]
    fn test_rename_and_drop_table() {
        let config = Config::mysql();
        let builder = Builder::new(&config);
        assert_eq!(
            builder.table(&Table::rename("users", "people")),
            "ALTER TABLE `users` RENAME TO `people`;"
        );
        assert_eq!(builder.table(&Table::drop("users")), "DROP TABLE `users`;");
        assert_eq!(
            builder.table(&Table::drop("users").optional()),
            "DROP TABLE IF EXISTS `users`;"
        );
    }

    #[test]
    fn test_column_default_literals() {
        let config = Config::sqlite();
        let table = Table::create("posts")
            .id("id")
            .column(Column::new("title", ColumnType::String).default("untitled"))
            .column(
                Column::new("created_at", ColumnType::DateTime).default_expr("CURRENT_TIMESTAMP"),
            );

        assert_eq!(
            Builder::new(&config).table(&table),
            "CREATE TABLE `posts` (\
             `id` INTEGER PRIMARY KEY AUTOINCREMENT, \
             `title` VARCHAR(255) DEFAULT 'untitled', \
             `created_at` DATETIME DEFAULT CURRENT_TIMESTAMP);"
        );
    }

    #[test]
    fn test_index_mysql() {
        let config = Config::mysql();
        let builder = Builder::new(&config);
        assert_eq!(
            builder.index(
                &Index::create_unique("users", "users_email", ["email"]).comment("login")
            ),
            "CREATE UNIQUE INDEX `users_email` ON `users` (`email`) COMMENT 'login';"
        );
        assert_eq!(
            builder.index(&Index::rename("users", "a", "b")),
            "ALTER TABLE `users` RENAME INDEX `a` TO `b`;"
        );
        assert_eq!(
            builder.index(&Index::drop("users", "a")),
            "DROP INDEX `a` ON `users`;"
        );
    }

    #[test]
    fn test_plain_index_key_mysql_is_inline() {
        let config = Config::mysql();
        let table = Table::create("t").int("a").key(Index::simple("idx_a", ["a"]));
        assert_eq!(
            Builder::new(&config).table(&table),
            "CREATE TABLE `t` (`a` INT, INDEX `idx_a` (`a`));"
        );
    }

    #[test]
    fn test_plain_index_key_postgres_is_standalone() {
        let config = Config::postgres();
        let builder = Builder::new(&config);

        let table = Table::create("t")
            .key(Index::simple("idx_a", ["a"]))
            .int("a")
            .int("b")
            .key(Index::simple("idx_b", ["b"]));
        assert_eq!(
            builder.table(&table),
            "CREATE TABLE \"t\" (\"a\" INT, \"b\" INT);\n\
             CREATE INDEX \"idx_a\" ON \"t\" (\"a\");\n\
             CREATE INDEX \"idx_b\" ON \"t\" (\"b\");"
        );

        let table = Table::alter("t")
            .int("c")
            .key(Index::simple("idx_c", ["c"]))
            .key(Index::unique(["c"]));
        assert_eq!(
            builder.table(&table),
            "ALTER TABLE \"t\" ADD COLUMN \"c\" INT;\n\
             CREATE INDEX \"idx_c\" ON \"t\" (\"c\");\n\
             ALTER TABLE \"t\" ADD UNIQUE (\"c\");"
        );
    }

    #[test]
    fn test_index_postgres() {
        let config = Config::postgres();
        let builder = Builder::new(&config);
        assert_eq!(
            builder.index(
                &Index::create("users", "users_name", ["last_name", "first_name"])
                    .optional()
                    .comment("ignored")
            ),
            "CREATE INDEX IF NOT EXISTS \"users_name\" ON \"users\" (\"last_name\", \"first_name\");"
        );
        assert_eq!(
            builder.index(&Index::rename("users", "a", "b")),
            "ALTER INDEX \"a\" RENAME TO \"b\";"
        );
        assert_eq!(
            builder.index(&Index::drop("users", "a").optional()),
            "DROP INDEX IF EXISTS \"a\";"
        );
    }
}
