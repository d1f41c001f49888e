mod common;

use common::all_configs;
use oxide_rel::{Builder, Column, ColumnSpec, ColumnType, Config, Index, Table};

fn events() -> Table {
    Table::create("events")
        .id("id")
        .string("title")
        .datetime("starts_at")
        .json("payload")
}

#[test]
fn test_create_table_every_dialect() {
    let expected = [
        "CREATE TABLE `events` (`id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, \
         `title` VARCHAR(255), `starts_at` DATETIME, `payload` JSON);",
        "CREATE TABLE \"events\" (\"id\" SERIAL NOT NULL PRIMARY KEY, \
         \"title\" VARCHAR(255), \"starts_at\" TIMESTAMPTZ, \"payload\" JSON);",
        "CREATE TABLE `events` (`id` INTEGER PRIMARY KEY AUTOINCREMENT, \
         `title` VARCHAR(255), `starts_at` DATETIME, `payload` JSON);",
    ];
    for (config, expected) in all_configs().iter().zip(expected) {
        assert_eq!(Builder::new(config).table(&events()), expected);
    }
}

#[test]
fn test_unsigned_is_mysql_only() {
    let table =
        Table::create("counters").column(Column::new("hits", ColumnType::BigInt).unsigned());

    let mysql = Config::mysql();
    assert_eq!(
        Builder::new(&mysql).table(&table),
        "CREATE TABLE `counters` (`hits` BIGINT UNSIGNED);"
    );

    let postgres = Config::postgres();
    assert_eq!(
        Builder::new(&postgres).table(&table),
        "CREATE TABLE \"counters\" (\"hits\" BIGINT);"
    );
}

#[test]
fn test_alter_table_sqlite() {
    let config = Config::sqlite();
    let table = Table::alter("events")
        .rename_column("title", "name")
        .drop_column("payload");
    assert_eq!(
        Builder::new(&config).table(&table),
        "ALTER TABLE `events` RENAME COLUMN `title` TO `name`;\n\
         ALTER TABLE `events` DROP COLUMN `payload`;"
    );
}

#[test]
fn test_standalone_index_sqlite() {
    let config = Config::sqlite();
    let builder = Builder::new(&config);
    assert_eq!(
        builder.index(&Index::create("events", "events_starts", ["starts_at"])),
        "CREATE INDEX `events_starts` ON `events` (`starts_at`);"
    );
    assert_eq!(
        builder.index(&Index::drop("events", "events_starts")),
        "DROP INDEX `events_starts`;"
    );
}

#[test]
fn test_custom_column_mapping() {
    let config = Config::sqlite().with_map_column_fn(|column| match column.column_type {
        ColumnType::Json => ColumnSpec {
            sql_type: String::from("TEXT"),
            m: 0,
            n: 0,
            unsigned: false,
        },
        _ => oxide_rel::config::sqlite_column(column),
    });
    assert_eq!(
        Builder::new(&config).table(&Table::create("docs").json("body").int("rev")),
        "CREATE TABLE `docs` (`body` TEXT, `rev` INT);"
    );
}

#[test]
fn test_unsigned_id_mysql() {
    let config = Config::mysql();
    let table = Table::create("t").column(Column::new("id", ColumnType::Id).unsigned());
    assert_eq!(
        Builder::new(&config).table(&table),
        "CREATE TABLE `t` (`id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY);"
    );
}

#[test]
fn test_plain_index_key_sqlite() {
    let config = Config::sqlite();
    let table = Table::create("events")
        .datetime("starts_at")
        .key(Index::simple("events_starts", ["starts_at"]));
    assert_eq!(
        Builder::new(&config).table(&table),
        "CREATE TABLE `events` (`starts_at` DATETIME);\n\
         CREATE INDEX `events_starts` ON `events` (`starts_at`);"
    );
}
