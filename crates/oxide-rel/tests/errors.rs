use oxide_rel::{Config, ConstraintKind, Dialect, DriverError, Error};

fn constraint(err: &Error) -> Option<(ConstraintKind, &str)> {
    match err {
        Error::Constraint { kind, key, .. } => Some((*kind, key.as_str())),
        _ => None,
    }
}

#[test]
fn test_presets_map_unique_violations() {
    let cases = [
        (
            Config::postgres(),
            DriverError::new(
                "pq: duplicate key value violates unique constraint \"users_email_key\"",
            ),
            "users_email_key",
        ),
        (
            Config::mysql(),
            DriverError::new("Error 1062: Duplicate entry 'a@b.c' for key 'users_email'"),
            "users_email",
        ),
        (
            Config::sqlite(),
            DriverError::with_code(2067, "UNIQUE constraint failed: users.email"),
            "users.email",
        ),
    ];

    for (config, driver_error, key) in cases {
        let err = config.map_error(driver_error);
        assert_eq!(constraint(&err), Some((ConstraintKind::Unique, key)));
    }
}

#[test]
fn test_constraint_error_display() {
    let err = Config::mysql().map_error(DriverError::new(
        "Error 1452: Cannot add or update a child row: a foreign key constraint fails \
         (`db`.`books`, CONSTRAINT `books_author_fk` FOREIGN KEY (`author_id`))",
    ));
    assert_eq!(
        err.to_string(),
        "foreign key constraint 'books_author_fk' violated"
    );
}

#[test]
fn test_unrecognized_errors_pass_through() {
    let err = Config::postgres().map_error(DriverError::new("connection refused"));
    assert!(matches!(err, Error::Driver(ref e) if e.message == "connection refused"));
    assert_eq!(err.to_string(), "Driver error: connection refused");
}

#[test]
fn test_dialect_names() {
    assert_eq!("postgresql".parse::<Dialect>().unwrap(), Dialect::Postgres);
    assert_eq!("SQLite3".parse::<Dialect>().unwrap(), Dialect::Sqlite);
    assert_eq!(Dialect::MySql.to_string(), "mysql");
    assert!(matches!(
        "oracle".parse::<Dialect>(),
        Err(Error::UnknownDialect(name)) if name == "oracle"
    ));
}
