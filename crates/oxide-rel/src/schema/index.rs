//! Index and key definitions.

/// What to do with a standalone index or a key inside `ALTER TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexOp {
    /// Create the index.
    #[default]
    Create,
    /// Rename the index.
    Rename,
    /// Drop the index.
    Drop,
}

/// Index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexType {
    /// Plain index.
    #[default]
    Simple,
    /// Unique index.
    Unique,
    /// Primary key.
    PrimaryKey,
    /// Foreign key.
    ForeignKey,
}

/// `ON DELETE` / `ON UPDATE` behaviour of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ForeignKeyAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ForeignKeyAction>,
}

/// An index, either standalone (`CREATE INDEX`) or as a key definition of a
/// [`Table`](super::Table).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    /// What to do with the index.
    pub op: IndexOp,
    /// Indexed table; unused for key definitions inside a table.
    pub table: String,
    /// Index or constraint name.
    pub name: String,
    /// New name, for renames.
    pub new_name: String,
    /// Index kind.
    pub index_type: IndexType,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Foreign key target.
    pub reference: Option<Reference>,
    /// `IF NOT EXISTS` on create, `IF EXISTS` on drop.
    pub optional: bool,
    /// Index comment.
    pub comment: String,
    /// Raw options appended to the definition.
    pub options: String,
}

fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

impl Index {
    /// `CREATE INDEX name ON table (columns)`
    #[must_use]
    pub fn create<S: Into<String>>(
        table: impl Into<String>,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            columns: strings(columns),
            ..Self::default()
        }
    }

    /// `CREATE UNIQUE INDEX name ON table (columns)`
    #[must_use]
    pub fn create_unique<S: Into<String>>(
        table: impl Into<String>,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            index_type: IndexType::Unique,
            ..Self::create(table, name, columns)
        }
    }

    /// Renames index `name` of `table`.
    #[must_use]
    pub fn rename(
        table: impl Into<String>,
        name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            op: IndexOp::Rename,
            table: table.into(),
            name: name.into(),
            new_name: new_name.into(),
            ..Self::default()
        }
    }

    /// Drops index `name` of `table`.
    #[must_use]
    pub fn drop(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            op: IndexOp::Drop,
            table: table.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// `INDEX name (columns)` key definition.
    #[must_use]
    pub fn simple<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: strings(columns),
            ..Self::default()
        }
    }

    /// `PRIMARY KEY (columns)` key definition.
    #[must_use]
    pub fn primary_key<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            index_type: IndexType::PrimaryKey,
            columns: strings(columns),
            ..Self::default()
        }
    }

    /// `UNIQUE (columns)` key definition.
    #[must_use]
    pub fn unique<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            index_type: IndexType::Unique,
            columns: strings(columns),
            ..Self::default()
        }
    }

    /// `FOREIGN KEY (columns) REFERENCES table (ref_columns)` key definition.
    #[must_use]
    pub fn foreign_key<S: Into<String>, R: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        table: impl Into<String>,
        ref_columns: impl IntoIterator<Item = R>,
    ) -> Self {
        Self {
            index_type: IndexType::ForeignKey,
            columns: strings(columns),
            reference: Some(Reference {
                table: table.into(),
                columns: strings(ref_columns),
                on_delete: None,
                on_update: None,
            }),
            ..Self::default()
        }
    }

    /// Sets the index or constraint name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the `ON DELETE` action of a foreign key.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        if let Some(reference) = self.reference.as_mut() {
            reference.on_delete = Some(action);
        }
        self
    }

    /// Sets the `ON UPDATE` action of a foreign key.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        if let Some(reference) = self.reference.as_mut() {
            reference.on_update = Some(action);
        }
        self
    }

    /// Adds `IF NOT EXISTS` / `IF EXISTS`.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets raw options.
    #[must_use]
    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_actions() {
        let fk = Index::foreign_key(["user_id"], "users", ["id"])
            .name("fk_user")
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::SetNull);

        assert_eq!(fk.index_type, IndexType::ForeignKey);
        assert_eq!(
            fk.reference,
            Some(Reference {
                table: String::from("users"),
                columns: vec![String::from("id")],
                on_delete: Some(ForeignKeyAction::Cascade),
                on_update: Some(ForeignKeyAction::SetNull),
            })
        );
    }

    #[test]
    fn test_actions_ignored_without_reference() {
        let index = Index::unique(["email"]).on_delete(ForeignKeyAction::Cascade);
        assert_eq!(index.reference, None);
    }

    #[test]
    fn test_foreign_key_action_sql() {
        assert_eq!(ForeignKeyAction::NoAction.as_sql(), "NO ACTION");
        assert_eq!(ForeignKeyAction::SetDefault.as_sql(), "SET DEFAULT");
    }

    #[test]
    fn test_standalone_constructors() {
        let index = Index::create_unique("users", "users_email", ["email"]).optional();
        assert_eq!(index.op, IndexOp::Create);
        assert_eq!(index.index_type, IndexType::Unique);
        assert!(index.optional);

        let renamed = Index::rename("users", "a", "b");
        assert_eq!((renamed.op, renamed.new_name.as_str()), (IndexOp::Rename, "b"));
    }
}
