// autobackup/src/catalog/mod.rs
//! Access to the table catalog of the target schema.
//!
//! The backup passes only need two things from the database: the list of
//! table names on either side of the prefix, and a way to run one DDL
//! statement. Everything else (SQL text, identifier quoting, run-mode
//! gating) lives in the passes themselves.

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use self::postgres::PgCatalog;

/// Which side of the prefix split to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tables whose name starts with the prefix (existing backups).
    Backups,
    /// Tables whose name does not start with the prefix (backup sources).
    Sources,
}

impl Selection {
    /// Whether `table_name` falls on this side of the split.
    pub fn matches(self, prefix: &str, table_name: &str) -> bool {
        match self {
            Selection::Backups => table_name.starts_with(prefix),
            Selection::Sources => !table_name.starts_with(prefix),
        }
    }
}

pub trait Catalog {
    /// Lists base tables of the target schema on the requested side of `prefix`.
    async fn list_tables(
        &self,
        prefix: &str,
        selection: Selection,
    ) -> Result<Vec<String>, sqlx::Error>;

    /// Executes one DDL statement as its own implicit transaction.
    async fn execute(&self, statement: &str) -> Result<(), sqlx::Error>;
}

/// Builds a `LIKE` pattern matching names that start with `prefix` literally.
///
/// `_` is a single-character wildcard in `LIKE`, and prefixes are allowed to
/// contain it, so every metacharacter is escaped with `\`.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 4);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_prefix_pattern("autobackup"), "autobackup%");
        assert_eq!(like_prefix_pattern("auto_bk"), "auto\\_bk%");
        assert_eq!(like_prefix_pattern("a%b\\c"), "a\\%b\\\\c%");
    }

    #[test]
    fn test_selection_is_a_partition() {
        let names = ["users", "autobackup", "autobackup_users_20230101", "auto", "xautobackup"];
        for name in names {
            let in_backups = Selection::Backups.matches("autobackup", name);
            let in_sources = Selection::Sources.matches("autobackup", name);
            assert!(in_backups ^ in_sources, "{} must be on exactly one side", name);
        }
    }
}
