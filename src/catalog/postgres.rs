// autobackup/src/catalog/postgres.rs
use sqlx::PgPool;

use super::{like_prefix_pattern, Catalog, Selection};

const BACKUPS_QUERY: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = 'public'
      AND table_name LIKE $1 ESCAPE '\'
    ORDER BY table_name
"#;

const SOURCES_QUERY: &str = r#"
    SELECT table_name::text
    FROM information_schema.tables
    WHERE table_schema = 'public'
      AND table_name NOT LIKE $1 ESCAPE '\'
    ORDER BY table_name
"#;

/// Catalog of the `public` schema, borrowed from a pool owned by the caller.
pub struct PgCatalog<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCatalog<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl Catalog for PgCatalog<'_> {
    async fn list_tables(
        &self,
        prefix: &str,
        selection: Selection,
    ) -> Result<Vec<String>, sqlx::Error> {
        let query = match selection {
            Selection::Backups => BACKUPS_QUERY,
            Selection::Sources => SOURCES_QUERY,
        };

        let mut names: Vec<String> = sqlx::query_scalar(query)
            .bind(like_prefix_pattern(prefix))
            .fetch_all(self.pool)
            .await?;
        // LIKE follows the column collation; the split itself is byte-wise.
        names.retain(|name| selection.matches(prefix, name));

        tracing::debug!(?selection, count = names.len(), "Listed catalog tables");
        Ok(names)
    }

    async fn execute(&self, statement: &str) -> Result<(), sqlx::Error> {
        tracing::debug!(%statement, "Executing");
        sqlx::query(statement).execute(self.pool).await?;
        Ok(())
    }
}
