// autobackup/src/catalog/memory.rs
//! In-memory catalog used by the backup pass tests.

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

use super::{Catalog, Selection};

#[derive(Default)]
pub struct MemoryCatalog {
    tables: Mutex<BTreeSet<String>>,
    executed: Mutex<Vec<String>>,
    failing_statements: HashSet<String>,
    fail_listing: Option<Selection>,
}

impl MemoryCatalog {
    pub fn with_tables(names: &[&str]) -> Self {
        Self {
            tables: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Makes `execute` fail for any statement mentioning this quoted name.
    pub fn fail_statements_on(mut self, table: &str) -> Self {
        self.failing_statements.insert(format!("\"{}\"", table));
        self
    }

    pub fn fail_listing(mut self, selection: Selection) -> Self {
        self.fail_listing = Some(selection);
        self
    }

    pub fn tables(&self) -> Vec<String> {
        self.tables.lock().unwrap().iter().cloned().collect()
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    fn apply(&self, statement: &str) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(rest) = statement.strip_prefix("DROP TABLE IF EXISTS ") {
            tables.remove(&unquote(rest));
            return Ok(());
        }
        if let Some(rest) = statement.strip_prefix("CREATE TABLE ") {
            let (target, source) = rest
                .split_once(" AS SELECT * FROM ")
                .ok_or_else(|| sqlx::Error::Protocol(format!("unsupported: {}", statement)))?;
            let (target, source) = (unquote(target), unquote(source));
            if !tables.contains(&source) {
                return Err(sqlx::Error::Protocol(format!(
                    "relation \"{}\" does not exist",
                    source
                )));
            }
            if !tables.insert(target.clone()) {
                return Err(sqlx::Error::Protocol(format!(
                    "relation \"{}\" already exists",
                    target
                )));
            }
            return Ok(());
        }
        Err(sqlx::Error::Protocol(format!("unsupported: {}", statement)))
    }
}

fn unquote(quoted: &str) -> String {
    quoted
        .trim()
        .trim_start_matches('"')
        .trim_end_matches('"')
        .replace("\"\"", "\"")
}

impl Catalog for MemoryCatalog {
    async fn list_tables(
        &self,
        prefix: &str,
        selection: Selection,
    ) -> Result<Vec<String>, sqlx::Error> {
        if self.fail_listing == Some(selection) {
            return Err(sqlx::Error::Protocol("catalog unavailable".to_string()));
        }
        Ok(self
            .tables
            .lock()
            .unwrap()
            .iter()
            .filter(|name| selection.matches(prefix, name))
            .cloned()
            .collect())
    }

    async fn execute(&self, statement: &str) -> Result<(), sqlx::Error> {
        self.executed.lock().unwrap().push(statement.to_string());
        if self
            .failing_statements
            .iter()
            .any(|quoted| statement.contains(quoted.as_str()))
        {
            return Err(sqlx::Error::Protocol(format!("permission denied: {}", statement)));
        }
        self.apply(statement)
    }
}
