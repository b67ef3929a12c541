//! Persistent record of the tables and columns the generator has already
//! emitted migrations for.
//!
//! The ledger is the primary source for "does this table / column exist";
//! scanning migration text is only the fallback for projects whose
//! migrations predate it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use yamavel_core::{Result, YamavelError};

const LEDGER_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Columns in the order they were first emitted.
    pub columns: Vec<String>,
    /// Migration file names that created or extended the table.
    pub migrations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct LedgerState {
    version: u32,
    #[serde(default)]
    tables: BTreeMap<String, TableRecord>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            version: LEDGER_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemaLedger {
    path: PathBuf,
    state: LedgerState,
}

impl SchemaLedger {
    /// Load the ledger at `path`; a missing file is an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| YamavelError::read(&path, io::Error::from(e)))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => LedgerState::default(),
            Err(e) => return Err(YamavelError::read(&path, e)),
        };

        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.state.tables.contains_key(table)
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.state
            .tables
            .get(table)
            .is_some_and(|record| record.columns.iter().any(|c| c == column))
    }

    pub fn table(&self, table: &str) -> Option<&TableRecord> {
        self.state.tables.get(table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.state.tables.keys().map(String::as_str)
    }

    /// Record a migration for `table` adding `columns`. Columns already
    /// known are not duplicated.
    pub fn record<'a>(
        &mut self,
        table: &str,
        migration: &str,
        columns: impl IntoIterator<Item = &'a str>,
    ) {
        let record = self.state.tables.entry(table.to_string()).or_default();
        for column in columns {
            if !record.columns.iter().any(|c| c == column) {
                record.columns.push(column.to_string());
            }
        }
        record.migrations.push(migration.to_string());
    }

    /// Drop everything recorded for `table`.
    pub fn forget(&mut self, table: &str) -> Option<TableRecord> {
        self.state.tables.remove(table)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| YamavelError::write(&self.path, e))?;
        }

        let content = serde_json::to_string_pretty(&self.state)
            .map_err(|e| YamavelError::write(&self.path, io::Error::from(e)))?;
        fs::write(&self.path, content + "\n").map_err(|e| YamavelError::write(&self.path, e))
    }
}
