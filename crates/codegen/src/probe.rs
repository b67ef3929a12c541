use crate::ledger::{SchemaLedger, TableRecord};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use yamavel_core::{ProjectConfig, Result, YamavelError};

/// Answers whether a table or column already exists in the target project.
pub trait ArtifactProbe {
    fn table_exists(&self, table: &str) -> Result<bool>;
    fn column_exists(&self, table: &str, column: &str) -> Result<bool>;
}

/// Detects tables and columns by reading previously generated migrations.
///
/// A table exists when a migration file name contains
/// `create_<table>_table`. A column exists when one of the table's create
/// or update migrations calls a builder method with the column name as its
/// first argument. This is a textual heuristic; unusual formatting in
/// hand-written migrations can hide a column.
#[derive(Debug, Clone)]
pub struct MigrationScanner {
    migrations_dir: PathBuf,
}

impl MigrationScanner {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }

    /// Scanner for the default Laravel layout under `project_root`.
    pub fn for_root(project_root: &Path) -> Self {
        Self::new(ProjectConfig::default().migrations_path(project_root))
    }

    fn file_names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.migrations_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(YamavelError::read(&self.migrations_dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| YamavelError::read(&self.migrations_dir, e))?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl ArtifactProbe for MigrationScanner {
    fn table_exists(&self, table: &str) -> Result<bool> {
        let marker = create_marker(table);
        Ok(self.file_names()?.iter().any(|name| name.contains(&marker)))
    }

    fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        let create = create_marker(table);
        let update = update_marker(table);
        let pattern = column_pattern(column)?;

        for name in self.file_names()? {
            if !name.contains(&create) && !name.contains(&update) {
                continue;
            }

            let path = self.migrations_dir.join(&name);
            let content = fs::read_to_string(&path).map_err(|e| YamavelError::read(&path, e))?;
            if pattern.is_match(&content) {
                tracing::debug!(table, column, migration = %name, "column found in migration");
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Ledger-first probe that falls back to scanning migration text for
/// anything the ledger has not seen.
///
/// A ledger entry only counts while at least one of the migrations it
/// recorded is still in the migrations directory.
pub struct LedgerProbe<'a> {
    ledger: &'a SchemaLedger,
    scanner: &'a MigrationScanner,
}

impl<'a> LedgerProbe<'a> {
    pub fn new(ledger: &'a SchemaLedger, scanner: &'a MigrationScanner) -> Self {
        Self { ledger, scanner }
    }

    /// The ledger's record for `table`, unless none of its migrations
    /// remain on disk.
    fn live_record(&self, table: &str) -> Result<Option<&'a TableRecord>> {
        let Some(record) = self.ledger.table(table) else {
            return Ok(None);
        };

        let present = self.scanner.file_names()?;
        if record.migrations.iter().any(|name| present.contains(name)) {
            Ok(Some(record))
        } else {
            tracing::debug!(table, "ledger entry has no migrations left on disk, ignoring it");
            Ok(None)
        }
    }
}

impl ArtifactProbe for LedgerProbe<'_> {
    fn table_exists(&self, table: &str) -> Result<bool> {
        if self.live_record(table)?.is_some() {
            return Ok(true);
        }
        self.scanner.table_exists(table)
    }

    fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        let recorded = self
            .live_record(table)?
            .is_some_and(|record| record.columns.iter().any(|c| c == column));
        if recorded {
            return Ok(true);
        }
        self.scanner.column_exists(table, column)
    }
}

/// Whether `root`'s default migrations directory creates `table`.
pub fn table_exists(root: &Path, table: &str) -> Result<bool> {
    MigrationScanner::for_root(root).table_exists(table)
}

/// Whether a migration for `table` under `root` defines `column`.
pub fn column_exists(root: &Path, table: &str, column: &str) -> Result<bool> {
    MigrationScanner::for_root(root).column_exists(table, column)
}

pub(crate) fn create_marker(table: &str) -> String {
    format!("create_{table}_table")
}

pub(crate) fn update_marker(table: &str) -> String {
    format!("update_{table}_table")
}

fn column_pattern(column: &str) -> Result<Regex> {
    Regex::new(&format!(
        r#"\$table->\w+\(\s*['"]{}['"]"#,
        regex::escape(column)
    ))
    .map_err(|e| YamavelError::invalid_document(format!("column name '{column}': {e}")))
}
