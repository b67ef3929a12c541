use crate::clock::MigrationClock;
use crate::ledger::SchemaLedger;
use crate::migration::{
    create_file_name, render_columns, render_drop_columns, resolve_columns, update_file_name,
};
use crate::model::{render_fillable, render_hidden, render_relations};
use crate::probe::{ArtifactProbe, LedgerProbe, MigrationScanner};
use crate::resource::{render_form_fields, render_table_columns};
use crate::templates::{render_template, TemplateKind, TemplateStore};
use crate::writer::{CodeWriter, WriteOutcome};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use yamavel_core::{Entity, ProjectConfig, Result, YamavelError};

/// Attempts at finding a free migration file name before giving up.
const MAX_MIGRATION_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CreateMigration,
    UpdateMigration,
    Model,
    Resource,
}

impl ArtifactKind {
    pub fn template(self) -> TemplateKind {
        match self {
            ArtifactKind::CreateMigration => TemplateKind::CreateMigration,
            ArtifactKind::UpdateMigration => TemplateKind::UpdateMigration,
            ArtifactKind::Model => TemplateKind::Model,
            ArtifactKind::Resource => TemplateKind::Resource,
        }
    }

    pub fn is_migration(self) -> bool {
        matches!(
            self,
            ArtifactKind::CreateMigration | ArtifactKind::UpdateMigration
        )
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::CreateMigration => "create migration",
            ArtifactKind::UpdateMigration => "update migration",
            ArtifactKind::Model => "model",
            ArtifactKind::Resource => "filament resource",
        };
        f.write_str(label)
    }
}

/// A file the generator wrote or deliberately left alone.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub entity: String,
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
}

/// Emits the migration, model and resource for a single entity.
pub struct EntityGenerator<'a> {
    project_root: &'a Path,
    config: &'a ProjectConfig,
    templates: &'a TemplateStore,
    writer: &'a CodeWriter,
    entity: &'a Entity,
}

impl<'a> EntityGenerator<'a> {
    pub fn new(
        project_root: &'a Path,
        config: &'a ProjectConfig,
        templates: &'a TemplateStore,
        writer: &'a CodeWriter,
        entity: &'a Entity,
    ) -> Self {
        Self {
            project_root,
            config,
            templates,
            writer,
            entity,
        }
    }

    /// Write a create migration for a new table, or an update migration
    /// with the columns the table lacks.
    pub fn generate_migration(
        &self,
        ledger: &mut SchemaLedger,
        scanner: &MigrationScanner,
        clock: &mut MigrationClock,
    ) -> Result<GeneratedArtifact> {
        let table = self.entity.table_name();
        let columns = resolve_columns(self.entity.columns()?)?;

        let (kind, pending) = {
            let probe = LedgerProbe::new(ledger, scanner);
            if probe.table_exists(&table)? {
                let mut pending = Vec::new();
                for column in columns {
                    if probe.column_exists(&table, column.name)? {
                        debug!(table = %table, column = column.name, "column already exists");
                    } else {
                        pending.push(column);
                    }
                }
                (ArtifactKind::UpdateMigration, pending)
            } else {
                (ArtifactKind::CreateMigration, columns)
            }
        };

        // migrations only ever append, so an up-to-date table still gets one
        if pending.is_empty() {
            info!(table = %table, "no new columns, writing empty update migration");
        }

        let template = self.templates.load(kind.template())?;
        let rendered_columns = render_columns(&pending);
        let dropped_columns = render_drop_columns(&pending);
        let content = render_template(
            &template,
            &[
                ("table", table.as_str()),
                ("columns", rendered_columns.as_str()),
                ("dropColumns", dropped_columns.as_str()),
            ],
        );

        let (path, file_name) = self.write_migration(kind, &table, &content, clock)?;
        if kind == ArtifactKind::CreateMigration && ledger.forget(&table).is_some() {
            debug!(table = %table, "replaced stale ledger entry");
        }
        ledger.record(&table, &file_name, pending.iter().map(|c| c.name));
        ledger.save()?;

        info!(path = %path.display(), "{kind} written");
        Ok(self.artifact(kind, path, WriteOutcome::Written))
    }

    fn write_migration(
        &self,
        kind: ArtifactKind,
        table: &str,
        content: &str,
        clock: &mut MigrationClock,
    ) -> Result<(PathBuf, String)> {
        let dir = self.config.migrations_path(self.project_root);
        let extension = &self.config.extension;

        for _ in 0..MAX_MIGRATION_ATTEMPTS {
            let stamp = clock.next_stamp();
            let file_name = match kind {
                ArtifactKind::UpdateMigration => update_file_name(&stamp, table, extension),
                _ => create_file_name(&stamp, table, extension),
            };
            let path = dir.join(&file_name);

            match self.writer.write_new(&path, content)? {
                WriteOutcome::Written => return Ok((path, file_name)),
                _ => debug!(path = %path.display(), "migration name taken, advancing timestamp"),
            }
        }

        Err(YamavelError::write(
            dir,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("no free migration name for '{table}' after {MAX_MIGRATION_ATTEMPTS} attempts"),
            ),
        ))
    }

    /// Write the model class unless it already exists.
    pub fn generate_model(&self) -> Result<GeneratedArtifact> {
        let table = self.entity.table_name();
        let columns = self.entity.columns()?;
        let relations = render_relations(self.entity.relations())?;
        let fillable = render_fillable(columns)?;
        let hidden = render_hidden(columns);

        let template = self.templates.load(TemplateKind::Model)?;
        let content = render_template(
            &template,
            &[
                ("model", self.entity.name.as_str()),
                ("table", table.as_str()),
                ("fillable", fillable.as_str()),
                ("hidden", hidden.as_str()),
                ("relations", relations.as_str()),
            ],
        );

        let path = self
            .config
            .models_path(self.project_root)
            .join(self.config.file_name(&self.entity.name));
        self.write_once(ArtifactKind::Model, path, &content)
    }

    /// Write the Filament resource class unless it already exists.
    pub fn generate_resource(&self) -> Result<GeneratedArtifact> {
        let form_fields = render_form_fields(self.entity.form_fields());
        let table_columns = render_table_columns(self.entity.table_columns());

        let template = self.templates.load(TemplateKind::Resource)?;
        let content = render_template(
            &template,
            &[
                ("model", self.entity.name.as_str()),
                ("formFields", form_fields.as_str()),
                ("tableColumns", table_columns.as_str()),
            ],
        );

        let path = self
            .config
            .resources_path(self.project_root)
            .join(self.config.file_name(&format!("{}Resource", self.entity.name)));
        self.write_once(ArtifactKind::Resource, path, &content)
    }

    fn write_once(&self, kind: ArtifactKind, path: PathBuf, content: &str) -> Result<GeneratedArtifact> {
        let outcome = self.writer.write_if_absent(&path, content)?;
        match outcome {
            WriteOutcome::Skipped => warn!(
                path = %path.display(),
                "{kind} for {} already exists, skipping", self.entity.name
            ),
            _ => info!(path = %path.display(), "{kind} written"),
        }
        Ok(self.artifact(kind, path, outcome))
    }

    fn artifact(&self, kind: ArtifactKind, path: PathBuf, outcome: WriteOutcome) -> GeneratedArtifact {
        GeneratedArtifact {
            entity: self.entity.name.clone(),
            kind,
            path,
            outcome,
        }
    }
}
