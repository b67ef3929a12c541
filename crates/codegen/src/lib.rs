pub mod clock;
pub mod generator;
pub mod ledger;
pub mod migration;
pub mod model;
pub mod probe;
pub mod resource;
pub mod templates;
pub mod writer;

pub use clock::MigrationClock;
pub use generator::*;
pub use ledger::SchemaLedger;
pub use probe::{ArtifactProbe, LedgerProbe, MigrationScanner};
pub use templates::{TemplateKind, TemplateStore};
pub use writer::*;

use std::path::{Path, PathBuf};
use yamavel_core::{ProjectConfig, Result, Schema};

/// Every artifact touched by one generation run, in the order handled.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub artifacts: Vec<GeneratedArtifact>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == WriteOutcome::Written)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts
            .iter()
            .filter(|a| a.outcome == WriteOutcome::Skipped)
    }

    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }

    pub fn migrations(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter().filter(|a| a.kind.is_migration())
    }
}

/// Loads a schema and generates scaffolding for every entity in a project.
pub struct Generator {
    project_root: PathBuf,
    config: ProjectConfig,
    schema: Schema,
    templates: TemplateStore,
    writer: CodeWriter,
}

impl Generator {
    /// Load the schema at `schema_path` and the configuration of
    /// `project_root`. Fails before any file is touched if either cannot be
    /// loaded.
    pub fn new(schema_path: impl AsRef<Path>, project_root: impl Into<PathBuf>) -> Result<Self> {
        let schema = Schema::load(schema_path)?;
        let project_root = project_root.into();
        let config = ProjectConfig::discover(&project_root, None)?;
        Ok(Self::from_schema(schema, project_root, config))
    }

    pub fn with_config(
        schema_path: impl AsRef<Path>,
        project_root: impl Into<PathBuf>,
        config: ProjectConfig,
    ) -> Result<Self> {
        let schema = Schema::load(schema_path)?;
        Ok(Self::from_schema(schema, project_root, config))
    }

    pub fn from_schema(schema: Schema, project_root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        let project_root = project_root.into();
        let templates = TemplateStore::new(config.stubs_path(&project_root));
        Self {
            project_root,
            config,
            schema,
            templates,
            writer: CodeWriter::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<GenerationReport> {
        self.generate_with_clock(&mut MigrationClock::system())
    }

    /// Generate every entity in document order. The first error aborts the
    /// run; files written for earlier entities stay on disk.
    pub fn generate_with_clock(&self, clock: &mut MigrationClock) -> Result<GenerationReport> {
        let mut ledger = SchemaLedger::load(self.config.ledger_path(&self.project_root))?;
        let scanner = MigrationScanner::new(self.config.migrations_path(&self.project_root));
        let mut report = GenerationReport::default();

        for entity in self.schema.entities() {
            let span = tracing::info_span!("entity", name = %entity.name);
            let _enter = span.enter();

            // nothing is written for an entity with any structural error
            if let Some(err) = entity.validate().into_iter().next() {
                return Err(err);
            }

            let generator = EntityGenerator::new(
                &self.project_root,
                &self.config,
                &self.templates,
                &self.writer,
                entity,
            );

            report
                .artifacts
                .push(generator.generate_migration(&mut ledger, &scanner, clock)?);
            report.artifacts.push(generator.generate_model()?);
            report.artifacts.push(generator.generate_resource()?);
        }

        Ok(report)
    }
}
