use crate::{Result, YamavelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the project root.
pub const CONFIG_FILE: &str = ".yamavel.yaml";

/// Output layout and stub overrides for a target project. Every path is
/// relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub migrations_dir: PathBuf,
    pub models_dir: PathBuf,
    pub resources_dir: PathBuf,
    /// Extension of every generated file, without the dot.
    pub extension: String,
    /// Directory holding `*.stub` files that replace the built-in templates.
    pub stubs_dir: Option<PathBuf>,
    pub ledger_file: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("database/migrations"),
            models_dir: PathBuf::from("app/Models"),
            resources_dir: PathBuf::from("app/Filament/Resources"),
            extension: "php".to_string(),
            stubs_dir: None,
            ledger_file: PathBuf::from("database/.yamavel/ledger.json"),
        }
    }
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| YamavelError::read(path, e))?;
        Self::from_yaml(&content)
            .map_err(|e| YamavelError::configuration(format!("{}: {e}", path.display())))
    }

    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes as unit, which `default` does not cover.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Resolve the configuration for a project: an explicit file wins, then
    /// `.yamavel.yaml` in the root, then the defaults.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(YamavelError::configuration(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            return Self::load(path);
        }

        let default_path = project_root.join(CONFIG_FILE);
        if default_path.exists() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn migrations_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.migrations_dir)
    }

    pub fn models_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.models_dir)
    }

    pub fn resources_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.resources_dir)
    }

    pub fn ledger_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.ledger_file)
    }

    pub fn stubs_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.stubs_dir.as_ref().map(|dir| project_root.join(dir))
    }

    /// File name for a generated artifact, e.g. `User` → `User.php`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}
