use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a schema or generating scaffolding from it.
#[derive(Debug, Error)]
pub enum YamavelError {
    #[error("The YAML file '{}' does not exist.", path.display())]
    MissingFile { path: PathBuf },

    #[error("Invalid YAML schema: {message}")]
    InvalidDocument { message: String },

    #[error("Missing required key '{key}' for '{entity}'.")]
    MissingRequiredKey { entity: String, key: String },

    #[error("Unsupported column type '{column_type}' for column '{column}'.")]
    UnsupportedColumnType { column: String, column_type: String },

    #[error("Invalid relationship type '{relation_type}' for relation '{relation}'.")]
    InvalidRelationType {
        relation: String,
        relation_type: String,
    },

    #[error("Failed to read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{problems} problem(s) found in schema '{}'.", path.display())]
    InvalidSchema { path: PathBuf, problems: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl YamavelError {
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    pub fn missing_key(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingRequiredKey {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Errors raised before any generation can start: the schema file is
    /// absent or cannot be parsed.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::MissingFile { .. } | Self::InvalidDocument { .. })
    }

    /// Errors caused by the content of an entity definition.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredKey { .. }
                | Self::UnsupportedColumnType { .. }
                | Self::InvalidRelationType { .. }
                | Self::InvalidSchema { .. }
        )
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

pub type Result<T, E = YamavelError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = YamavelError::MissingFile {
            path: PathBuf::from("schema.yaml"),
        };
        assert!(missing.is_load_error());
        assert!(!missing.is_validation());

        let key = YamavelError::missing_key("User", "columns");
        assert!(key.is_validation());
        assert!(!key.is_load_error());

        let write = YamavelError::write(
            "app/Models/User.php",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(write.is_io());
    }

    #[test]
    fn test_error_messages() {
        let err = YamavelError::UnsupportedColumnType {
            column: "id".to_string(),
            column_type: "invalid_type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported column type 'invalid_type' for column 'id'."
        );

        let err = YamavelError::missing_key("User", "columns");
        assert_eq!(err.to_string(), "Missing required key 'columns' for 'User'.");

        let err = YamavelError::InvalidSchema {
            path: PathBuf::from("schema.yaml"),
            problems: 2,
        };
        assert_eq!(err.to_string(), "2 problem(s) found in schema 'schema.yaml'.");
        assert!(err.is_validation());
        assert!(!err.is_load_error());
    }
}
