//! Schema document: loading, table naming and structural validation.

mod definition;

pub use definition::*;

use crate::{Result, YamavelError};
use indexmap::IndexMap;
use inflector::Inflector;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// A named entity: produces one migration, one model and one admin resource.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub definition: EntityDefinition,
}

impl Entity {
    pub fn new(name: impl Into<String>, definition: EntityDefinition) -> Self {
        Self {
            name: name.into(),
            definition,
        }
    }

    /// Explicit `table`, or the pluralized snake-case entity name.
    pub fn table_name(&self) -> String {
        match self.definition.table.as_deref() {
            Some(table) if !table.is_empty() => table.to_string(),
            _ => self.name.to_table_case(),
        }
    }

    /// The entity's columns; an absent or empty `columns` key is an error.
    pub fn columns(&self) -> Result<&IndexMap<String, ColumnSpec>> {
        if self.definition.columns.is_empty() {
            return Err(YamavelError::missing_key(&self.name, "columns"));
        }
        Ok(&self.definition.columns)
    }

    pub fn relations(&self) -> &IndexMap<String, RelationSpec> {
        &self.definition.relations
    }

    pub fn form_fields(&self) -> &[String] {
        &self.definition.filament.form.fields
    }

    pub fn table_columns(&self) -> &[String] {
        &self.definition.filament.table.columns
    }

    /// Every structural problem in this entity, in document order.
    pub fn validate(&self) -> Vec<YamavelError> {
        let mut errors = Vec::new();

        match self.columns() {
            Ok(columns) => {
                for (name, spec) in columns.iter() {
                    if let Err(err) = spec.kind(name) {
                        errors.push(err);
                    }
                }
            }
            Err(err) => errors.push(err),
        }

        for (name, spec) in self.relations().iter() {
            if let Err(err) = spec.kind(name) {
                errors.push(err);
            }
            if let Err(err) = spec.related_model(name) {
                errors.push(err);
            }
        }

        errors
    }
}

/// The loaded schema document, in source order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entities: Vec<Entity>,
}

impl Schema {
    /// Load a schema document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(YamavelError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| YamavelError::read(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse a schema document. The top level must map entity names to
    /// mappings; an empty document is an empty schema.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(yaml)
            .map_err(|e| YamavelError::invalid_document(format!("Error parsing YAML file: {e}")))?;

        let mapping = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(YamavelError::invalid_document(format!(
                    "expected a mapping of entity names to definitions, found {}",
                    describe(&other)
                )))
            }
        };

        let mut entities = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = match key {
                Value::String(name) => name,
                other => {
                    return Err(YamavelError::invalid_document(format!(
                        "entity names must be strings, found {}",
                        describe(&other)
                    )))
                }
            };

            if !value.is_mapping() {
                return Err(YamavelError::invalid_document(format!(
                    "entity '{name}' must be a mapping, found {}",
                    describe(&value)
                )));
            }

            let definition: EntityDefinition = serde_yaml::from_value(value)
                .map_err(|e| YamavelError::invalid_document(format!("entity '{name}': {e}")))?;
            entities.push(Entity::new(name, definition));
        }

        Ok(Self { entities })
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Validate the whole document at once, collecting every error instead
    /// of stopping at the first.
    pub fn validate(&self) -> Vec<YamavelError> {
        self.entities.iter().flat_map(Entity::validate).collect()
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
