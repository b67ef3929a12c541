use crate::{Result, YamavelError};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Definition of a single entity in the schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDefinition {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: IndexMap<String, ColumnSpec>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relations: IndexMap<String, RelationSpec>,
    #[serde(default)]
    pub filament: FilamentSpec,
}

// `columns:` with no body is an empty mapping, not a type error.
fn null_as_empty<'de, D, V>(deserializer: D) -> std::result::Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Column specification for migrations.
///
/// `column_type` stays a raw string until emission so that an unknown type
/// is reported against the column that carries it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSpec {
    #[serde(rename = "type", default)]
    pub column_type: Option<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub foreign: Option<String>,
}

impl ColumnSpec {
    /// Resolve the declared type, defaulting to `string` when absent.
    pub fn kind(&self, column: &str) -> Result<ColumnType> {
        match self.column_type.as_deref() {
            None => Ok(ColumnType::String),
            Some(raw) => raw
                .parse()
                .map_err(|_| YamavelError::UnsupportedColumnType {
                    column: column.to_string(),
                    column_type: raw.to_string(),
                }),
        }
    }
}

/// Relation specification for model accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationSpec {
    #[serde(rename = "type", default)]
    pub relation_type: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl RelationSpec {
    pub fn kind(&self, relation: &str) -> Result<RelationType> {
        let raw = self.relation_type.as_deref().unwrap_or_default();
        raw.parse().map_err(|_| YamavelError::InvalidRelationType {
            relation: relation.to_string(),
            relation_type: raw.to_string(),
        })
    }

    pub fn related_model(&self, relation: &str) -> Result<&str> {
        self.model
            .as_deref()
            .filter(|model| !model.is_empty())
            .ok_or_else(|| YamavelError::missing_key(format!("relation '{relation}'"), "model"))
    }
}

/// Admin panel layout for the entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilamentSpec {
    #[serde(default)]
    pub form: FormSpec,
    #[serde(default)]
    pub table: TableSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSpec {
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Column types understood by the migration emitter. Each maps to the
/// schema builder method of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Id,
    String,
    Text,
    Integer,
    Timestamps,
    UnsignedBigInteger,
}

impl ColumnType {
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Id,
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Integer,
        ColumnType::Timestamps,
        ColumnType::UnsignedBigInteger,
    ];

    pub fn method(self) -> &'static str {
        match self {
            ColumnType::Id => "id",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Timestamps => "timestamps",
            ColumnType::UnsignedBigInteger => "unsignedBigInteger",
        }
    }

    /// Whether the column is managed by the framework rather than assigned
    /// by users, and so never mass-assignable.
    pub fn is_managed(self) -> bool {
        matches!(self, ColumnType::Id | ColumnType::Timestamps)
    }

    pub fn accepts_length(self) -> bool {
        matches!(self, ColumnType::String)
    }
}

impl FromStr for ColumnType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|kind| kind.method() == s)
            .ok_or(())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Eloquent relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    HasMany,
    BelongsTo,
    HasOne,
    BelongsToMany,
}

impl RelationType {
    pub const ALL: [RelationType; 4] = [
        RelationType::HasMany,
        RelationType::BelongsTo,
        RelationType::HasOne,
        RelationType::BelongsToMany,
    ];

    pub fn method(self) -> &'static str {
        match self {
            RelationType::HasMany => "hasMany",
            RelationType::BelongsTo => "belongsTo",
            RelationType::HasOne => "hasOne",
            RelationType::BelongsToMany => "belongsToMany",
        }
    }
}

impl FromStr for RelationType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|kind| kind.method() == s)
            .ok_or(())
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
