pub mod config;
pub mod error;
pub mod schema;

pub use config::{ProjectConfig, CONFIG_FILE};
pub use error::{Result, YamavelError};
pub use indexmap::IndexMap;
pub use schema::{
    ColumnSpec, ColumnType, Entity, EntityDefinition, FilamentSpec, RelationSpec, RelationType,
    Schema,
};
