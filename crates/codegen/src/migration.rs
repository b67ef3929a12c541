//! Migration body rendering.

use crate::probe::{create_marker, update_marker};
use yamavel_core::{ColumnSpec, ColumnType, IndexMap, Result};

/// Indentation of a statement inside `Schema::create(...)` in the
/// migration templates.
pub const COLUMN_SEPARATOR: &str = "\n            ";

/// A column whose type has been checked against the supported set.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDefinition<'a> {
    pub name: &'a str,
    pub kind: ColumnType,
    pub spec: &'a ColumnSpec,
}

impl ColumnDefinition<'_> {
    /// `$table->string('email', 100)->unique();`
    pub fn render(&self) -> String {
        let mut definition = match self.spec.length {
            Some(length) if self.kind.accepts_length() => {
                format!("$table->{}('{}', {})", self.kind, self.name, length)
            }
            _ => format!("$table->{}('{}')", self.kind, self.name),
        };

        if self.spec.unique {
            definition.push_str("->unique()");
        }
        if let Some(target) = self.spec.foreign.as_deref() {
            definition.push_str(&format!(
                "->foreign('{}')->references('id')->on('{}')",
                self.name, target
            ));
        }

        definition.push(';');
        definition
    }

    /// Statements reversing [`render`](Self::render) in a `down()` method.
    pub fn render_drop(&self) -> Vec<String> {
        let mut statements = Vec::new();
        if self.spec.foreign.is_some() {
            statements.push(format!("$table->dropForeign(['{}']);", self.name));
        }
        match self.kind {
            ColumnType::Timestamps => statements.push("$table->dropTimestamps();".to_string()),
            _ => statements.push(format!("$table->dropColumn('{}');", self.name)),
        }
        statements
    }
}

/// Check every column type, in document order. Fails on the first column
/// with an unsupported type, before anything is rendered.
pub fn resolve_columns(columns: &IndexMap<String, ColumnSpec>) -> Result<Vec<ColumnDefinition<'_>>> {
    columns
        .iter()
        .map(|(name, spec)| {
            Ok(ColumnDefinition {
                name: name.as_str(),
                kind: spec.kind(name)?,
                spec,
            })
        })
        .collect()
}

pub fn render_columns(columns: &[ColumnDefinition<'_>]) -> String {
    columns
        .iter()
        .map(ColumnDefinition::render)
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

/// Drop statements for an update migration's `down()`, in reverse order of
/// creation.
pub fn render_drop_columns(columns: &[ColumnDefinition<'_>]) -> String {
    columns
        .iter()
        .rev()
        .flat_map(ColumnDefinition::render_drop)
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

pub fn create_file_name(stamp: &str, table: &str, extension: &str) -> String {
    format!("{stamp}_{}.{extension}", create_marker(table))
}

pub fn update_file_name(stamp: &str, table: &str, extension: &str) -> String {
    format!("{stamp}_{}.{extension}", update_marker(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamavel_core::YamavelError;

    fn column(column_type: &str) -> ColumnSpec {
        ColumnSpec {
            column_type: Some(column_type.to_string()),
            ..Default::default()
        }
    }

    fn render_one(name: &str, spec: &ColumnSpec) -> String {
        let columns = IndexMap::from([(name.to_string(), spec.clone())]);
        render_columns(&resolve_columns(&columns).unwrap())
    }

    #[test]
    fn test_plain_column() {
        assert_eq!(render_one("id", &column("id")), "$table->id('id');");
        assert_eq!(
            render_one("views", &column("integer")),
            "$table->integer('views');"
        );
    }

    #[test]
    fn test_unique_column() {
        let spec = ColumnSpec {
            unique: true,
            ..column("string")
        };
        assert_eq!(
            render_one("email", &spec),
            "$table->string('email')->unique();"
        );
    }

    #[test]
    fn test_foreign_column() {
        let spec = ColumnSpec {
            foreign: Some("users".to_string()),
            ..column("unsignedBigInteger")
        };
        assert_eq!(
            render_one("user_id", &spec),
            "$table->unsignedBigInteger('user_id')->foreign('user_id')->references('id')->on('users');"
        );
    }

    #[test]
    fn test_length_only_applies_to_strings() {
        let spec = ColumnSpec {
            length: Some(100),
            ..column("string")
        };
        assert_eq!(render_one("name", &spec), "$table->string('name', 100);");

        let spec = ColumnSpec {
            length: Some(100),
            ..column("text")
        };
        assert_eq!(render_one("bio", &spec), "$table->text('bio');");
    }

    #[test]
    fn test_missing_type_renders_string() {
        assert_eq!(
            render_one("title", &ColumnSpec::default()),
            "$table->string('title');"
        );
    }

    #[test]
    fn test_columns_joined_in_order() {
        let columns: IndexMap<String, ColumnSpec> = [
            ("id", column("id")),
            ("name", column("string")),
            ("timestamps", column("timestamps")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let rendered = render_columns(&resolve_columns(&columns).unwrap());
        assert_eq!(
            rendered,
            "$table->id('id');\n            $table->string('name');\n            $table->timestamps('timestamps');"
        );
    }

    #[test]
    fn test_unsupported_type_stops_resolution() {
        let columns = IndexMap::from([
            ("id".to_string(), column("id")),
            ("data".to_string(), column("json")),
        ]);
        let err = resolve_columns(&columns).unwrap_err();
        assert!(matches!(err, YamavelError::UnsupportedColumnType { ref column_type, .. } if column_type == "json"));
    }

    #[test]
    fn test_drop_statements() {
        let columns: IndexMap<String, ColumnSpec> = [
            (
                "team_id",
                ColumnSpec {
                    foreign: Some("teams".to_string()),
                    ..column("unsignedBigInteger")
                },
            ),
            ("timestamps", column("timestamps")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let rendered = render_drop_columns(&resolve_columns(&columns).unwrap());
        assert_eq!(
            rendered,
            "$table->dropTimestamps();\n            $table->dropForeign(['team_id']);\n            $table->dropColumn('team_id');"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            create_file_name("2024_05_01_093000", "users", "php"),
            "2024_05_01_093000_create_users_table.php"
        );
        assert_eq!(
            update_file_name("2024_05_01_093000", "users", "php"),
            "2024_05_01_093000_update_users_table.php"
        );
    }
}
