//! Eloquent model rendering.

use yamavel_core::{ColumnSpec, IndexMap, RelationSpec, Result};

/// Separator between relation methods inside the model class body.
pub const METHOD_SEPARATOR: &str = "\n\n    ";

/// One accessor method per relation, in document order.
pub fn render_relations(relations: &IndexMap<String, RelationSpec>) -> Result<String> {
    let mut methods = Vec::with_capacity(relations.len());

    for (name, spec) in relations.iter() {
        let kind = spec.kind(name)?;
        let model = spec.related_model(name)?;
        methods.push(format!(
            "public function {name}()\n    {{\n        return $this->{kind}({model}::class);\n    }}"
        ));
    }

    Ok(methods.join(METHOD_SEPARATOR))
}

/// Quoted names of every column users may assign: all but `id` and
/// `timestamps` columns.
pub fn render_fillable(columns: &IndexMap<String, ColumnSpec>) -> Result<String> {
    let mut fillable = Vec::new();
    for (name, spec) in columns.iter() {
        if !spec.kind(name)?.is_managed() {
            fillable.push(quote(name));
        }
    }
    Ok(fillable.join(", "))
}

/// Quoted names of the columns marked `hidden`.
pub fn render_hidden(columns: &IndexMap<String, ColumnSpec>) -> String {
    columns
        .iter()
        .filter(|(_, spec)| spec.hidden)
        .map(|(name, _)| quote(name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote(name: &str) -> String {
    format!("'{name}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamavel_core::YamavelError;

    fn relation(kind: &str, model: &str) -> RelationSpec {
        RelationSpec {
            relation_type: Some(kind.to_string()),
            model: Some(model.to_string()),
        }
    }

    fn column(kind: &str, hidden: bool) -> ColumnSpec {
        ColumnSpec {
            column_type: Some(kind.to_string()),
            hidden,
            ..Default::default()
        }
    }

    #[test]
    fn test_has_many_accessor() {
        let relations = IndexMap::from([("posts".to_string(), relation("hasMany", "Post"))]);
        assert_eq!(
            render_relations(&relations).unwrap(),
            "public function posts()\n    {\n        return $this->hasMany(Post::class);\n    }"
        );
    }

    #[test]
    fn test_accessors_separated_by_blank_line() {
        let relations: IndexMap<String, RelationSpec> = [
            ("author", relation("belongsTo", "User")),
            ("tags", relation("belongsToMany", "Tag")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let rendered = render_relations(&relations).unwrap();
        assert!(rendered.contains("$this->belongsTo(User::class);\n    }\n\n    public function tags()"));
    }

    #[test]
    fn test_no_relations_renders_empty() {
        assert_eq!(render_relations(&IndexMap::new()).unwrap(), "");
    }

    #[test]
    fn test_invalid_relation_type() {
        let relations = IndexMap::from([("posts".to_string(), relation("hasSeveral", "Post"))]);
        let err = render_relations(&relations).unwrap_err();
        assert!(matches!(err, YamavelError::InvalidRelationType { ref relation_type, .. } if relation_type == "hasSeveral"));
    }

    #[test]
    fn test_fillable_and_hidden() {
        let columns: IndexMap<String, ColumnSpec> = [
            ("id", column("id", false)),
            ("name", column("string", false)),
            ("password", column("string", true)),
            ("timestamps", column("timestamps", false)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(render_fillable(&columns).unwrap(), "'name', 'password'");
        assert_eq!(render_hidden(&columns), "'password'");
    }
}
