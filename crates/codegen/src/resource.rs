//! Filament resource rendering. Every field becomes a plain text widget;
//! declared column types are not consulted.

/// Separator between widgets inside `->schema([...])` / `->columns([...])`.
pub const WIDGET_SEPARATOR: &str = ",\n                ";

pub fn render_form_fields(fields: &[String]) -> String {
    render_widgets(r"Forms\Components\TextInput", fields)
}

pub fn render_table_columns(columns: &[String]) -> String {
    render_widgets(r"Tables\Columns\TextColumn", columns)
}

fn render_widgets(widget: &str, names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{widget}::make('{name}')"))
        .collect::<Vec<_>>()
        .join(WIDGET_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_form_fields() {
        assert_eq!(
            render_form_fields(&names(&["name", "email"])),
            "Forms\\Components\\TextInput::make('name'),\n                Forms\\Components\\TextInput::make('email')"
        );
    }

    #[test]
    fn test_table_columns() {
        assert_eq!(
            render_table_columns(&names(&["id"])),
            "Tables\\Columns\\TextColumn::make('id')"
        );
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(render_form_fields(&[]), "");
        assert_eq!(render_table_columns(&[]), "");
    }
}
