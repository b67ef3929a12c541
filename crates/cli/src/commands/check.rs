use console::style;
use std::path::Path;
use yamavel_core::{Result, Schema, YamavelError};

/// Load the schema and report every structural problem in it, without
/// writing anything.
pub fn run(yaml: &Path) -> Result<()> {
    let schema = Schema::load(yaml)?;
    let problems = schema.validate();

    if problems.is_empty() {
        println!(
            "{} {} ({} entities)",
            style("✓").green(),
            yaml.display(),
            schema.len()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("{} {}", style("✗").red(), problem);
    }
    Err(YamavelError::InvalidSchema {
        path: yaml.to_path_buf(),
        problems: problems.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn check(yaml: &str) -> Result<()> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.yaml");
        fs::write(&path, yaml).unwrap();
        run(&path)
    }

    #[test]
    fn test_valid_schema() {
        check("User:\n  columns:\n    id:\n      type: id\n").unwrap();
    }

    #[test]
    fn test_problems_fail_the_check() {
        let err = check(
            "User:\n  columns:\n    id:\n      type: uuid\nPost:\n  table: posts\n",
        )
        .unwrap_err();
        assert!(matches!(err, YamavelError::InvalidSchema { problems: 2, .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_malformed_document() {
        let err = check("Invalid: YAML: Content").unwrap_err();
        assert!(matches!(err, YamavelError::InvalidDocument { .. }));
    }
}
