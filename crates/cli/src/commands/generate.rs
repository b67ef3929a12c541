use console::style;
use std::path::Path;
use tracing::info;
use yamavel_codegen::{GeneratedArtifact, GenerationReport, Generator, WriteOutcome};
use yamavel_core::{ProjectConfig, Result, Schema};

pub fn run(yaml: &Path, laravel_root: &Path, config: Option<&Path>) -> Result<GenerationReport> {
    let schema = Schema::load(yaml)?;
    let config = ProjectConfig::discover(laravel_root, config)?;
    info!(
        schema = %yaml.display(),
        root = %laravel_root.display(),
        entities = schema.len(),
        "generating"
    );

    let generator = Generator::from_schema(schema, laravel_root, config);
    let report = generator.generate()?;

    for artifact in &report.artifacts {
        print_artifact(laravel_root, artifact);
    }
    println!(
        "{} written, {} skipped",
        report.written().count(),
        report.skipped().count()
    );
    println!("{}", style("YAML schema processed successfully!").green());

    Ok(report)
}

fn print_artifact(root: &Path, artifact: &GeneratedArtifact) {
    let path = artifact.path.strip_prefix(root).unwrap_or(&artifact.path);
    match artifact.outcome {
        WriteOutcome::Skipped => println!(
            "{} {} {} (already exists)",
            style("-").dim(),
            artifact.kind,
            path.display()
        ),
        _ => println!(
            "{} {} {}",
            style("✓").green(),
            artifact.kind,
            path.display()
        ),
    }
}
