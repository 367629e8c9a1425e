//! Generate operation - write or preview builder sources.

use std::path::Path;

use eyre::{Context, Result};
use keel_codegen::{Diagnostic, Processor, TypeOutcome};
use keel_core::{DirFiler, source_path};
use keel_manifest::Manifest;
use keel_model::describe_type;

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};

/// Generate every type of the manifest into `output`, or preview the sources.
pub fn run(manifest: &Manifest, output: &Path, dry_run: bool) -> Result<GenerateReport> {
    let config = &manifest.generator;
    let processor = Processor::new(config.synthesis_options()).with_indent(config.indent);

    if dry_run {
        Ok(preview(manifest, processor, output))
    } else {
        write(manifest, processor, output)
    }
}

fn preview(manifest: &Manifest, processor: Processor, output: &Path) -> GenerateReport {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for interface in manifest.interfaces() {
        match processor.render(&interface) {
            Ok(content) => {
                let builder = describe_type(&interface).qualified_builder_name();
                files.push(PreviewFile {
                    path: source_path(&builder).display().to_string(),
                    content,
                });
            }
            Err(err) => failures.push(Diagnostic::from(&err)),
        }
    }

    GenerateReport {
        output_dir: output.to_path_buf(),
        type_count: manifest.types.len(),
        failures,
        result: GenerationResult::Preview(files),
    }
}

fn write(manifest: &Manifest, mut processor: Processor, output: &Path) -> Result<GenerateReport> {
    std::fs::create_dir_all(output)
        .wrap_err_with(|| format!("Failed to create output directory {}", output.display()))?;

    let mut filer = DirFiler::new(output);
    let report = processor.process(&manifest.interfaces(), &mut filer);

    let mut written = WrittenResult::default();
    for outcome in &report.outcomes {
        match outcome {
            TypeOutcome::Written { destination, .. } => {
                let relative = Path::new(destination)
                    .strip_prefix(output)
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|_| destination.clone());
                written.files.push(relative);
            }
            TypeOutcome::Skipped { builder, .. } => written.skipped.push(builder.clone()),
            TypeOutcome::Failed(_) => {}
        }
    }

    Ok(GenerateReport {
        output_dir: output.to_path_buf(),
        type_count: manifest.types.len(),
        failures: report.diagnostics().into_iter().filter(|d| d.severity.is_error()).collect(),
        result: GenerationResult::Written(written),
    })
}
