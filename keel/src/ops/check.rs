//! Check operation - synthesize every type without writing.

use std::path::Path;

use keel_codegen::{Diagnostic, Processor};
use keel_manifest::Manifest;

use crate::reports::CheckReport;

/// Run extraction and synthesis for every type and collect diagnostics.
pub fn run(manifest: &Manifest, config_path: &Path) -> CheckReport {
    let processor = Processor::new(manifest.generator.synthesis_options());
    let mut report = CheckReport {
        config_path: config_path.to_path_buf(),
        types: Vec::new(),
        diagnostics: Vec::new(),
    };

    for interface in manifest.interfaces() {
        match processor.plan(&interface) {
            Ok((ty, _)) => {
                if ty.fields.is_empty() {
                    report.diagnostics.push(
                        Diagnostic::warning("extract", "no accessors, the value will have no fields")
                            .at(ty.qualified_name()),
                    );
                }
                report.types.push(ty.qualified_name());
            }
            Err(err) => report.diagnostics.push(Diagnostic::from(&err)),
        }
    }

    report
}
