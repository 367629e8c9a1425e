//! Check command report data structures.

use std::path::PathBuf;

use keel_codegen::{Diagnostic, Severity};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from checking a manifest.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Types that would be generated.
    pub types: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            let message = match &diag.location {
                Some(location) => format!("{} (in {})", diag.message, location),
                None => diag.message.clone(),
            };
            match diag.severity {
                Severity::Error => out.error(&message),
                Severity::Warning => out.warning(&message),
            }
        }

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
            let count = self.types.len();
            out.preformatted(&format!(
                "  {} type{} to generate",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
    }
}
