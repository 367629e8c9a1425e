//! Generate command report data structures.

use std::path::PathBuf;

use keel_codegen::Diagnostic;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Source root the builders go to.
    pub output_dir: PathBuf,
    /// Number of types in the manifest.
    pub type_count: usize,
    /// One error per type that could not be generated.
    pub failures: Vec<Diagnostic>,
    pub result: GenerationResult,
}

impl GenerateReport {
    /// Whether every type was generated.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

#[derive(Debug, Default)]
pub struct WrittenResult {
    /// Written files, relative to the output directory.
    pub files: Vec<String>,
    /// Builders skipped because they were already generated.
    pub skipped: Vec<String>,
}

/// A source that would be written.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => {
                if !written.files.is_empty() {
                    out.section(&format!("Generated in {}", self.output_dir.display()));
                    for file in &written.files {
                        out.added_item(file);
                    }
                }
                for builder in &written.skipped {
                    out.warning(&format!("{} was already generated", builder));
                }
            }
            GenerationResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
        }

        for failure in &self.failures {
            out.error(&failure.message);
        }

        out.newline();
        out.preformatted(&format!(
            "{} of {} types generated",
            self.type_count - self.failures.len(),
            self.type_count
        ));
    }
}
