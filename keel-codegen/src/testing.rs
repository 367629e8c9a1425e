//! Test utilities for generated sources.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
};

use indexmap::IndexMap;
use keel_core::{DirFiler, Filer, SourceFile, source_path};
use tempfile::TempDir;

/// A [`Filer`] that keeps generated sources in memory.
///
/// Content becomes visible once the source file is flushed. It can be told to
/// fail when opening a given destination or once a write limit is reached.
#[derive(Debug, Default)]
pub struct MemoryFiler {
    files: IndexMap<String, String>,
    open: usize,
    fail_open: Option<String>,
    write_limit: Option<usize>,
}

impl MemoryFiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to open the destination for `qualified`.
    pub fn failing_open(mut self, qualified: impl Into<String>) -> Self {
        self.fail_open = Some(qualified.into());
        self
    }

    /// Fail writes once a file would exceed `limit` bytes.
    pub fn failing_after(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Get the flushed content for `qualified`.
    pub fn get(&self, qualified: &str) -> Option<&str> {
        self.files.get(qualified).map(String::as_str)
    }

    /// Qualified names of the stored files, in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files opened and not yet released.
    pub fn open_files(&self) -> usize {
        self.open
    }
}

impl Filer for MemoryFiler {
    fn create_source_file(&mut self, qualified: &str) -> io::Result<SourceFile<'_>> {
        if self.fail_open.as_deref() == Some(qualified) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot open {}", qualified),
            ));
        }

        self.open += 1;
        let writer = MemoryWriter {
            name: qualified.to_string(),
            buffer: Vec::new(),
            limit: self.write_limit,
            files: &mut self.files,
            open: &mut self.open,
        };
        Ok(SourceFile::new(qualified, writer))
    }
}

struct MemoryWriter<'a> {
    name: String,
    buffer: Vec<u8>,
    limit: Option<usize>,
    files: &'a mut IndexMap<String, String>,
    open: &'a mut usize,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(limit) = self.limit {
            if self.buffer.len() + buf.len() > limit {
                return Err(io::Error::other(format!(
                    "write limit of {} bytes reached",
                    limit
                )));
            }
        }
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let content = String::from_utf8_lossy(&self.buffer).into_owned();
        self.files.insert(self.name.clone(), content);
        Ok(())
    }
}

impl Drop for MemoryWriter<'_> {
    fn drop(&mut self) {
        *self.open -= 1;
    }
}

/// A scratch source tree for compiling generated code.
pub struct JavaProject {
    dir: TempDir,
}

impl JavaProject {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Root of the source tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A filer writing into the source tree.
    pub fn filer(&self) -> DirFiler {
        DirFiler::new(self.dir.path())
    }

    /// Write the source of `qualified` (e.g., "io.example.Foobar").
    pub fn add_source(&self, qualified: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(source_path(qualified));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Error from compiling or running Java sources.
#[derive(Debug)]
pub struct CompileError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CompileError {}

/// Compiles and runs Java sources with the JDK found on `PATH`.
pub struct JavaChecker;

impl JavaChecker {
    /// Whether `javac` can be run.
    pub fn is_available() -> bool {
        Command::new("javac")
            .arg("-version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Compile every `.java` file under `src` into `src/classes`.
    pub fn compile(&self, src: &Path) -> Result<PathBuf, CompileError> {
        let classes = src.join("classes");
        let mut sources = Vec::new();
        collect_java_files(src, &mut sources).map_err(|e| CompileError {
            message: format!("Failed to list sources: {}", e),
            output: String::new(),
        })?;

        let output = Command::new("javac")
            .arg("-d")
            .arg(&classes)
            .args(&sources)
            .output()
            .map_err(|e| CompileError {
                message: format!("Failed to run javac: {}", e),
                output: String::new(),
            })?;
        check_status("javac", output)?;
        Ok(classes)
    }

    /// Run `main_class` from compiled `classes`, returning its stdout.
    pub fn run(&self, classes: &Path, main_class: &str) -> Result<String, CompileError> {
        let output = Command::new("java")
            .arg("-ea")
            .arg("-cp")
            .arg(classes)
            .arg(main_class)
            .output()
            .map_err(|e| CompileError {
                message: format!("Failed to run java: {}", e),
                output: String::new(),
            })?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        check_status("java", output)?;
        Ok(stdout)
    }
}

fn collect_java_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_java_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "java") {
            out.push(path);
        }
    }
    Ok(())
}

fn check_status(tool: &str, output: std::process::Output) -> Result<(), CompileError> {
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Err(CompileError {
            message: format!("{} failed", tool),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// Assert that two sources are equal line by line, reporting the first
/// differing line.
pub fn assert_content_eq(actual: &str, expected: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    for (i, (a, e)) in actual_lines.iter().zip(&expected_lines).enumerate() {
        if a != e {
            panic!(
                "Source mismatch at line {}:\n  expected: {:?}\n  actual:   {:?}\n\nFull actual:\n{}",
                i + 1,
                e,
                a,
                actual
            );
        }
    }

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "Line count mismatch: expected {} lines, got {}\n\nFull actual:\n{}",
            expected_lines.len(),
            actual_lines.len(),
            actual
        );
    }
}
