use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::naming::source_path;

/// Destination for generated source files.
///
/// A filer hands out one [`SourceFile`] per generated type. The file must be
/// closed with [`SourceFile::close`]; a file dropped without being closed is
/// released without publishing its partial content.
pub trait Filer {
    /// Open the destination for the source of `qualified` (e.g., "io.example.FooBuilder").
    fn create_source_file(&mut self, qualified: &str) -> io::Result<SourceFile<'_>>;
}

/// An open generated source file.
///
/// Content written to a staged file lives in a temporary sibling of its
/// destination and replaces the destination only on [`close`](Self::close).
pub struct SourceFile<'a> {
    label: String,
    target: Option<Target<'a>>,
}

enum Target<'a> {
    Stream(Box<dyn Write + 'a>),
    Staged {
        writer: BufWriter<NamedTempFile>,
        path: PathBuf,
    },
}

impl<'a> SourceFile<'a> {
    /// Wrap a writer; `label` names the destination in reports and errors.
    pub fn new(label: impl Into<String>, writer: impl Write + 'a) -> Self {
        Self {
            label: label.into(),
            target: Some(Target::Stream(Box::new(writer))),
        }
    }

    /// Stage a file that is moved to `path` when closed.
    ///
    /// The temporary file is created in the parent directory of `path`, which
    /// must exist. Dropping the source file unclosed deletes the temporary and
    /// leaves `path` as it was.
    pub fn staged(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix(".keel-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        Ok(Self {
            label: path.display().to_string(),
            target: Some(Target::Staged {
                writer: BufWriter::new(temp),
                path,
            }),
        })
    }

    /// Get the destination label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Flush and release the destination.
    pub fn close(mut self) -> io::Result<()> {
        match self.target.take() {
            Some(Target::Stream(mut writer)) => writer.flush(),
            Some(Target::Staged { writer, path }) => {
                let temp = writer.into_inner().map_err(|e| e.into_error())?;
                temp.persist(&path).map_err(|e| e.error)?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn writer(&mut self) -> io::Result<&mut (dyn Write + 'a)> {
        match &mut self.target {
            Some(Target::Stream(writer)) => Ok(writer.as_mut()),
            Some(Target::Staged { writer, .. }) => Ok(writer),
            None => Err(io::Error::other(format!("{} is closed", self.label))),
        }
    }
}

impl Write for SourceFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl std::fmt::Debug for SourceFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("label", &self.label)
            .field("open", &self.target.is_some())
            .finish()
    }
}

/// Filer writing `<root>/<package path>/<Simple>.java`.
#[derive(Debug, Clone)]
pub struct DirFiler {
    root: PathBuf,
}

impl DirFiler {
    /// Create a filer rooted at the given source directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the source of `qualified` is written to.
    pub fn path_for(&self, qualified: &str) -> PathBuf {
        self.root.join(source_path(qualified))
    }
}

impl Filer for DirFiler {
    fn create_source_file(&mut self, qualified: &str) -> io::Result<SourceFile<'_>> {
        let path = self.path_for(qualified);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        SourceFile::staged(path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_dir_filer_creates_package_dirs() {
        let temp = TempDir::new().unwrap();
        let mut filer = DirFiler::new(temp.path());

        let mut file = filer.create_source_file("io.example.FooBuilder").unwrap();
        file.write_all(b"class FooBuilder {}").unwrap();
        file.close().unwrap();

        let path = temp.path().join("io").join("example").join("FooBuilder.java");
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "class FooBuilder {}");
    }

    #[test]
    fn test_dir_filer_default_package() {
        let temp = TempDir::new().unwrap();
        let mut filer = DirFiler::new(temp.path());

        let file = filer.create_source_file("FooBuilder").unwrap();
        assert!(file.label().ends_with("FooBuilder.java"));
        file.close().unwrap();

        assert!(temp.path().join("FooBuilder.java").exists());
    }

    #[test]
    fn test_dropped_file_leaves_nothing() {
        let temp = TempDir::new().unwrap();
        let mut filer = DirFiler::new(temp.path());

        {
            let mut file = filer.create_source_file("io.example.FooBuilder").unwrap();
            file.write_all(b"class FooBuil").unwrap();
        }

        assert!(!filer.path_for("io.example.FooBuilder").exists());
        let package = temp.path().join("io").join("example");
        assert_eq!(fs::read_dir(package).unwrap().count(), 0);
    }

    #[test]
    fn test_abandoned_rewrite_keeps_previous_file() {
        let temp = TempDir::new().unwrap();
        let mut filer = DirFiler::new(temp.path());

        let mut file = filer.create_source_file("io.example.FooBuilder").unwrap();
        file.write_all(b"class FooBuilder {}").unwrap();
        file.close().unwrap();

        {
            let mut file = filer.create_source_file("io.example.FooBuilder").unwrap();
            file.write_all(b"class Foo").unwrap();
        }

        let path = filer.path_for("io.example.FooBuilder");
        assert_eq!(fs::read_to_string(&path).unwrap(), "class FooBuilder {}");
        let package = temp.path().join("io").join("example");
        assert_eq!(fs::read_dir(package).unwrap().count(), 1);
    }

    #[test]
    fn test_staged_content_is_invisible_until_closed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("FooBuilder.java");

        let mut file = SourceFile::staged(&path).unwrap();
        file.write_all(b"class FooBuilder {}").unwrap();
        file.flush().unwrap();
        assert!(!path.exists());

        file.close().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "class FooBuilder {}");
    }

    #[test]
    fn test_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let mut filer = DirFiler::new(temp.path());

        for content in ["first", "second"] {
            let mut file = filer.create_source_file("FooBuilder").unwrap();
            file.write_all(content.as_bytes()).unwrap();
            file.close().unwrap();
        }

        let path = filer.path_for("FooBuilder");
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_in_memory_writer() {
        let mut buffer = Vec::new();
        let mut file = SourceFile::new("memory", &mut buffer);
        file.write_all(b"hello").unwrap();
        file.close().unwrap();

        assert_eq!(buffer, b"hello");
    }
}
