use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A keel.toml file with both raw content and parsed manifest.
pub struct KeelToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl KeelToml {
    /// Open and parse a keel.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Output directory, resolved against the directory holding the file.
    pub fn output_dir(&self) -> PathBuf {
        let output = &self.manifest.generator.output;
        match self.path.parent() {
            Some(parent) if output.is_relative() => parent.join(output),
            _ => output.clone(),
        }
    }
}
