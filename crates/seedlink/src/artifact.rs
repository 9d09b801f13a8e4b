//! Generated seeder files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::errors::GenerateError;

/// A rendered seeder class and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedArtifact {
    pub class_name: String,
    pub path: PathBuf,
    pub source: String,
    /// Rows rendered into the source.
    pub rows: usize,
}

impl SeedArtifact {
    /// Writes the source, replacing any previous file in one step.
    pub fn write(&self) -> Result<(), GenerateError> {
        write_atomic(&self.path, &self.source).map_err(GenerateError::io(&self.path))
    }
}

/// Writes `contents` to a temporary file next to `path` and renames it into
/// place, so readers see either the old file or the complete new one.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
