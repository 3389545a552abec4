use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// The persisted login records file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginUsersFile {
    path: PathBuf,
}

impl LoginUsersFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents; no encoding is assumed.
    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|err| Error::io(&self.path, err))
    }

    /// Replaces the file through a temporary sibling and a rename.
    ///
    /// The temporary file is removed on every failure path before the
    /// rename, so the previous content stays intact.
    pub fn write(&self, contents: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(&self.path).map(|meta| meta.permissions()).ok();

        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| Error::io(dir, err))?;
        tmp.write_all(contents)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| Error::io(tmp.path(), err))?;
        if let Some(permissions) = permissions {
            fs::set_permissions(tmp.path(), permissions).map_err(|err| Error::io(tmp.path(), err))?;
        }
        tmp.persist(&self.path)
            .map_err(|err| Error::io(&self.path, err.error))?;
        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "login file written");
        Ok(())
    }
}
