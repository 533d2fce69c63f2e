//! Filesystem collaborator used by the persistence adapter.
//!
//! Schema objects never touch storage directly; `save`/`load` go through a
//! [`FileSystem`] so callers can plug in object stores or in-memory fakes.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Byte-level read/write access keyed by path strings.
pub trait FileSystem: Send + Sync {
    /// Reads the whole object at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be read.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Replaces the object at `path` with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Local disk access. Accepts plain paths and `file://` URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Converts a path string or `file://` URI to a local path.
    #[must_use]
    pub fn resolve(path: &str) -> PathBuf {
        PathBuf::from(path.strip_prefix("file://").unwrap_or(path))
    }
}

impl FileSystem for LocalFileSystem {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(Self::resolve(path))
    }

    /// Writes atomically through a uniquely named temp file in the target
    /// directory, creating parent directories. The temp file is removed when
    /// any step fails.
    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let path = Self::resolve(path);
        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent.to_path_buf()
            }
            None => PathBuf::from("."),
        };

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&path)?;
        Ok(())
    }
}

/// In-process store, mainly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryFileSystem {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an object exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }

    /// Returns all stored paths, sorted.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.read().keys().cloned().collect();
        paths.sort_unstable();
        paths
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files.read().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such object: {path}"))
        })
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        self.files.write().insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Joins a relative child reference onto the directory of `parent`.
///
/// Absolute references and URIs are returned unchanged.
#[must_use]
pub fn resolve_relative(parent: &str, child: &str) -> String {
    if child.starts_with('/') || child.contains("://") {
        return child.to_string();
    }
    match parent.rfind('/') {
        Some(idx) => format!("{}{}", &parent[..=idx], child),
        None => child.to_string(),
    }
}
