use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BlobError;
use crate::traits::{BlobMeta, BlobStore};

/// FileStore is a BlobStore implementation backed by one local
/// directory. Keys are flat file names; nothing nests.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a new FileStore rooted at `base_dir`.
    /// The directory is created if it doesn't exist.
    pub fn open(base_dir: &Path) -> Result<Self, BlobError> {
        fs::create_dir_all(base_dir).map_err(|e| BlobError::Io(e.to_string()))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Resolve a key to a path under base_dir. Keys must be plain file
    /// names: no separators, no parent references.
    fn resolve(&self, key: &str) -> Result<PathBuf, BlobError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains('/')
            || key.contains('\\')
        {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(key))
    }
}

impl BlobStore for FileStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        fs::write(&path, data).map_err(|e| BlobError::Io(e.to_string()))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError> {
        let path = self.resolve(key)?;
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read(&path).map_err(|e| BlobError::Io(e.to_string()))?;
        Ok(Some(data))
    }

    fn delete(&self, key: &str) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| BlobError::Io(e.to_string()))?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, BlobError> {
        let path = self.resolve(key)?;
        Ok(path.is_file())
    }

    fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError> {
        let mut results = Vec::new();
        let entries =
            fs::read_dir(&self.base_dir).map_err(|e| BlobError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| BlobError::Io(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) {
                continue;
            }
            let meta = entry.metadata().map_err(|e| BlobError::Io(e.to_string()))?;
            if meta.is_file() {
                results.push(BlobMeta {
                    key: name,
                    size: meta.len(),
                });
            }
        }
        results.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(results)
    }
}
