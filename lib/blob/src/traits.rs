use crate::error::BlobError;

/// Metadata for a stored blob.
#[derive(Debug, Clone)]
pub struct BlobMeta {
    pub key: String,
    pub size: u64,
}

/// BlobStore holds the binary bytes of uploaded attachments.
///
/// Keys are flat file names such as `42.jpg` — the media id followed by
/// the original extension. The default implementation (`FileStore`)
/// maps keys to files in a single local directory; an object-storage
/// backend would implement the same trait.
pub trait BlobStore: Send + Sync {
    /// Store a blob. Overwrites if the key already exists.
    fn put(&self, key: &str, data: &[u8]) -> Result<(), BlobError>;

    /// Retrieve a blob. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError>;

    /// Delete a blob. No-op if the key does not exist.
    fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Check whether a blob exists.
    fn exists(&self, key: &str) -> Result<bool, BlobError>;

    /// List blobs whose key starts with `prefix`, sorted by key.
    /// `list("42.")` finds the attachment stored for media id 42
    /// whatever its extension.
    fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError>;
}
