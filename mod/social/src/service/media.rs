use std::collections::HashMap;

use tracing::{debug, warn};

use microblog_sql::Value;

use crate::service::{SocialError, SocialService};

/// Upload size cap: 2 MiB.
pub const MAX_MEDIA_BYTES: usize = 2 * 1024 * 1024;

/// Accepted attachment extensions, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// The lowercased extension of a file name, if it has one.
fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl SocialService {
    /// Store an uploaded attachment.
    ///
    /// The metadata row is inserted first so the generated id can name
    /// the blob: bytes land under `{id}.{ext}` with the upload's
    /// original extension.
    pub fn upload_media(&self, bytes: &[u8], declared_name: &str) -> Result<i64, SocialError> {
        if bytes.len() > MAX_MEDIA_BYTES {
            warn!(size = bytes.len(), "media upload too large");
            return Err(SocialError::Validation(format!(
                "media size {} exceeds the {} byte limit",
                bytes.len(),
                MAX_MEDIA_BYTES
            )));
        }
        let ext = match file_extension(declared_name) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => ext,
            _ => {
                warn!(declared_name, "media upload has unsupported format");
                return Err(SocialError::Validation(format!(
                    "unsupported media format: {:?} (allowed: {})",
                    declared_name,
                    ALLOWED_EXTENSIONS.join(", ")
                )));
            }
        };

        let rows = self
            .sql
            .query(
                "INSERT INTO media (tweet_id, file_name) VALUES (NULL, '') RETURNING id",
                &[],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        let media_id = rows
            .first()
            .and_then(|r| r.get_i64("id"))
            .ok_or_else(|| SocialError::Internal("insert returned no id".into()))?;

        let file_name = format!("{}.{}", media_id, ext);
        self.sql
            .exec(
                "UPDATE media SET file_name = ?1 WHERE id = ?2",
                &[Value::Text(file_name.clone()), Value::Integer(media_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        self.blob
            .put(&file_name, bytes)
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        debug!(media_id, file_name, "media uploaded");
        Ok(media_id)
    }

    /// Check that every id names an existing, still-orphan media row.
    pub fn validate_attachable(&self, media_ids: &[i64]) -> Result<(), SocialError> {
        let mut params = Vec::new();
        let list = Self::push_id_list(media_ids, 1, &mut params);
        let rows = self
            .sql
            .query(
                &format!("SELECT id, tweet_id FROM media WHERE id IN ({})", list),
                &params,
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        let found: HashMap<i64, Option<i64>> = rows
            .iter()
            .filter_map(|r| r.get_i64("id").map(|id| (id, r.get_i64("tweet_id"))))
            .collect();

        for id in media_ids {
            match found.get(id) {
                None => {
                    return Err(SocialError::Validation(format!(
                        "media id {} not exists",
                        id
                    )));
                }
                Some(Some(tweet_id)) => {
                    return Err(SocialError::Validation(format!(
                        "media id {} already attached to tweet {}",
                        id, tweet_id
                    )));
                }
                Some(None) => {}
            }
        }
        Ok(())
    }

    /// Remove the backing bytes for each media id, found by the
    /// `{id}.` key prefix. Tolerant of bytes that are already gone and
    /// of metadata rows removed by a tweet deletion.
    pub fn delete_media_files(&self, media_ids: &[i64]) -> Result<(), SocialError> {
        for id in media_ids {
            let blobs = self
                .blob
                .list(&format!("{}.", id))
                .map_err(|e| SocialError::Storage(e.to_string()))?;
            for meta in blobs {
                self.blob
                    .delete(&meta.key)
                    .map_err(|e| SocialError::Storage(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Blob keys of the media attached to a tweet, in attachment order.
    pub fn media_files_of_tweet(&self, tweet_id: i64) -> Result<Vec<String>, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT file_name FROM media WHERE tweet_id = ?1 ORDER BY id",
                &[Value::Integer(tweet_id)],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        rows.iter()
            .map(|row| {
                row.get_str("file_name")
                    .map(str::to_string)
                    .ok_or_else(|| SocialError::Internal("missing file_name column".into()))
            })
            .collect()
    }
}
