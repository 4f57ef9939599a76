/// Uploaded attachment metadata. `tweet_id` is None while the media is
/// an orphan (uploaded but not yet referenced by any tweet); once a
/// tweet claims it the link never changes.
#[derive(Debug, Clone)]
pub struct Media {
    pub id: i64,
    pub tweet_id: Option<i64>,
    /// Blob key: `{id}.{ext}`, derived from the id and the upload's
    /// original extension.
    pub file_name: String,
}
