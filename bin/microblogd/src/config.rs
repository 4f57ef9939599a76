use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration, loaded from a TOML file.
///
/// ```toml
/// listen = "0.0.0.0:8080"
/// data_dir = "/var/lib/microblog"
/// debug = false
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP server.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Directory holding the SQLite database and the media files.
    pub data_dir: String,

    /// Seed well-known test users on startup (development only).
    #[serde(default)]
    pub debug: bool,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    /// Bare names resolve to `/etc/microblog/<name>.toml`; anything
    /// with a `/` or a `.toml` suffix is used directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.ends_with(".toml") {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/microblog/{}.toml", name_or_path))
        }
    }

    /// Load and parse the config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("cannot parse config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Path of the SQLite database file.
    pub fn sqlite_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("social.sqlite")
    }

    /// Directory of the media blob store.
    pub fn media_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("medias")
    }
}
