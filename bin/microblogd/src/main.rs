//! `microblogd` — the microblog server binary.
//!
//! Usage:
//!   microblogd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/microblog/<name>.toml`.
//! If a path with `/` or a `.toml` suffix is given, it's used directly.

mod config;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use clap::Parser;
use tracing::info;

use microblog_core::Module;

use config::ServerConfig;

/// Microblog server.
#[derive(Parser, Debug)]
#[command(name = "microblogd", about = "Microblog server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the config file).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    let listen = cli.listen.unwrap_or_else(|| server_config.listen.clone());

    // Initialize storage. Stores are built here and injected; nothing
    // holds a global connection.
    std::fs::create_dir_all(&server_config.data_dir)?;
    let sql: Arc<dyn microblog_sql::SQLStore> = Arc::new(
        microblog_sql::SqliteStore::open(&server_config.sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let blob: Arc<dyn microblog_blob::BlobStore> = Arc::new(
        microblog_blob::FileStore::open(&server_config.media_dir())
            .map_err(|e| anyhow::anyhow!("failed to open media store: {}", e))?,
    );

    let social_module = social::SocialModule::new(Arc::clone(&sql), Arc::clone(&blob))
        .map_err(|e| anyhow::anyhow!("failed to initialize social module: {}", e))?;
    info!("Social module initialized");

    // Development seeding: well-known credentials for the browser
    // client and manual testing.
    if server_config.debug {
        let svc = social_module.service();
        for n in 1..=2 {
            let user = svc
                .ensure_user(&format!("api_key_{}", n), &format!("name_{}", n))
                .map_err(|e| anyhow::anyhow!("seeding failed: {}", e))?;
            info!("Seeded user {} with api_key api_key_{}", user.id, n);
        }
        let user = svc
            .ensure_user("test", "test")
            .map_err(|e| anyhow::anyhow!("seeding failed: {}", e))?;
        info!("Seeded user {} with api_key test", user.id);
    }

    // Build router: system endpoints plus the module's /api routes.
    let app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .merge(social_module.routes());

    // Start server.
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Microblog server listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({"status": "ok"}))
}

async fn version() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "microblogd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
