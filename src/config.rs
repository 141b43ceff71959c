use std::path::PathBuf;

use serde::Deserialize;

use crate::types::Folder;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Overrides for the three browsable folders. An empty value means
/// `<home>/<Folder>`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FoldersConfig {
    pub desktop: String,
    pub documents: String,
    pub downloads: String,
}

impl FoldersConfig {
    pub fn resolve(&self, folder: Folder) -> PathBuf {
        let configured = match folder {
            Folder::Desktop => &self.desktop,
            Folder::Documents => &self.documents,
            Folder::Downloads => &self.downloads,
        };
        if !configured.trim().is_empty() {
            return PathBuf::from(configured.trim());
        }
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(folder.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    pub include_hidden: bool,
    pub excludes: Vec<String>,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    /// How long a folder scan is reused across page requests. 0 disables caching.
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub folders: FoldersConfig,
    pub listing: ListingConfig,
    pub client: ClientConfig,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => panic!("Failed to deserialize default config: {}", e),
            },
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: fileglass.toml (in CWD)
        .add_source(::config::File::with_name("fileglass").required(false));

    if let Ok(custom_path) = std::env::var("FILEGLASS_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("FILEGLASS").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    let listing = &cfg.listing;
    if listing.default_page_limit == 0 {
        return Err(anyhow::anyhow!("listing.default_page_limit must be > 0"));
    }
    if listing.max_page_limit < listing.default_page_limit {
        return Err(anyhow::anyhow!("listing.max_page_limit must be >= listing.default_page_limit"));
    }
    if listing.cache_ttl_secs > 0 && listing.cache_capacity == 0 {
        return Err(anyhow::anyhow!("listing.cache_capacity must be > 0 when caching is enabled"));
    }
    for pattern in &listing.excludes {
        crate::catalog::exclude_glob(pattern)
            .map_err(|e| anyhow::anyhow!("invalid listing.excludes pattern {:?}: {}", pattern, e))?;
    }

    if cfg.client.page_limit == 0 {
        return Err(anyhow::anyhow!("client.page_limit must be > 0"));
    }
    reqwest::Url::parse(&cfg.client.base_url)
        .map_err(|e| anyhow::anyhow!("invalid client.base_url {:?}: {}", cfg.client.base_url, e))?;

    Ok(())
}
