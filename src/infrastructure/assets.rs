//! Asset Cache
//!
//! One-time, single-threaded bootstrap of the release assets into a local
//! cache directory, run before any request is accepted. Existing files are
//! kept; missing files are fetched through `AssetFetcherPort` and written
//! atomically (temp file + rename). Any failure is fatal: the process
//! cannot serve requests without its assets.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::application::ports::{AssetFetcherPort, FetchError};

/// Release location the assets are fetched from by default.
pub const DEFAULT_RELEASE_URL: &str =
    "https://github.com/robinhad/ukrainian-tts/releases/download/v6.0.0";

/// Model weights checkpoint.
const MODEL_FILE: &str = "model.pth";
/// Model configuration.
const CONFIG_FILE: &str = "config.yaml";
/// Speaker embedding table.
const SPEAKERS_FILE: &str = "speakers.json";
/// Feature normalization statistics.
const FEAT_STATS_FILE: &str = "feats_stats.npz";

const REQUIRED_ASSETS: [&str; 4] = [MODEL_FILE, CONFIG_FILE, SPEAKERS_FILE, FEAT_STATS_FILE];

/// Asset bootstrap error
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Cache directory `{0}` does not exist")]
    MissingDirectory(String),

    #[error("Failed to fetch `{url}`: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to write `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Asset cache configuration
#[derive(Debug, Clone)]
pub struct AssetCacheConfig {
    /// Local directory the assets live in; must already exist.
    pub cache_dir: PathBuf,
    /// Base URL of the release the assets are fetched from.
    pub release_url: String,
}

impl Default for AssetCacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("."),
            release_url: DEFAULT_RELEASE_URL.to_string(),
        }
    }
}

/// Local paths of the bootstrapped assets.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub model: PathBuf,
    pub model_config: PathBuf,
    pub speakers: PathBuf,
    pub feat_stats: PathBuf,
}

/// Release asset cache.
pub struct AssetCache {
    config: AssetCacheConfig,
}

impl AssetCache {
    pub fn new(config: AssetCacheConfig) -> Self {
        Self { config }
    }

    /// Make sure every required asset exists locally, fetching the missing
    /// ones. Returns the local paths on success.
    pub async fn ensure(&self, fetcher: &dyn AssetFetcherPort) -> Result<AssetPaths, AssetError> {
        let dir = &self.config.cache_dir;
        if !dir.is_dir() {
            return Err(AssetError::MissingDirectory(dir.display().to_string()));
        }

        for name in REQUIRED_ASSETS {
            self.ensure_one(fetcher, name).await?;
        }

        tracing::info!(cache_dir = %dir.display(), "Asset cache ready");

        Ok(AssetPaths {
            model: dir.join(MODEL_FILE),
            model_config: dir.join(CONFIG_FILE),
            speakers: dir.join(SPEAKERS_FILE),
            feat_stats: dir.join(FEAT_STATS_FILE),
        })
    }

    async fn ensure_one(
        &self,
        fetcher: &dyn AssetFetcherPort,
        name: &str,
    ) -> Result<(), AssetError> {
        let target = self.config.cache_dir.join(name);
        if target.exists() {
            tracing::debug!(path = %target.display(), "Found asset, skipping download");
            return Ok(());
        }

        let url = format!("{}/{}", self.config.release_url, name);
        let bytes = fetcher
            .fetch(&url)
            .await
            .map_err(|source| AssetError::Fetch { url, source })?;

        write_atomic(&target, &bytes).await?;

        tracing::info!(
            path = %target.display(),
            size = bytes.len(),
            "Asset downloaded"
        );
        Ok(())
    }
}

/// Write through a temp file in the same directory, then rename into place,
/// so a crash mid-write never leaves a truncated asset behind.
async fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), AssetError> {
    let io_err = |source| AssetError::Io {
        path: target.display().to_string(),
        source,
    };

    let mut tmp = target.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, target).await.map_err(io_err)?;
    Ok(())
}
