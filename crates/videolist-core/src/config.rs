/// Configuration loaded from a TOML file.
///
/// A missing file is not an error: every field has a default, and any
/// section or key left out of the file keeps its default.
///
/// ```toml
/// [scan]
/// root = "/storage/emulated/0"
/// extensions = ["mp4", "mov", "avi", "mkv"]
/// min_duration_ms = 2000
/// walk_threads = 0
///
/// [index]
/// database = "/data/media/external.db"
/// ```
use crate::error::ScanError;
use crate::scanner::extensions::DEFAULT_VIDEO_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "videolist.toml";

/// Minimum duration for indexed videos. Shorter clips are left out of
/// index results.
pub const DEFAULT_MIN_DURATION_MS: u64 = 2_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoListConfig {
    pub scan: ScanConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory the walk starts from.
    pub root: PathBuf,
    /// Extensions (without the dot) treated as video. Matched case-insensitively.
    pub extensions: Vec<String>,
    /// Duration predicate for the indexed query.
    pub min_duration_ms: u64,
    /// Walker threads. `0` walks serially on the calling thread.
    pub walk_threads: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// SQLite media catalog. When set, the indexed query path is used.
    pub database: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            walk_threads: 0,
        }
    }
}

impl ScanConfig {
    /// Default settings rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl VideoListConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ScanError> {
        let config: VideoListConfig =
            toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))?;
        if config.scan.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(ScanError::Config("empty extension in [scan].extensions".into()));
        }
        Ok(config)
    }
}

/// The user's video directory, else the home directory, else `.`.
fn default_root() -> PathBuf {
    dirs::video_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
