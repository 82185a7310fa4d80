/// Scanner module — discovers videos.
///
/// Two mutually exclusive strategies:
/// - **Indexed query:** ask a [`MediaIndex`] for long-enough videos, newest
///   first. Fast, runs on the calling thread.
/// - **Directory walk:** `jwalk`-based recursive traversal of the scan root,
///   filtered by file extension. Runs on the background [`TaskRunner`].
///
/// The strategy is picked from capability: a [`Scanner`] with an index
/// attached queries it, one without walks.
pub mod extensions;
pub mod indexed;
pub mod sqlite;
pub mod walk;

pub use extensions::{is_video_name, ExtensionSet, DEFAULT_VIDEO_EXTENSIONS};
pub use indexed::{
    scan_index, MediaIndex, MediaKind, MediaRecord, MediaRow, MemoryMediaIndex, SortOrder,
    VideoQuery,
};
pub use sqlite::SqliteMediaIndex;
pub use walk::{scan_directory, WalkOptions};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::ScanResult;
use crate::task::{TaskHandle, TaskRunner};
use std::sync::Arc;
use tracing::info;

/// Which scan strategy a [`Scanner`] will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Indexed,
    Walk,
}

/// Entry point for scans. Cheap to clone.
#[derive(Clone)]
pub struct Scanner {
    config: ScanConfig,
    index: Option<Arc<dyn MediaIndex>>,
}

impl Scanner {
    /// Scanner that walks `config.root`.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            index: None,
        }
    }

    /// Use `index` instead of walking.
    pub fn with_index(mut self, index: Arc<dyn MediaIndex>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn scan_mode(&self) -> ScanMode {
        if self.index.is_some() {
            ScanMode::Indexed
        } else {
            ScanMode::Walk
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            extensions: ExtensionSet::new(&self.config.extensions),
            threads: self.config.walk_threads,
        }
    }

    /// Run one full scan on the calling thread.
    pub fn scan(&self) -> ScanResult {
        match &self.index {
            Some(index) => scan_index(index.as_ref(), self.config.min_duration_ms),
            None => scan_directory(&self.config.root, &self.walk_options()),
        }
    }

    /// Queue a directory walk on `runner`.
    ///
    /// The returned handle yields the walk's [`ScanResult`] once the worker
    /// gets to it. Listing problems are reported inside the result; the
    /// handle only reports `Failed` if the walk itself panics.
    pub fn scan_in_background(&self, runner: &TaskRunner) -> TaskHandle<ScanResult> {
        let root = self.config.root.clone();
        let options = self.walk_options();
        info!("Queueing walk of {}", root.display());
        runner.execute(move || Ok::<_, ScanError>(scan_directory(&root, &options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn mode_follows_index_presence() {
        let scanner = Scanner::new(ScanConfig::with_root("."));
        assert_eq!(scanner.scan_mode(), ScanMode::Walk);
        let scanner = scanner.with_index(Arc::new(MemoryMediaIndex::new()));
        assert_eq!(scanner.scan_mode(), ScanMode::Indexed);
    }

    #[test]
    fn configured_extensions_drive_the_walk() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.webm"), b"x").unwrap();
        fs::write(tmp.path().join("b.mp4"), b"x").unwrap();

        let mut config = ScanConfig::with_root(tmp.path());
        config.extensions = vec!["webm".into()];
        let result = Scanner::new(config).scan();
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].display_name(), "a.webm");
    }

    #[test]
    fn indexed_scan_uses_configured_duration() {
        let index = Arc::new(MemoryMediaIndex::with_records(vec![
            MediaRecord::video(1, "a.mp4", 4_000, 1),
            MediaRecord::video(2, "b.mp4", 9_000, 2),
        ]));
        let mut config = ScanConfig::with_root(".");
        config.min_duration_ms = 5_000;
        let result = Scanner::new(config).with_index(index).scan();
        assert_eq!(result.len(), 1);
        assert_eq!(result.entries[0].display_name(), "b.mp4");
    }
}
