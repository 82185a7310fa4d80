/// Recursive directory walker using `jwalk` — the fallback scan path.
///
/// Used when no media index is available. Every file below the root whose
/// name carries a video extension becomes a [`VideoEntry`] holding its
/// absolute path. Order is whatever the directory listings return.
///
/// # Listing failures
///
/// A subdirectory that cannot be listed does not abort the walk. Its name is
/// written into the result's `error` field and the walk carries on, so when
/// several directories fail only the **last** one is reported, and the
/// result still counts as a success. Callers that need every failure should
/// read the `warn!` log lines.
use crate::error::ScanError;
use crate::model::{ScanResult, VideoEntry};
use crate::scanner::extensions::ExtensionSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Settings for one walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Suffixes treated as video.
    pub extensions: ExtensionSet,
    /// Walker threads. `0` walks serially on the calling thread.
    pub threads: usize,
}

impl WalkOptions {
    /// Default extensions, one walker thread per logical CPU.
    pub fn all_cores() -> Self {
        Self {
            extensions: ExtensionSet::default(),
            threads: num_cpus::get(),
        }
    }

    fn parallelism(&self) -> jwalk::Parallelism {
        if self.threads == 0 {
            jwalk::Parallelism::Serial
        } else {
            jwalk::Parallelism::RayonNewPool(self.threads)
        }
    }
}

/// Walk `root` and collect every video file below it.
///
/// Fails with [`ScanError::RootUnreadable`] when the root itself cannot be
/// listed; nothing is walked in that case.
pub fn scan_directory(root: &Path, options: &WalkOptions) -> ScanResult {
    let start = Instant::now();
    let root = absolute_root(root);

    if let Err(err) = std::fs::read_dir(&root) {
        warn!("Cannot list scan root {}: {err}", root.display());
        return ScanResult::failed(&ScanError::RootUnreadable);
    }

    info!("Walking {} for videos", root.display());

    let walker = jwalk::WalkDir::new(&root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(options.parallelism());

    let mut entries: Vec<VideoEntry> = Vec::new();
    let mut last_error: Option<String> = None;
    let mut files_seen: u64 = 0;

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Not expected for listing failures, which ride on the
                // directory entry, but handled the same way.
                let dir = err.path().unwrap_or(root.as_path()).to_path_buf();
                record_listing_failure(&mut last_error, &dir, &err);
                continue;
            }
        };

        // Set on directory entries whose own listing failed.
        if let Some(err) = &entry.read_children_error {
            record_listing_failure(&mut last_error, &entry.path(), err);
        }

        if entry.depth == 0 {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        // Symlinked directories are not descended into and are not files.
        if file_type.is_symlink() && path.is_dir() {
            continue;
        }

        files_seen += 1;
        let name = entry.file_name().to_string_lossy();
        if options.extensions.is_video_name(&name) {
            debug!("Found video: {}", path.display());
            entries.push(VideoEntry::file(path, name));
        }
    }

    info!(
        "Walk complete: {} videos out of {} files in {:?}",
        entries.len(),
        files_seen,
        start.elapsed()
    );

    ScanResult {
        success: true,
        error: last_error,
        entries,
    }
}

/// Log a directory that could not be listed and make it the reported error.
///
/// Overwrites any earlier failure: only the last one survives.
fn record_listing_failure(last_error: &mut Option<String>, dir: &Path, err: &dyn fmt::Display) {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    warn!("Listing failed for {}: {err}", dir.display());
    *last_error = Some(ScanError::Enumeration { dir: name }.to_string());
}

fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}
