/// Application state management.
///
/// Centralises the state a list screen reads and writes. Walk scans run on
/// the core `TaskRunner`; their result is picked up in
/// `process_scan_messages()`, which the frontend calls once per frame (or
/// `wait_for_scan()` when it can block). Indexed scans complete inside
/// `refresh()` itself.
///
/// Each completed scan replaces the whole video list. A failed scan keeps
/// the previous list on screen and sets `error_message`.
use crate::play::PlayTarget;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{debug, info, warn};
use videolist_core::config::VideoListConfig;
use videolist_core::error::ScanError;
use videolist_core::model::{ScanResult, VideoEntry};
use videolist_core::platform::{FsPermission, PermissionCheck};
use videolist_core::scanner::{ScanMode, Scanner, SqliteMediaIndex};
use videolist_core::task::{TaskHandle, TaskOutcome, TaskRunner};

/// The current phase of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// Nothing loaded yet, or the last refresh was refused.
    Idle,
    /// A walk is running on the worker; show the spinner.
    Refreshing,
    /// The last scan finished (successfully or not).
    Ready,
}

pub struct AppState {
    scanner: Scanner,
    permission: Box<dyn PermissionCheck>,
    runner: TaskRunner,
    pending: Option<TaskHandle<ScanResult>>,

    pub phase: AppPhase,
    videos: Vec<VideoEntry>,
    /// Message from the last failed scan or denied permission.
    error_message: Option<String>,
    /// Listing problem reported by an otherwise successful walk.
    warning: Option<String>,
    permission_denied: bool,
    refreshed_at: Option<DateTime<Local>>,
}

impl AppState {
    /// State around an existing scanner and permission check.
    pub fn new(scanner: Scanner, permission: impl PermissionCheck + 'static) -> Self {
        Self {
            scanner,
            permission: Box::new(permission),
            runner: TaskRunner::new(),
            pending: None,
            phase: AppPhase::Idle,
            videos: Vec::new(),
            error_message: None,
            warning: None,
            permission_denied: false,
            refreshed_at: None,
        }
    }

    /// Build from configuration: attach the SQLite index when one is
    /// configured, otherwise walk `scan.root`. Permission is checked against
    /// the filesystem.
    pub fn build(config: &VideoListConfig) -> Result<Self, ScanError> {
        let mut scanner = Scanner::new(config.scan.clone());
        if let Some(db) = &config.index.database {
            let index = SqliteMediaIndex::open(db)?;
            scanner = scanner.with_index(Arc::new(index));
        }
        Ok(Self::new(scanner, FsPermission))
    }

    /// Start a scan: the initial load and every pull-to-refresh.
    ///
    /// Returns `false` when nothing was started: a walk is already running,
    /// or read permission for the walk root is denied.
    pub fn refresh(&mut self) -> bool {
        if self.phase == AppPhase::Refreshing {
            debug!("Refresh ignored: a scan is already running");
            return false;
        }

        // Only the walk reads the storage root; the index is checked by querying it.
        let root = &self.scanner.config().root;
        let mode = self.scanner.scan_mode();
        if mode == ScanMode::Walk && !self.permission.is_read_granted(root) {
            warn!("Read permission denied for {}", root.display());
            self.permission_denied = true;
            self.error_message = Some(ScanError::PermissionDenied.to_string());
            self.phase = AppPhase::Idle;
            return false;
        }
        self.permission_denied = false;

        match mode {
            ScanMode::Indexed => {
                let result = self.scanner.scan();
                self.apply_result(result);
            }
            ScanMode::Walk => {
                self.pending = Some(self.scanner.scan_in_background(&self.runner));
                self.phase = AppPhase::Refreshing;
            }
        }
        true
    }

    /// Pick up a finished walk, if any. Called once per frame.
    ///
    /// Returns `true` if the state changed and the screen should repaint.
    pub fn process_scan_messages(&mut self) -> bool {
        let outcome = match self.pending.as_mut().and_then(|h| h.try_outcome()) {
            Some(o) => o,
            None => return false,
        };
        self.pending = None;
        self.apply_outcome(outcome);
        true
    }

    /// Block until the running walk reports. No-op when nothing is running.
    pub fn wait_for_scan(&mut self) {
        if let Some(handle) = self.pending.take() {
            let outcome = handle.wait();
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: TaskOutcome<ScanResult>) {
        match outcome {
            TaskOutcome::Completed(result) => self.apply_result(result),
            TaskOutcome::Failed(msg) => {
                warn!("Scan task failed: {msg}");
                self.phase = AppPhase::Ready;
                self.error_message = Some(msg);
            }
        }
    }

    fn apply_result(&mut self, result: ScanResult) {
        self.phase = AppPhase::Ready;
        self.refreshed_at = Some(Local::now());

        if result.success {
            info!("Scan finished with {} videos", result.entries.len());
            self.videos = result.entries;
            self.error_message = None;
            self.warning = result.error;
        } else {
            let msg = result
                .error
                .unwrap_or_else(|| ScanError::Unexpected("scan failed".into()).to_string());
            warn!("Scan failed: {msg}");
            self.error_message = Some(msg);
        }
    }

    /// The row at `index` was tapped.
    pub fn on_item_clicked(&self, index: usize) -> Option<PlayTarget> {
        self.videos.get(index).map(PlayTarget::from)
    }

    pub fn videos(&self) -> &[VideoEntry] {
        &self.videos
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn permission_denied(&self) -> bool {
        self.permission_denied
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Local>> {
        self.refreshed_at
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scanner.scan_mode()
    }

    /// Dismiss the current error message.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
