/// Outcome of one scan invocation.
///
/// Produced exactly once per scan and moved to the caller (across the worker
/// boundary for the directory walk).
use super::video_entry::VideoEntry;
use crate::error::ScanError;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// `true` when the scan ran to the end.
    pub success: bool,
    /// User-facing message. Set on failure; on a successful walk it may
    /// carry the last directory-listing failure.
    pub error: Option<String>,
    /// Discovered videos. Always empty when `success` is `false`.
    pub entries: Vec<VideoEntry>,
}

impl ScanResult {
    /// Successful scan with no error message.
    pub fn succeeded(entries: Vec<VideoEntry>) -> Self {
        Self {
            success: true,
            error: None,
            entries,
        }
    }

    /// Failed scan. Entries are always dropped.
    pub fn failed(err: &ScanError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
