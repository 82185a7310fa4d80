/// Indexed query path — reads videos out of a media index.
///
/// The index does the heavy lifting: it filters to video records at least
/// `min_duration_ms` long and returns them newest first. Each row becomes a
/// [`VideoEntry`] holding an [`IndexedRef`]. The only failure is an index
/// that cannot be reached.
use crate::error::ScanError;
use crate::model::{IndexedRef, ScanResult, VideoEntry};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Kind of media a catalog record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

impl MediaKind {
    /// Value stored in the catalog's `media_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

/// Sort key for index queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest insertion first. Ties fall back to descending id.
    #[default]
    DateAddedDesc,
}

/// Selection and ordering for a video query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoQuery {
    pub min_duration_ms: u64,
    pub order: SortOrder,
}

impl VideoQuery {
    pub fn new(min_duration_ms: u64) -> Self {
        Self {
            min_duration_ms,
            order: SortOrder::DateAddedDesc,
        }
    }
}

/// Projection returned by an index: identifier and display name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRow {
    pub id: i64,
    pub display_name: String,
}

/// A queryable media catalog.
pub trait MediaIndex: Send + Sync {
    /// Video rows matching `query`, already filtered and ordered.
    fn query_videos(&self, query: &VideoQuery) -> Result<Vec<MediaRow>, ScanError>;
}

impl<T: MediaIndex + ?Sized> MediaIndex for Arc<T> {
    fn query_videos(&self, query: &VideoQuery) -> Result<Vec<MediaRow>, ScanError> {
        (**self).query_videos(query)
    }
}

/// Query `index` and turn the rows into a scan result.
pub fn scan_index(index: &dyn MediaIndex, min_duration_ms: u64) -> ScanResult {
    match index.query_videos(&VideoQuery::new(min_duration_ms)) {
        Ok(rows) => {
            info!("Media index returned {} videos", rows.len());
            let entries = rows
                .into_iter()
                .map(|row| VideoEntry::indexed(IndexedRef::new(row.id), row.display_name))
                .collect();
            ScanResult::succeeded(entries)
        }
        Err(err) => {
            warn!("Media index query failed: {err}");
            ScanResult::failed(&err)
        }
    }
}

// ─── In-memory index ────────────────────────────────────────────────────────

/// One record in a [`MemoryMediaIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub id: i64,
    pub display_name: String,
    pub kind: MediaKind,
    pub duration_ms: u64,
    /// Insertion time, seconds since the Unix epoch.
    pub date_added: i64,
}

impl MediaRecord {
    pub fn video(id: i64, display_name: &str, duration_ms: u64, date_added: i64) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            kind: MediaKind::Video,
            duration_ms,
            date_added,
        }
    }
}

/// Media catalog held in process memory.
///
/// Records can be added while the index is shared; each query sees the
/// records present at that moment. Availability can be switched off to
/// model an unreachable index.
#[derive(Debug)]
pub struct MemoryMediaIndex {
    records: RwLock<Vec<MediaRecord>>,
    available: AtomicBool,
}

impl Default for MemoryMediaIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMediaIndex {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn with_records(records: Vec<MediaRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            available: AtomicBool::new(true),
        }
    }

    pub fn insert(&self, record: MediaRecord) {
        self.records.write().push(record);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl MediaIndex for MemoryMediaIndex {
    fn query_videos(&self, query: &VideoQuery) -> Result<Vec<MediaRow>, ScanError> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(ScanError::IndexUnavailable(
                "in-memory index is offline".into(),
            ));
        }

        let records = self.records.read();
        let mut matching: Vec<&MediaRecord> = records
            .iter()
            .filter(|r| r.kind == MediaKind::Video && r.duration_ms >= query.min_duration_ms)
            .collect();

        match query.order {
            SortOrder::DateAddedDesc => matching.sort_unstable_by(|a, b| {
                b.date_added.cmp(&a.date_added).then(b.id.cmp(&a.id))
            }),
        }

        Ok(matching
            .into_iter()
            .map(|r| MediaRow {
                id: r.id,
                display_name: r.display_name.clone(),
            })
            .collect())
    }
}
