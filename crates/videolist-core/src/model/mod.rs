/// Data model for discovered videos.
///
/// Re-exports the entry type and the per-scan result container.
pub mod scan_result;
pub mod video_entry;

pub use scan_result::ScanResult;
pub use video_entry::{IndexedRef, VideoEntry, VideoSource, EXTERNAL_VIDEO_CONTENT_URI};
