/// A single discovered video.
///
/// An entry points at its bytes in exactly one way: either an opaque handle
/// into the media index, or a plain filesystem path found by the directory
/// walk. The two are variants of [`VideoSource`], so an entry with both or
/// neither cannot be constructed.
use compact_str::CompactString;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Collection URI of the external video index. Indexed references append
/// the row id to it.
pub const EXTERNAL_VIDEO_CONTENT_URI: &str = "content://media/external/video/media";

/// Opaque handle into the media index, resolved to bytes only at playback time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct IndexedRef(i64);

impl IndexedRef {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Row identifier inside the index.
    #[inline]
    pub fn id(self) -> i64 {
        self.0
    }

    /// Content URI for this entry (`<collection>/<id>`).
    pub fn content_uri(self) -> String {
        format!("{EXTERNAL_VIDEO_CONTENT_URI}/{}", self.0)
    }
}

impl fmt::Display for IndexedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{EXTERNAL_VIDEO_CONTENT_URI}/{}", self.0)
    }
}

/// Where a video lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum VideoSource {
    /// Found through the media index.
    Indexed(IndexedRef),
    /// Found by walking the filesystem.
    File(PathBuf),
}

/// One discovered video. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoEntry {
    display_name: CompactString,
    source: VideoSource,
}

impl VideoEntry {
    /// Entry backed by a media index row.
    pub fn indexed(reference: IndexedRef, display_name: impl AsRef<str>) -> Self {
        Self {
            display_name: CompactString::new(display_name.as_ref()),
            source: VideoSource::Indexed(reference),
        }
    }

    /// Entry backed by a file found on disk.
    pub fn file(path: PathBuf, display_name: impl AsRef<str>) -> Self {
        Self {
            display_name: CompactString::new(display_name.as_ref()),
            source: VideoSource::File(path),
        }
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    pub fn source(&self) -> &VideoSource {
        &self.source
    }

    pub fn indexed_ref(&self) -> Option<IndexedRef> {
        match self.source {
            VideoSource::Indexed(r) => Some(r),
            VideoSource::File(_) => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            VideoSource::File(p) => Some(p.as_path()),
            VideoSource::Indexed(_) => None,
        }
    }

    /// Printable location: the content URI or the filesystem path.
    pub fn location(&self) -> String {
        match &self.source {
            VideoSource::Indexed(r) => r.content_uri(),
            VideoSource::File(p) => p.to_string_lossy().into_owned(),
        }
    }
}
