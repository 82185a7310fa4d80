/// Click notification payload.
///
/// A tapped row resolves to whatever the player needs to open it: the
/// index's content URI for indexed entries, the file path for walked ones.
use std::fmt;
use std::path::PathBuf;
use videolist_core::model::{VideoEntry, VideoSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayTarget {
    ContentUri(String),
    File(PathBuf),
}

impl From<&VideoEntry> for PlayTarget {
    fn from(entry: &VideoEntry) -> Self {
        match entry.source() {
            VideoSource::Indexed(r) => Self::ContentUri(r.content_uri()),
            VideoSource::File(p) => Self::File(p.clone()),
        }
    }
}

impl fmt::Display for PlayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContentUri(uri) => f.write_str(uri),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
