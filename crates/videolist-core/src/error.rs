/// Errors produced while discovering videos.
///
/// Every variant is terminal for the scan attempt that produced it. The
/// `Display` text is exactly what ends up in `ScanResult::error`, so the
/// wording is user-facing.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root exists but cannot be listed.
    #[error("Cannot read External storage directory.")]
    RootUnreadable,

    /// Read permission for the storage root has not been granted.
    #[error("Cannot read videos without storage read permission.")]
    PermissionDenied,

    /// A directory below the root could not be listed.
    #[error("cannot list videos from folder: {dir}")]
    Enumeration { dir: String },

    /// The media index could not be reached or queried.
    #[error("Media index unavailable: {0}")]
    IndexUnavailable(String),

    /// Catch-all for failures with no more specific kind.
    #[error("Something went wrong.\n{0}")]
    Unexpected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// `true` for the two access-denied kinds (root unreadable, permission
    /// not granted).
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::RootUnreadable | Self::PermissionDenied)
    }
}

impl From<rusqlite::Error> for ScanError {
    fn from(err: rusqlite::Error) -> Self {
        Self::IndexUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_message_names_directory() {
        let err = ScanError::Enumeration {
            dir: "Movies".into(),
        };
        assert_eq!(err.to_string(), "cannot list videos from folder: Movies");
    }

    #[test]
    fn access_denied_kinds() {
        assert!(ScanError::RootUnreadable.is_access_denied());
        assert!(ScanError::PermissionDenied.is_access_denied());
        assert!(!ScanError::Unexpected("boom".into()).is_access_denied());
    }

    #[test]
    fn unexpected_keeps_reason_on_second_line() {
        let err = ScanError::Unexpected("disk vanished".into());
        assert_eq!(err.to_string(), "Something went wrong.\ndisk vanished");
    }
}
