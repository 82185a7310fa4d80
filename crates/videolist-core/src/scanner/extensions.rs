/// Video classification by file-name suffix.
///
/// A name is a video when, lowercased, it ends with `.` followed by one of
/// the configured extensions. This is a plain suffix check, so `.mp4` (a
/// dotfile with no stem) also matches.

/// Extensions recognised when no configuration overrides them.
pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "mkv"];

/// A set of lowercase `.ext` suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_EXTENSIONS)
    }
}

impl ExtensionSet {
    /// Build from bare extensions (`"mp4"`, `".MKV"`); case and a leading dot
    /// are normalised away.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim_start_matches('.').to_lowercase();
                format!(".{ext}")
            })
            .collect();
        Self { suffixes }
    }

    /// `true` if `name` ends with one of the suffixes, ignoring case.
    pub fn is_video_name(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix.as_str()))
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// Classify with the default extension set.
pub fn is_video_name(name: &str) -> bool {
    ExtensionSet::default().is_video_name(name)
}
