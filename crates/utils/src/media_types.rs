use std::fmt;
use std::path::Path;

pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".m4v", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".webm", ".ts"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
    #[error("at least one video extension is required")]
    Empty,
}

/// Ordered, lowercased set of file extensions (each with a leading dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoExtensions {
    extensions: Vec<String>,
}

impl Default for VideoExtensions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }
}

impl VideoExtensions {
    /// Builds the set from individual entries such as `"mp4"`, `".MKV"` or `" .avi "`.
    ///
    /// Entries are trimmed, lowercased and given a leading dot; blank entries and
    /// repeats are dropped, keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Empty`] if no usable entry remains.
    pub fn new<I, S>(entries: I) -> Result<Self, ExtensionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = Vec::new();
        for entry in entries {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut ext = trimmed.to_lowercase();
            if !ext.starts_with('.') {
                ext.insert(0, '.');
            }
            if !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }

        if extensions.is_empty() {
            return Err(ExtensionError::Empty);
        }
        Ok(Self { extensions })
    }

    /// Parses a comma separated list, e.g. `".mp4, mkv,.AVI"`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Empty`] if the list holds no usable entry.
    pub fn parse(list: &str) -> Result<Self, ExtensionError> {
        Self::new(list.split(','))
    }

    /// Case-insensitive suffix match against a bare file name.
    #[must_use]
    pub fn matches_name(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }

    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matches_name(&name.to_string_lossy()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl fmt::Display for VideoExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extensions.join(", "))
    }
}
