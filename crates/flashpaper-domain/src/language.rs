//! Language module - allow-list normalization for snippet language tags

use std::collections::BTreeSet;

/// Tag used when the requested language is not on the allow-list
pub const PLAIN_TEXT: &str = "text";

/// Tags accepted by default
pub const DEFAULT_LANGUAGES: [&str; 8] = [
    "text",
    "go",
    "python",
    "javascript",
    "java",
    "html",
    "css",
    "sql",
];

/// Allow-list of language tags a snippet may carry
///
/// Requested tags are trimmed and lowercased; anything not on the list
/// collapses to [`PLAIN_TEXT`], which is always allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageAllowList {
    tags: BTreeSet<String>,
}

impl LanguageAllowList {
    /// Build an allow-list from configured tags
    ///
    /// Tags are normalized the same way requests are; blank entries are
    /// ignored and [`PLAIN_TEXT`] is always added.
    ///
    /// # Examples
    ///
    /// ```
    /// use flashpaper_domain::LanguageAllowList;
    ///
    /// let list = LanguageAllowList::new(["Rust", " toml "]);
    /// assert_eq!(list.normalize("rust"), "rust");
    /// assert_eq!(list.normalize("python"), "text");
    /// ```
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: BTreeSet<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        set.insert(PLAIN_TEXT.to_string());
        Self { tags: set }
    }

    /// Normalize a requested tag against the allow-list
    pub fn normalize(&self, requested: &str) -> String {
        let tag = requested.trim().to_lowercase();
        if self.tags.contains(&tag) {
            tag
        } else {
            PLAIN_TEXT.to_string()
        }
    }

    /// Whether a (normalized) tag is allowed
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate the allowed tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl Default for LanguageAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES)
    }
}
