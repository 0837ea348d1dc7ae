//! Snippet module - the encrypted, self-destructing unit of storage

use std::fmt;

/// Unique identifier for a snippet based on a random UUIDv4
///
/// The identifier is the only external handle to a snippet, so it carries
/// 122 random bits and no timestamp or sequence component. Identifiers are
/// never reused once the snippet is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnippetId(u128);

impl SnippetId {
    /// Generate a new random SnippetId
    ///
    /// # Examples
    ///
    /// ```
    /// use flashpaper_domain::SnippetId;
    ///
    /// let a = SnippetId::new();
    /// let b = SnippetId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }

    /// Create a SnippetId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a SnippetId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use flashpaper_domain::SnippetId;
    ///
    /// let id = SnippetId::new();
    /// let parsed = SnippetId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid snippet id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for SnippetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Identifier of the principal that created a snippet
///
/// Issued by the authentication collaborator; the core only compares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u128);

impl OwnerId {
    /// Generate a new random OwnerId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }

    /// Create an OwnerId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an OwnerId from its hyphenated UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid owner id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A snippet as persisted by the store
///
/// Content is held only as ciphertext. The record is never edited: the
/// consume operation increments `current_views` and deletion removes it.
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Unique identifier
    pub id: SnippetId,

    /// Creating principal, `None` for anonymous snippets
    pub owner: Option<OwnerId>,

    /// Sealed content (nonce || ciphertext || tag)
    pub ciphertext: Vec<u8>,

    /// Free-form title
    pub title: String,

    /// Language tag, normalized against the allow-list at creation
    pub language: String,

    /// Ceiling on successful reveals, always positive
    pub max_views: u32,

    /// Successful reveals so far
    pub current_views: u32,

    /// Creation time plus the requested TTL
    pub expires_at: u64,

    /// When the snippet was created
    pub created_at: u64,
}

impl Snippet {
    /// Reveals still available before the snippet is burnt
    pub fn views_left(&self) -> u32 {
        self.max_views.saturating_sub(self.current_views)
    }
}

/// A request to create a snippet
///
/// Fields are raw caller input; the store trims, normalizes and validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    /// Creating principal, if authenticated
    pub owner: Option<OwnerId>,

    /// Plaintext content
    pub content: String,

    /// Free-form title
    pub title: String,

    /// Requested language tag
    pub language: String,

    /// Ceiling on successful reveals (must be > 0)
    pub max_views: u32,

    /// Lifetime in minutes (must be > 0)
    pub ttl_minutes: u64,
}

impl NewSnippet {
    /// Anonymous single-read request with a ten minute lifetime
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            owner: None,
            content: content.into(),
            title: String::new(),
            language: String::new(),
            max_views: 1,
            ttl_minutes: 10,
        }
    }

    /// Set the owner
    pub fn owned_by(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the requested language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the view ceiling
    pub fn with_max_views(mut self, max_views: u32) -> Self {
        self.max_views = max_views;
        self
    }

    /// Set the lifetime in minutes
    pub fn with_ttl_minutes(mut self, ttl_minutes: u64) -> Self {
        self.ttl_minutes = ttl_minutes;
        self
    }
}

/// The result of a successful consume: plaintext plus post-increment counters
#[derive(Clone, PartialEq, Eq)]
pub struct RevealedSnippet {
    /// Snippet identifier
    pub id: SnippetId,

    /// Title
    pub title: String,

    /// Language tag
    pub language: String,

    /// Decrypted content
    pub content: String,

    /// View count including this reveal
    pub current_views: u32,

    /// View ceiling
    pub max_views: u32,

    /// Expiry timestamp
    pub expires_at: u64,

    /// Creation timestamp
    pub created_at: u64,
}

impl RevealedSnippet {
    /// Reveals still available after this one
    pub fn views_left(&self) -> u32 {
        self.max_views.saturating_sub(self.current_views)
    }
}

// Plaintext stays out of Debug output so it never lands in logs.
impl fmt::Debug for RevealedSnippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealedSnippet")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("language", &self.language)
            .field("content", &"<redacted>")
            .field("current_views", &self.current_views)
            .field("max_views", &self.max_views)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Metadata-only view of a snippet for owner listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetSummary {
    /// Snippet identifier
    pub id: SnippetId,

    /// Title
    pub title: String,

    /// Language tag
    pub language: String,

    /// View ceiling
    pub max_views: u32,

    /// Successful reveals so far
    pub current_views: u32,

    /// Expiry timestamp
    pub expires_at: u64,

    /// Creation timestamp
    pub created_at: u64,
}

impl From<&Snippet> for SnippetSummary {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title.clone(),
            language: snippet.language.clone(),
            max_views: snippet.max_views,
            current_views: snippet.current_views,
            expires_at: snippet.expires_at,
            created_at: snippet.created_at,
        }
    }
}
