//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{NewSnippet, OwnerId, RevealedSnippet, Snippet, SnippetId, SnippetSummary};

/// Trait for storing and consuming snippets
///
/// Implemented by the infrastructure layer (flashpaper-store). Every
/// operation whose outcome depends on time takes `now` (Unix seconds)
/// explicitly.
pub trait SnippetStore {
    /// Error type for store operations
    type Error;

    /// Seal and persist a new snippet with zero views
    fn create(&mut self, request: NewSnippet, now: u64) -> Result<Snippet, Self::Error>;

    /// Atomically check liveness, count one view and reveal the plaintext
    ///
    /// Across all concurrent callers, at most `max_views` calls succeed.
    fn consume(&mut self, id: SnippetId, now: u64) -> Result<RevealedSnippet, Self::Error>;

    /// Delete a snippet only if `owner` created it
    fn delete_by_owner(&mut self, id: SnippetId, owner: OwnerId) -> Result<(), Self::Error>;

    /// Get the stored record (ciphertext only) without consuming a view
    fn get_snippet(&self, id: SnippetId) -> Result<Option<Snippet>, Self::Error>;

    /// Aggregate counts for an owner's snippets
    fn stats(&self, owner: OwnerId, now: u64) -> Result<SnippetStats, Self::Error>;

    /// Page through an owner's alive snippets, newest first
    fn list_alive(
        &self,
        owner: OwnerId,
        now: u64,
        page: PageRequest,
    ) -> Result<Page<SnippetSummary>, Self::Error>;

    /// Delete every expired or burnt snippet, returning the number removed
    fn purge_dead(&mut self, now: u64) -> Result<usize, Self::Error>;

    /// Count the snippets `purge_dead` would remove
    fn count_dead(&self, now: u64) -> Result<usize, Self::Error>;
}

/// Aggregate counts for one owner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnippetStats {
    /// Snippets that may still be revealed
    pub alive: u64,

    /// Snippets at their view ceiling, not yet swept
    pub burnt: u64,

    /// Views across the owner's alive snippets; burnt snippets add nothing
    pub total_views: u64,
}

/// Pagination request (1-based page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,

    /// Items per page
    pub per_page: u32,
}

impl PageRequest {
    /// Largest accepted page size
    pub const MAX_PER_PAGE: u32 = 100;

    /// Create a request, clamping page to at least 1 and size to 1..=MAX_PER_PAGE
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Page number
    pub page: u32,

    /// Requested page size
    pub per_page: u32,

    /// Matching items across all pages
    pub total_items: u64,
}

impl<T> Page<T> {
    /// Number of pages needed for `total_items`
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(self.per_page))
    }
}
