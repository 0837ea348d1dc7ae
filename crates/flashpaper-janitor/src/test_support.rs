//! In-memory store for janitor unit tests

use flashpaper_domain::lifecycle;
use flashpaper_domain::{
    NewSnippet, OwnerId, Page, PageRequest, RevealedSnippet, Snippet, SnippetId, SnippetStats,
    SnippetStore, SnippetSummary,
};

pub(crate) struct MockStore {
    pub(crate) snippets: Vec<Snippet>,
    pub(crate) fail: bool,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self {
            snippets: Vec::new(),
            fail: false,
        }
    }

    pub(crate) fn add(&mut self, max_views: u32, current_views: u32, expires_at: u64) -> SnippetId {
        let id = SnippetId::new();
        self.snippets.push(Snippet {
            id,
            owner: None,
            ciphertext: vec![0u8; 28],
            title: String::new(),
            language: "text".to_string(),
            max_views,
            current_views,
            expires_at,
            created_at: 0,
        });
        id
    }

    fn check(&self) -> Result<(), String> {
        if self.fail {
            Err("database is locked".to_string())
        } else {
            Ok(())
        }
    }
}

impl SnippetStore for MockStore {
    type Error = String;

    fn create(&mut self, _request: NewSnippet, _now: u64) -> Result<Snippet, Self::Error> {
        Err("not supported".to_string())
    }

    fn consume(&mut self, _id: SnippetId, _now: u64) -> Result<RevealedSnippet, Self::Error> {
        Err("not supported".to_string())
    }

    fn delete_by_owner(&mut self, _id: SnippetId, _owner: OwnerId) -> Result<(), Self::Error> {
        Err("not supported".to_string())
    }

    fn get_snippet(&self, id: SnippetId) -> Result<Option<Snippet>, Self::Error> {
        Ok(self.snippets.iter().find(|s| s.id == id).cloned())
    }

    fn stats(&self, _owner: OwnerId, _now: u64) -> Result<SnippetStats, Self::Error> {
        Ok(SnippetStats::default())
    }

    fn list_alive(
        &self,
        _owner: OwnerId,
        _now: u64,
        page: PageRequest,
    ) -> Result<Page<SnippetSummary>, Self::Error> {
        Ok(Page {
            items: Vec::new(),
            page: page.page,
            per_page: page.per_page,
            total_items: 0,
        })
    }

    fn purge_dead(&mut self, now: u64) -> Result<usize, Self::Error> {
        self.check()?;
        let before = self.snippets.len();
        self.snippets.retain(|s| !lifecycle::is_sweepable(s, now));
        Ok(before - self.snippets.len())
    }

    fn count_dead(&self, now: u64) -> Result<usize, Self::Error> {
        self.check()?;
        Ok(self
            .snippets
            .iter()
            .filter(|s| lifecycle::is_sweepable(s, now))
            .count())
    }
}
