//! Flashpaper Storage Layer
//!
//! Implements the SnippetStore trait on SQLite.
//!
//! # Architecture
//!
//! - SQLite holds one row per snippet; content is stored only as ciphertext
//! - Consume runs in a `BEGIN IMMEDIATE` transaction: the write lock is taken
//!   before the row is read, so two readers can never both observe the same
//!   pre-increment view count
//! - The increment itself is guarded (`WHERE current_views < max_views`) and
//!   the schema enforces `current_views <= max_views`
//! - Plaintext is produced only after commit, on the consume return path
//!
//! # Examples
//!
//! ```no_run
//! use flashpaper_cipher::SnippetCipher;
//! use flashpaper_domain::{lifecycle, NewSnippet, SnippetStore};
//! use flashpaper_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cipher = SnippetCipher::from_env()?;
//! let mut store = SqliteStore::open("flashpaper.db", cipher)?;
//!
//! let now = lifecycle::unix_now();
//! let snippet = store.create(NewSnippet::new("hunter2").with_max_views(1), now)?;
//! let revealed = store.consume(snippet.id, now)?;
//! assert_eq!(revealed.content, "hunter2");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;

pub use error::StoreError;

use flashpaper_cipher::SnippetCipher;
use flashpaper_domain::{
    LanguageAllowList, Liveness, NewSnippet, OwnerId, Page, PageRequest, RevealedSnippet,
    Snippet, SnippetId, SnippetStats, SnippetStore, SnippetSummary,
};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

macro_rules! snippet_columns {
    () => {
        "id, owner_id, ciphertext, title, language, max_views, current_views, expires_at, created_at"
    };
}

// Mirrors lifecycle::is_sweepable; ?1 is `now`.
macro_rules! sweepable_predicate {
    () => {
        "expires_at < ?1 OR (max_views > 0 AND current_views >= max_views)"
    };
}

// Mirrors lifecycle::is_alive for one owner; ?1 is the owner, ?2 is `now`.
macro_rules! owner_alive_predicate {
    () => {
        "owner_id = ?1 AND expires_at >= ?2 AND current_views < max_views"
    };
}

/// Tuning for a store connection
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// How long a writer waits for the database lock before failing
    pub busy_timeout: Duration,

    /// Language tags accepted at creation
    pub languages: LanguageAllowList,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            languages: LanguageAllowList::default(),
        }
    }
}

/// SQLite-based implementation of SnippetStore
///
/// # Thread Safety
///
/// SQLite connections are not shared between threads. Each request-handling
/// thread should open its own SqliteStore on the same database file; the
/// consume transaction serializes them through SQLite's write lock.
///
/// That lock covers the whole database, so consumers of different snippets
/// also queue behind each other, and a caller still waiting after
/// [`StoreOptions::busy_timeout`] fails with [`StoreError::Storage`].
pub struct SqliteStore {
    conn: Connection,
    cipher: SnippetCipher,
    languages: LanguageAllowList,
}

impl SqliteStore {
    /// Open (or create) a database file with default options
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use flashpaper_cipher::SnippetCipher;
    /// use flashpaper_store::SqliteStore;
    ///
    /// let cipher = SnippetCipher::new(&[7u8; 32]).unwrap();
    /// let store = SqliteStore::open("flashpaper.db", cipher).unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, cipher: SnippetCipher) -> Result<Self, StoreError> {
        Self::open_with(path, cipher, StoreOptions::default())
    }

    /// Open (or create) a database file
    pub fn open_with<P: AsRef<Path>>(
        path: P,
        cipher: SnippetCipher,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, cipher, options)
    }

    /// Create a private in-memory database (useful for testing)
    pub fn in_memory(cipher: SnippetCipher) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, cipher, StoreOptions::default())
    }

    /// Wrap an already opened connection
    pub fn from_connection(
        conn: Connection,
        cipher: SnippetCipher,
        options: StoreOptions,
    ) -> Result<Self, StoreError> {
        conn.busy_timeout(options.busy_timeout)?;
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %journal_mode, "sqlite connection configured");

        let mut store = Self {
            conn,
            cipher,
            languages: options.languages,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Language allow-list applied at creation
    pub fn languages(&self) -> &LanguageAllowList {
        &self.languages
    }

    /// Convert an identifier value to bytes for storage
    fn id_to_bytes(value: u128) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    /// Convert stored bytes back to an identifier value
    fn bytes_to_id(bytes: &[u8]) -> Result<u128, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for identifier, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(u128::from_be_bytes(arr))
    }

    fn id_column(row: &Row<'_>, index: usize) -> rusqlite::Result<u128> {
        let bytes: Vec<u8> = row.get(index)?;
        Self::bytes_to_id(&bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Blob,
                Box::new(e),
            )
        })
    }

    fn row_to_snippet(row: &Row<'_>) -> rusqlite::Result<Snippet> {
        let owner = match row.get::<_, Option<Vec<u8>>>(1)? {
            Some(bytes) => Some(OwnerId::from_value(Self::bytes_to_id(&bytes).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Blob,
                    Box::new(e),
                )
            })?)),
            None => None,
        };

        Ok(Snippet {
            id: SnippetId::from_value(Self::id_column(row, 0)?),
            owner,
            ciphertext: row.get(2)?,
            title: row.get(3)?,
            language: row.get(4)?,
            max_views: row.get(5)?,
            current_views: row.get(6)?,
            expires_at: row.get::<_, i64>(7)? as u64,
            created_at: row.get::<_, i64>(8)? as u64,
        })
    }

    fn select_snippet(conn: &Connection, id: SnippetId) -> Result<Option<Snippet>, StoreError> {
        let snippet = conn
            .query_row(
                concat!("SELECT ", snippet_columns!(), " FROM snippets WHERE id = ?1"),
                params![Self::id_to_bytes(id.value())],
                Self::row_to_snippet,
            )
            .optional()?;
        Ok(snippet)
    }

    fn validate(request: &NewSnippet, now: u64) -> Result<u64, StoreError> {
        if request.max_views == 0 {
            return Err(StoreError::Validation(
                "max_views must be greater than zero".to_string(),
            ));
        }
        if request.ttl_minutes == 0 {
            return Err(StoreError::Validation(
                "ttl_minutes must be greater than zero".to_string(),
            ));
        }
        if request.content.trim().is_empty() {
            return Err(StoreError::Validation("content must not be empty".to_string()));
        }

        request
            .ttl_minutes
            .checked_mul(60)
            .and_then(|secs| now.checked_add(secs))
            .filter(|expires_at| *expires_at <= i64::MAX as u64)
            .ok_or_else(|| StoreError::Validation("ttl_minutes is too large".to_string()))
    }
}

impl SnippetStore for SqliteStore {
    type Error = StoreError;

    fn create(&mut self, request: NewSnippet, now: u64) -> Result<Snippet, Self::Error> {
        let expires_at = Self::validate(&request, now)?;

        let ciphertext = self.cipher.seal_str(request.content.trim())?;
        let snippet = Snippet {
            id: SnippetId::new(),
            owner: request.owner,
            ciphertext,
            title: request.title.trim().to_string(),
            language: self.languages.normalize(&request.language),
            max_views: request.max_views,
            current_views: 0,
            expires_at,
            created_at: now,
        };

        self.conn.execute(
            concat!(
                "INSERT INTO snippets (",
                snippet_columns!(),
                ") VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ),
            params![
                Self::id_to_bytes(snippet.id.value()),
                snippet.owner.map(|o| Self::id_to_bytes(o.value())),
                &snippet.ciphertext,
                &snippet.title,
                &snippet.language,
                snippet.max_views,
                snippet.current_views,
                snippet.expires_at as i64,
                snippet.created_at as i64,
            ],
        )?;

        tracing::info!(
            snippet_id = %snippet.id,
            max_views = snippet.max_views,
            expires_at = snippet.expires_at,
            "snippet created"
        );
        Ok(snippet)
    }

    fn consume(&mut self, id: SnippetId, now: u64) -> Result<RevealedSnippet, Self::Error> {
        // Dropping `tx` without commit rolls back, including during unwinding.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(snippet) = Self::select_snippet(&tx, id)? else {
            tracing::debug!(snippet_id = %id, "consume rejected: not found");
            return Err(StoreError::NotFound);
        };

        match Liveness::evaluate(&snippet, now) {
            Liveness::Alive => {}
            Liveness::Expired => {
                tracing::debug!(snippet_id = %id, "consume rejected: expired");
                return Err(StoreError::Expired);
            }
            Liveness::Burnt => {
                tracing::debug!(snippet_id = %id, "consume rejected: burnt");
                return Err(StoreError::Burnt);
            }
        }

        let updated = tx.execute(
            "UPDATE snippets SET current_views = current_views + 1
             WHERE id = ?1 AND current_views < max_views",
            params![Self::id_to_bytes(id.value())],
        )?;
        if updated != 1 {
            return Err(StoreError::Burnt);
        }
        tx.commit()?;

        let current_views = snippet.current_views + 1;
        tracing::debug!(
            snippet_id = %id,
            current_views,
            max_views = snippet.max_views,
            "view consumed"
        );

        // The view stays consumed even if the content cannot be opened.
        let content = self
            .cipher
            .open_to_string(&snippet.ciphertext)
            .map_err(|e| {
                tracing::warn!(snippet_id = %id, error = %e, "view consumed but content could not be decrypted");
                StoreError::Decryption(e)
            })?;

        Ok(RevealedSnippet {
            id: snippet.id,
            title: snippet.title,
            language: snippet.language,
            content,
            current_views,
            max_views: snippet.max_views,
            expires_at: snippet.expires_at,
            created_at: snippet.created_at,
        })
    }

    fn delete_by_owner(&mut self, id: SnippetId, owner: OwnerId) -> Result<(), Self::Error> {
        let affected = self.conn.execute(
            "DELETE FROM snippets WHERE id = ?1 AND owner_id = ?2",
            params![
                Self::id_to_bytes(id.value()),
                Self::id_to_bytes(owner.value())
            ],
        )?;

        if affected == 0 {
            return Err(StoreError::NotFound);
        }

        tracing::info!(snippet_id = %id, "snippet deleted by owner");
        Ok(())
    }

    fn get_snippet(&self, id: SnippetId) -> Result<Option<Snippet>, Self::Error> {
        Self::select_snippet(&self.conn, id)
    }

    fn stats(&self, owner: OwnerId, now: u64) -> Result<SnippetStats, Self::Error> {
        // One statement, so all three figures come from the same snapshot.
        let (alive, burnt, total_views): (i64, i64, i64) = self.conn.query_row(
            "SELECT
                 COALESCE(SUM(CASE WHEN current_views < max_views THEN 1 ELSE 0 END), 0),
                 COALESCE(SUM(CASE WHEN current_views >= max_views THEN 1 ELSE 0 END), 0),
                 COALESCE(SUM(CASE WHEN current_views < max_views THEN current_views ELSE 0 END), 0)
             FROM snippets
             WHERE owner_id = ?1 AND expires_at >= ?2",
            params![Self::id_to_bytes(owner.value()), now as i64],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(SnippetStats {
            alive: alive as u64,
            burnt: burnt as u64,
            total_views: total_views as u64,
        })
    }

    fn list_alive(
        &self,
        owner: OwnerId,
        now: u64,
        page: PageRequest,
    ) -> Result<Page<SnippetSummary>, Self::Error> {
        let owner_bytes = Self::id_to_bytes(owner.value());
        let tx = self.conn.unchecked_transaction()?;

        let total_items: i64 = tx.query_row(
            concat!("SELECT COUNT(*) FROM snippets WHERE ", owner_alive_predicate!()),
            params![&owner_bytes, now as i64],
            |row| row.get(0),
        )?;

        let items = {
            let mut stmt = tx.prepare(concat!(
                "SELECT ",
                snippet_columns!(),
                " FROM snippets WHERE ",
                owner_alive_predicate!(),
                " ORDER BY created_at DESC, id LIMIT ?3 OFFSET ?4"
            ))?;
            let rows = stmt.query_map(
                params![
                    &owner_bytes,
                    now as i64,
                    i64::from(page.per_page),
                    page.offset() as i64
                ],
                Self::row_to_snippet,
            )?;
            rows.map(|r| r.map(|s| SnippetSummary::from(&s)))
                .collect::<Result<Vec<_>, _>>()?
        };
        tx.commit()?;

        Ok(Page {
            items,
            page: page.page,
            per_page: page.per_page,
            total_items: total_items as u64,
        })
    }

    fn purge_dead(&mut self, now: u64) -> Result<usize, Self::Error> {
        let deleted = self.conn.execute(
            concat!("DELETE FROM snippets WHERE ", sweepable_predicate!()),
            params![now as i64],
        )?;
        Ok(deleted)
    }

    fn count_dead(&self, now: u64) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            concat!("SELECT COUNT(*) FROM snippets WHERE ", sweepable_predicate!()),
            params![now as i64],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::in_memory(SnippetCipher::new(&[3u8; 32]).unwrap()).unwrap()
    }

    #[test]
    fn test_id_bytes_roundtrip() {
        let value = SnippetId::new().value();
        let bytes = SqliteStore::id_to_bytes(value);
        assert_eq!(bytes.len(), 16);
        assert_eq!(SqliteStore::bytes_to_id(&bytes).unwrap(), value);
        assert!(SqliteStore::bytes_to_id(&bytes[..8]).is_err());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let mut store = store();
        store.initialize_schema().unwrap();
        store.initialize_schema().unwrap();
    }

    #[test]
    fn test_ciphertext_at_rest() {
        let mut store = store();
        let snippet = store
            .create(NewSnippet::new("plaintext marker"), 1_000)
            .unwrap();

        let stored: Vec<u8> = store
            .conn
            .query_row(
                "SELECT ciphertext FROM snippets WHERE id = ?1",
                params![SqliteStore::id_to_bytes(snippet.id.value())],
                |row| row.get(0),
            )
            .unwrap();
        assert!(!stored
            .windows(b"plaintext marker".len())
            .any(|w| w == b"plaintext marker"));
    }

    #[test]
    fn test_failed_consume_leaves_no_transaction_open() {
        let mut store = store();
        let snippet = store.create(NewSnippet::new("x"), 1_000).unwrap();

        assert!(matches!(
            store.consume(snippet.id, 1_000_000),
            Err(StoreError::Expired)
        ));
        assert!(store.conn.is_autocommit());

        assert!(matches!(
            store.consume(SnippetId::new(), 1_000),
            Err(StoreError::NotFound)
        ));
        assert!(store.conn.is_autocommit());
    }

    #[test]
    fn test_write_lock_blocks_other_snippets_until_busy_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock.db");
        let key = [3u8; 32];

        let mut holder = SqliteStore::open(&path, SnippetCipher::new(&key).unwrap()).unwrap();
        let other = holder.create(NewSnippet::new("other"), 1_000).unwrap();

        let options = StoreOptions {
            busy_timeout: Duration::from_millis(50),
            ..StoreOptions::default()
        };
        let mut waiter =
            SqliteStore::open_with(&path, SnippetCipher::new(&key).unwrap(), options).unwrap();

        let tx = holder
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .unwrap();

        let result = waiter.consume(other.id, 1_000);
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert!(waiter.conn.is_autocommit());

        drop(tx);
        assert_eq!(waiter.consume(other.id, 1_000).unwrap().content, "other");
    }

    #[test]
    fn test_panic_inside_transaction_rolls_back() {
        let mut store = store();
        let snippet = store.create(NewSnippet::new("x"), 1_000).unwrap();
        let id_bytes = SqliteStore::id_to_bytes(snippet.id.value());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let tx = store
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .unwrap();
            tx.execute(
                "UPDATE snippets SET current_views = current_views + 1 WHERE id = ?1",
                params![&id_bytes],
            )
            .unwrap();
            panic!("fault mid-transaction");
        }));
        assert!(result.is_err());

        assert!(store.conn.is_autocommit());
        let stored = store.get_snippet(snippet.id).unwrap().unwrap();
        assert_eq!(stored.current_views, 0);
    }
}
