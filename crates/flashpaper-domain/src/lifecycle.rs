//! Lifecycle policy shared by the store and the janitor
//!
//! Pure predicates over a snippet snapshot and the current time. The store
//! applies them inside the consume transaction; the janitor's bulk delete
//! encodes [`is_sweepable`] in SQL.

use crate::Snippet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The snippet's lifetime has passed
pub fn is_expired(snippet: &Snippet, now: u64) -> bool {
    now > snippet.expires_at
}

/// The snippet has been revealed as often as allowed
pub fn is_burnt(snippet: &Snippet) -> bool {
    snippet.current_views >= snippet.max_views
}

/// The snippet may still be revealed
pub fn is_alive(snippet: &Snippet, now: u64) -> bool {
    !is_expired(snippet, now) && !is_burnt(snippet)
}

/// The janitor may delete the snippet
///
/// `max_views > 0` guards rows that never had a ceiling; the store rejects
/// those at creation, but the sweep stays safe for them.
pub fn is_sweepable(snippet: &Snippet, now: u64) -> bool {
    is_expired(snippet, now) || (snippet.max_views > 0 && is_burnt(snippet))
}

/// Outcome of evaluating a snippet for a read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    /// May be revealed
    Alive,

    /// Past `expires_at`
    Expired,

    /// View ceiling reached
    Burnt,
}

impl Liveness {
    /// Evaluate a snippet at `now`
    ///
    /// Expiry is checked before the view ceiling, so a snippet that is both
    /// expired and burnt reports `Expired`.
    pub fn evaluate(snippet: &Snippet, now: u64) -> Self {
        if is_expired(snippet, now) {
            Liveness::Expired
        } else if is_burnt(snippet) {
            Liveness::Burnt
        } else {
            Liveness::Alive
        }
    }

    /// Get the liveness name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Liveness::Alive => "alive",
            Liveness::Expired => "expired",
            Liveness::Burnt => "burnt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SnippetId;

    fn snippet(max_views: u32, current_views: u32, expires_at: u64) -> Snippet {
        Snippet {
            id: SnippetId::new(),
            owner: None,
            ciphertext: Vec::new(),
            title: String::new(),
            language: "text".to_string(),
            max_views,
            current_views,
            expires_at,
            created_at: 0,
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        let s = snippet(1, 0, 100);
        assert!(!is_expired(&s, 99));
        assert!(!is_expired(&s, 100));
        assert!(is_expired(&s, 101));
    }

    #[test]
    fn test_burnt_at_ceiling() {
        assert!(!is_burnt(&snippet(2, 1, 100)));
        assert!(is_burnt(&snippet(2, 2, 100)));
        assert!(is_burnt(&snippet(2, 3, 100)));
    }

    #[test]
    fn test_alive_requires_both() {
        assert!(is_alive(&snippet(2, 1, 100), 50));
        assert!(!is_alive(&snippet(2, 2, 100), 50));
        assert!(!is_alive(&snippet(2, 1, 100), 150));
    }

    #[test]
    fn test_sweepable() {
        assert!(is_sweepable(&snippet(1, 0, 100), 101));
        assert!(is_sweepable(&snippet(1, 1, 100), 50));
        assert!(!is_sweepable(&snippet(1, 0, 100), 50));
        // No ceiling and not expired: kept
        assert!(!is_sweepable(&snippet(0, 0, 100), 50));
    }

    #[test]
    fn test_evaluate_prefers_expired() {
        assert_eq!(Liveness::evaluate(&snippet(1, 1, 100), 200), Liveness::Expired);
        assert_eq!(Liveness::evaluate(&snippet(1, 1, 100), 50), Liveness::Burnt);
        assert_eq!(Liveness::evaluate(&snippet(1, 0, 100), 50), Liveness::Alive);
    }

    #[test]
    fn test_unix_now_is_reasonable() {
        // After 2020-01-01, before 2100-01-01
        let now = unix_now();
        assert!(now > 1_577_836_800 && now < 4_102_444_800);
    }
}
