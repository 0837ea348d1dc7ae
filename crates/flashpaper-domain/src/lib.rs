//! Flashpaper Domain Layer
//!
//! This crate contains the core model for self-destructing snippets. Apart
//! from `uuid` for identifiers it has no external dependencies, and defines
//! the value types, lifecycle rules and trait interfaces that the store,
//! janitor and CLI depend upon.
//!
//! ## Key Concepts
//!
//! - **Snippet**: encrypted text that may be revealed a bounded number of times
//! - **Burnt**: a snippet whose view count reached its ceiling
//! - **Expired**: a snippet past its `expires_at`
//! - **Consume**: the atomic read that counts a view and reveals plaintext
//! - **Sweep**: the janitor pass that deletes expired and burnt snippets
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod language;
pub mod lifecycle;
pub mod snippet;
pub mod traits;

// Re-exports for convenience
pub use language::{LanguageAllowList, DEFAULT_LANGUAGES, PLAIN_TEXT};
pub use lifecycle::Liveness;
pub use snippet::{NewSnippet, OwnerId, RevealedSnippet, Snippet, SnippetId, SnippetSummary};
pub use traits::{Page, PageRequest, SnippetStats, SnippetStore};
