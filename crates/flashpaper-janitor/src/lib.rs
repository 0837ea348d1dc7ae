//! Flashpaper Janitor
//!
//! Background maintenance service that reclaims dead snippets.
//!
//! # Overview
//!
//! A snippet is dead once it has expired or its view ceiling has been
//! reached. Reads already refuse dead snippets, so the Janitor exists only to
//! reclaim storage:
//! - **Sweeping**: one bulk delete of every dead row per cycle
//! - **Dry runs**: count what a sweep would delete without deleting it
//! - **Metrics collection**: track sweeps, failures and deletions
//!
//! A failed sweep is logged and retried on the next tick. The worker stops
//! when its shutdown future resolves; a sweep in progress is never cut short.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use flashpaper_cipher::SnippetCipher;
//! use flashpaper_janitor::Janitor;
//! use flashpaper_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::open("flashpaper.db", SnippetCipher::from_env()?)?;
//! let mut janitor = Janitor::default_config();
//!
//! let metrics = janitor.sweep(&mut store)?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The Janitor can be configured via TOML:
//!
//! ```toml
//! [janitor]
//! sweep_interval_secs = 10
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;
mod worker;

#[cfg(test)]
mod test_support;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::Janitor;
pub use metrics::JanitorMetrics;
pub use worker::JanitorWorker;
