//! m3u-merge - Merge, deduplicate and reorder M3U playlists
//!
//! Several EXTM3U documents are folded into one: entries with the same
//! identity key are merged, their resource locators are unioned, and the
//! relative order each document gives its entries is preserved inside every
//! group. A single transform pass then either renames matching entries and
//! groups or reorders resources and groups by keyword priority.
//!
//! # Architecture
//!
//! - **playlist**: Entry model, parser, identity keys and serializer
//! - **merge**: Merge state and relative-order insertion
//! - **transform**: Classification, rename mode and sort mode
//! - **pipeline**: Load → merge → transform → render → commit
//! - **output**: Atomic file sink and in-memory sink
//! - **config**: YAML configuration and validation
//! - **commands**: CLI definitions

// Core modules
pub mod config;
pub mod error;
pub mod merge;
pub mod playlist;
pub mod transform;

// Pipeline and I/O
pub mod output;
pub mod pipeline;

// CLI support
pub mod commands;
pub mod logging;
pub mod style;

// Re-exports
pub use error::{M3uMergeError, Result};
