//! `pagemeta_core` extracts the static `metadata` export declared by the page
//! files of a file-based routing web application and aggregates it into a
//! single JSON index of route paths and metadata.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Options (pagemeta.toml / plugin options)
//!   → Discovery (globs page files under the search directory)
//!   → Syntax (parses each file with tree-sitter JS / TS / TSX grammars)
//!   → Extractor (finds the static `metadata` object, keeps whitelisted literal fields)
//!   → Change detector (order-insensitive fingerprint of the whole collection)
//!   → Output (pretty JSON index, written only when the fingerprint changed)
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Collector and plugin options, defaults and `pagemeta.toml`
//!   loading.
//! - [`extractor`] - Literal metadata extraction from a parsed page.
//! - [`checksum`] - Collection fingerprints and the [`ChangeDetector`].
//! - [`collector`] - The collection run and output writing.
//! - [`plugin`] - Build host integration with development-mode debouncing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use pagemeta_core::ChangeDetector;
//! use pagemeta_core::CollectorOptions;
//! use pagemeta_core::collect_metadata;
//!
//! let mut detector = ChangeDetector::new();
//! let pages = collect_metadata(Path::new("."), &CollectorOptions::default(), &mut detector)
//! 	.unwrap();
//!
//! for page in &pages {
//! 	println!("{} {:?}", page.pathname, page.metadata.get("title"));
//! }
//! ```

pub use checksum::*;
pub use collector::*;
pub use config::*;
pub use discovery::*;
pub use error::*;
pub use extractor::*;
pub use metadata::*;
pub use plugin::*;
pub use syntax::SourceLanguage;

pub mod checksum;
pub mod collector;
pub mod config;
mod discovery;
#[allow(unused_assignments)]
mod error;
pub mod extractor;
mod metadata;
pub mod plugin;
pub mod syntax;

#[cfg(test)]
mod __fixtures;
