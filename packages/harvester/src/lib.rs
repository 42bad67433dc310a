//! RusLaw Harvester - Ingest Russian federal legislation from RusLawOD.
//!
//! This crate turns rows of the RusLawOD dataset into per-law seed records
//! (metadata plus article-level provisions) and a census of all federal
//! legislation.
//!
//! # Example
//!
//! ```
//! use ruslaw_harvester::splitting::segment_text;
//! use ruslaw_harvester::text::normalize_text;
//!
//! let cleaned = normalize_text("Статья 1. Общие положения\n<ref nd=\"1\">Текст</ref> статьи.");
//! let provisions = segment_text(&cleaned);
//! assert_eq!(provisions[0].article, "1");
//! assert_eq!(provisions[0].title, "Общие положения");
//! assert_eq!(provisions[0].content, "Текст статьи.");
//! ```
//!
//! # Architecture
//!
//! The parsing core is pure and never fails:
//!
//! - [`text`]: Markup removal and whitespace normalization
//! - [`splitting`]: Article segmentation, deduplication and fallbacks
//! - [`identifier`]: Canonical law identifiers
//! - [`classification`]: Law type, status and effective date
//!
//! Around it:
//!
//! - [`types`]: Core data types (SourceRow, LawRecord, Provision, etc.)
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for remote batches
//! - [`source`]: JSON Lines batch loading
//! - [`store`]: Seed records on disk
//! - [`census`]: Census entries, collisions and statistics
//! - [`harvester`]: Batch driver
//! - [`cli`]: Command-line interface

pub mod census;
pub mod classification;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvester;
pub mod http;
pub mod identifier;
pub mod source;
pub mod splitting;
pub mod store;
pub mod text;
pub mod types;

// Re-export main functionality
pub use harvester::{process_row, Harvester};

// Re-export commonly used types
pub use error::{HarvesterError, Result};
pub use types::{Document, LawRecord, LawStatus, LawType, Provision, SourceRow};
