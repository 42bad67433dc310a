//! Configuration constants and validation functions for the harvester.

use std::path::{Path, PathBuf};

use crate::error::{HarvesterError, Result};

/// Base URL for document pages on the official legal information portal.
pub const SOURCE_URL_BASE: &str = "http://pravo.gov.ru/proxy/ips/?docbody=&nd=";

/// Minimum cleaned text length (in characters) for full-text parsing.
///
/// Shorter texts produce a metadata-only placeholder provision.
pub const MIN_TEXT_LENGTH: usize = 50;

/// Article header remainders at or above this length are body text, not titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// A stored placeholder provision longer than this counts as real content.
pub const PRIOR_CONTENT_THRESHOLD: usize = 200;

/// HTTP timeout in seconds.
///
/// Batch exports run to hundreds of megabytes.
pub const HTTP_TIMEOUT_SECS: u64 = 120;

/// Default output directory for per-law seed records.
pub const DEFAULT_SEED_DIR: &str = "data/seed";

/// Default path of the census file.
pub const DEFAULT_CENSUS_PATH: &str = "data/census.json";

/// Source attribution written into the census.
pub const CENSUS_SOURCE: &str = "RusLawOD (irlspbru/RusLawOD) via pravo.gov.ru";

/// Description written into the census.
pub const CENSUS_DESCRIPTION: &str = "Full census of Russian Federation federal legislation";

/// Runtime options for an ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Directory holding one JSON record per law.
    pub seed_dir: PathBuf,

    /// Where the census is written.
    pub census_path: PathBuf,

    /// Only classify rows, do not parse or write provisions.
    pub census_only: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            seed_dir: PathBuf::from(DEFAULT_SEED_DIR),
            census_path: PathBuf::from(DEFAULT_CENSUS_PATH),
            census_only: false,
        }
    }
}

impl IngestOptions {
    /// Path of the seed record for a law id.
    #[must_use]
    pub fn seed_path(&self, law_id: &str) -> PathBuf {
        seed_path(&self.seed_dir, law_id)
    }
}

/// Path of the seed record for a law id inside `seed_dir`.
#[must_use]
pub fn seed_path(seed_dir: &Path, law_id: &str) -> PathBuf {
    seed_dir.join(format!("{law_id}.json"))
}

/// Build the source URL for a document reference number.
///
/// Returns an empty string when the reference is empty.
///
/// # Examples
/// ```
/// use ruslaw_harvester::config::source_url;
///
/// assert_eq!(
///     source_url("102027595"),
///     "http://pravo.gov.ru/proxy/ips/?docbody=&nd=102027595"
/// );
/// assert_eq!(source_url(""), "");
/// ```
#[must_use]
pub fn source_url(nd: &str) -> String {
    if nd.is_empty() {
        String::new()
    } else {
        format!("{SOURCE_URL_BASE}{nd}")
    }
}

/// Validate a 1-based batch number against the number of inputs.
///
/// # Examples
/// ```
/// use ruslaw_harvester::config::validate_batch;
///
/// assert!(validate_batch(1, 11).is_ok());
/// assert!(validate_batch(0, 11).is_err());
/// assert!(validate_batch(12, 11).is_err());
/// ```
pub fn validate_batch(batch: usize, available: usize) -> Result<()> {
    if batch >= 1 && batch <= available {
        Ok(())
    } else {
        Err(HarvesterError::InvalidBatch { batch, available })
    }
}

/// Check whether an input names a remote batch.
#[must_use]
pub fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
