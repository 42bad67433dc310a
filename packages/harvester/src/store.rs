//! Seed records on disk.
//!
//! Each law is stored as `<seed_dir>/<law_id>.json`:
//!
//! ```json
//! {
//!   "law": { "id": "...", "title": "...", ..., "last_updated": "2024-05-01" },
//!   "provisions": [ { "article": "1", "title": "...", "content": "...", "order_index": 0 } ]
//! }
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{seed_path, PRIOR_CONTENT_THRESHOLD};
use crate::error::{HarvesterError, Result};
use crate::splitting::PLACEHOLDER_ARTICLE;
use crate::types::{Document, LawRecord, Provision};

/// Law metadata as stored in a seed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLaw {
    #[serde(flatten)]
    pub record: LawRecord,

    /// UTC date of the write (YYYY-MM-DD).
    #[serde(default)]
    pub last_updated: String,
}

/// One stored law with its provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub law: SeedLaw,
    pub provisions: Vec<Provision>,
}

impl SeedRecord {
    /// Wrap a document, stamping today's date.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        Self {
            law: SeedLaw {
                record: document.law,
                last_updated: Utc::now().date_naive().to_string(),
            },
            provisions: document.provisions,
        }
    }

    /// Whether the record already carries real provisions.
    ///
    /// A record is complete unless it holds only the metadata placeholder
    /// with no more than [`PRIOR_CONTENT_THRESHOLD`] characters of content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self.provisions.first() {
            Some(first) => {
                first.article != PLACEHOLDER_ARTICLE
                    || first.content.chars().count() > PRIOR_CONTENT_THRESHOLD
            }
            None => false,
        }
    }
}

/// Write serialized JSON to `path` atomically.
///
/// Writes to a hidden temp file next to the target, syncs it to disk and
/// renames it into place.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Directory of per-law seed records.
#[derive(Debug, Clone)]
pub struct SeedStore {
    dir: PathBuf,
}

impl SeedStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `law_id`.
    #[must_use]
    pub fn path(&self, law_id: &str) -> PathBuf {
        seed_path(&self.dir, law_id)
    }

    /// Read the record for `law_id`.
    ///
    /// Returns `Ok(None)` when no record exists.
    pub fn read(&self, law_id: &str) -> Result<Option<SeedRecord>> {
        let path = self.path(law_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| HarvesterError::Json { path, source })
    }

    /// Read a prior record, treating unreadable records as absent.
    ///
    /// An unreadable record is simply rewritten by the caller.
    #[must_use]
    pub fn read_prior(&self, law_id: &str) -> Option<SeedRecord> {
        match self.read(law_id) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(law_id, error = %e, "Ignoring unreadable seed record");
                None
            }
        }
    }

    /// Whether the record under `law_id` belongs to a document with another source URL.
    #[must_use]
    pub fn held_by_other(&self, law_id: &str, source_url: &str) -> bool {
        self.read_prior(law_id)
            .is_some_and(|record| record.law.record.source_url != source_url)
    }

    /// Write a document, replacing any existing record for its id.
    pub fn write(&self, document: Document) -> Result<PathBuf> {
        let path = self.path(&document.law.id);
        let record = SeedRecord::from_document(document);
        write_json_atomic(&path, &record)?;
        tracing::debug!(path = %path.display(), provisions = record.provisions.len(), "Wrote seed record");
        Ok(path)
    }

    /// Number of seed records in the store. Hidden and `_`-prefixed files are not records.
    pub fn count_records(&self) -> Result<usize> {
        if !self.dir.is_dir() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_record = path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('_') && !n.starts_with('.'));
            if is_record {
                count += 1;
            }
        }
        Ok(count)
    }
}
