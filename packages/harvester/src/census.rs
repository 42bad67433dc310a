//! Census of all federal legislation seen in a run.
//!
//! The census lists every classified document (with or without full text)
//! plus aggregate counts. Identifier collisions are resolved here: the
//! resolver derives ids from metadata alone, so two distinct documents can
//! map to the same id.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{CENSUS_DESCRIPTION, CENSUS_SOURCE};
use crate::error::Result;
use crate::store::write_json_atomic;
use crate::types::{DocumentClass, LawRecord, LawStatus, LawType};

/// Characters of the document reference used to disambiguate a colliding id.
pub const COLLISION_SUFFIX_CHARS: usize = 6;

/// One document in the census.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusEntry {
    pub id: String,
    pub nd: String,
    pub title: String,
    pub identifier: String,
    pub law_type: LawType,
    pub status: LawStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    pub classification: DocumentClass,
    pub source_url: String,
}

impl CensusEntry {
    /// Build an entry from a law record.
    #[must_use]
    pub fn new(law: &LawRecord, nd: &str, classification: DocumentClass) -> Self {
        Self {
            id: law.id.clone(),
            nd: nd.to_string(),
            title: law.title.clone(),
            identifier: law.identifier.clone(),
            law_type: law.law_type,
            status: law.status,
            effective_date: law.effective_date.clone(),
            classification,
            source_url: law.source_url.clone(),
        }
    }
}

/// Outcome of claiming an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// First use of the id.
    New,

    /// The id belongs to another document; use this one instead.
    Renamed(String),

    /// The same document was already claimed.
    Duplicate,
}

/// Identifiers claimed so far, keyed to their document reference.
#[derive(Debug, Default)]
pub struct IdRegistry {
    claimed: HashMap<String, String>,
    collisions: usize,
}

impl IdRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` for the document `nd`.
    ///
    /// The first document keeps the id. A different document gets
    /// `<id>-<last 6 chars of nd>`, with a numeric suffix if that is taken
    /// too. The same document claimed twice is a duplicate.
    ///
    /// # Examples
    /// ```
    /// use ruslaw_harvester::census::{Claim, IdRegistry};
    ///
    /// let mut registry = IdRegistry::new();
    /// assert_eq!(registry.claim("fz-1-2000", "102065421"), Claim::New);
    /// assert_eq!(registry.claim("fz-1-2000", "102065421"), Claim::Duplicate);
    /// assert_eq!(
    ///     registry.claim("fz-1-2000", "102077777"),
    ///     Claim::Renamed("fz-1-2000-077777".to_string())
    /// );
    /// ```
    pub fn claim(&mut self, id: &str, nd: &str) -> Claim {
        self.claim_with(id, nd, |_| false)
    }

    /// Claim `id` for `nd`, also treating ids for which `held_elsewhere`
    /// returns true as taken.
    ///
    /// `held_elsewhere` reports ids owned by another document outside this
    /// registry, such as seed records left by an earlier run.
    pub fn claim_with<F>(&mut self, id: &str, nd: &str, mut held_elsewhere: F) -> Claim
    where
        F: FnMut(&str) -> bool,
    {
        match self.claimed.get(id) {
            None if !held_elsewhere(id) => {
                self.claimed.insert(id.to_string(), nd.to_string());
                return Claim::New;
            }
            Some(owner) if owner == nd => return Claim::Duplicate,
            _ => {}
        }

        let suffix = nd_suffix(nd);
        let base = if suffix.is_empty() {
            id.to_string()
        } else {
            format!("{id}-{suffix}")
        };

        let mut candidate = base.clone();
        let mut counter = 2;
        loop {
            match self.claimed.get(&candidate) {
                None if candidate != id && !held_elsewhere(&candidate) => break,
                Some(owner) if owner == nd && candidate != id => return Claim::Duplicate,
                _ => {
                    candidate = format!("{base}-{counter}");
                    counter += 1;
                }
            }
        }

        tracing::debug!(id, new_id = %candidate, nd, "Identifier collision");
        self.claimed.insert(candidate.clone(), nd.to_string());
        self.collisions += 1;
        Claim::Renamed(candidate)
    }

    /// Give back an id whose document was never stored.
    pub fn release(&mut self, id: &str, claim: &Claim) {
        if self.claimed.remove(id).is_some() && matches!(claim, Claim::Renamed(_)) {
            self.collisions = self.collisions.saturating_sub(1);
        }
    }

    /// Number of renamed documents.
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

fn nd_suffix(nd: &str) -> &str {
    let start = nd
        .char_indices()
        .rev()
        .nth(COLLISION_SUFFIX_CHARS - 1)
        .map_or(0, |(idx, _)| idx);
    &nd[start..]
}

/// Aggregate counts.
///
/// Serialized flat: `total`, then `type_*`, `status_*` and `class_*` keys
/// in sorted order, then `id_collisions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensusStats {
    pub total: usize,
    #[serde(flatten)]
    pub counts: BTreeMap<String, usize>,
    pub id_collisions: usize,
}

impl CensusStats {
    /// Count entries by type, status and classification.
    #[must_use]
    pub fn from_entries(entries: &[CensusEntry], id_collisions: usize) -> Self {
        let mut counts = BTreeMap::new();
        for entry in entries {
            for key in [
                format!("type_{}", entry.law_type.as_str()),
                format!("status_{}", entry.status.as_str()),
                format!("class_{}", entry.classification.as_str()),
            ] {
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        Self {
            total: entries.len(),
            counts,
            id_collisions,
        }
    }

    /// Counts under one key prefix ("type_", "status_", "class_"), prefix stripped.
    pub fn group<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, usize)> + 'a {
        self.counts
            .iter()
            .filter_map(move |(key, count)| key.strip_prefix(prefix).map(|name| (name, *count)))
    }

    /// Count for one key, zero when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// Totals of a run that parsed and wrote provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub completed_at: String,
    pub total_laws: usize,
    pub total_provisions: usize,
    /// Written laws as a percentage of census entries, one decimal.
    pub coverage_pct: String,
}

impl IngestionSummary {
    #[must_use]
    pub fn new(total_laws: usize, total_provisions: usize, entries: usize, now: DateTime<Utc>) -> Self {
        Self {
            completed_at: format_timestamp(now),
            total_laws,
            total_provisions,
            coverage_pct: coverage_pct(total_laws, entries),
        }
    }
}

/// The census file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Census {
    pub generated_at: String,
    pub source: String,
    pub description: String,
    pub stats: CensusStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingestion: Option<IngestionSummary>,
    pub laws: Vec<CensusEntry>,
}

impl Census {
    /// Build the census from deduplicated entries.
    #[must_use]
    pub fn new(
        laws: Vec<CensusEntry>,
        id_collisions: usize,
        ingestion: Option<IngestionSummary>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at: format_timestamp(now),
            source: CENSUS_SOURCE.to_string(),
            description: CENSUS_DESCRIPTION.to_string(),
            stats: CensusStats::from_entries(&laws, id_collisions),
            ingestion,
            laws,
        }
    }

    /// Write as pretty JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, self)?;
        tracing::info!(path = %path.display(), entries = self.laws.len(), "Wrote census");
        Ok(())
    }
}

/// UTC timestamp with second precision ("2024-05-01T12:00:00Z").
#[must_use]
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Percentage with one decimal; an empty denominator counts as one.
///
/// # Examples
/// ```
/// use ruslaw_harvester::census::coverage_pct;
///
/// assert_eq!(coverage_pct(1, 3), "33.3");
/// assert_eq!(coverage_pct(0, 0), "0.0");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn coverage_pct(part: usize, whole: usize) -> String {
    let pct = part as f64 / whole.max(1) as f64 * 100.0;
    format!("{pct:.1}")
}
