//! Main harvester service that ties all components together.
//!
//! A [`Harvester`] consumes dataset rows batch by batch. For every federal
//! act it resolves an identifier, classifies the document, and (unless
//! running census-only) segments the text and writes a seed record.

use chrono::Utc;

use crate::census::{Census, CensusEntry, Claim, IdRegistry, IngestionSummary};
use crate::classification::{classify, is_classifiable, is_federal_legislation};
use crate::config::{source_url, IngestOptions, MIN_TEXT_LENGTH};
use crate::error::Result;
use crate::identifier::resolve_law_id;
use crate::splitting::document_provisions;
use crate::store::SeedStore;
use crate::text::normalize_text;
use crate::types::{Document, DocumentClass, LawRecord, Provision, SourceRow};

/// Whether a row is federal legislation the engine can classify.
///
/// Every classifiable row is also federal, so the second check is what
/// decides. It drops rows that pass the federal filter only through a
/// constitution heading, with no type, ФЗ/ФКЗ number or federal issuer.
#[must_use]
pub fn is_candidate(row: &SourceRow) -> bool {
    let input = row.classification_input();
    is_federal_legislation(&input) && is_classifiable(&input)
}

/// Census classification of a row, by raw text length.
#[must_use]
pub fn document_class(row: &SourceRow) -> DocumentClass {
    if row.raw_text.chars().count() > MIN_TEXT_LENGTH {
        DocumentClass::Ingestable
    } else {
        DocumentClass::MetadataOnly
    }
}

/// Build the canonical metadata of a row.
#[must_use]
pub fn build_law_record(row: &SourceRow) -> LawRecord {
    let input = row.classification_input();
    let classification = classify(&input);

    LawRecord {
        id: resolve_law_id(&input),
        title: row.heading.clone(),
        identifier: row.doc_number.clone(),
        law_type: classification.law_type,
        status: classification.status,
        effective_date: classification.effective_date,
        source_url: source_url(&row.nd),
    }
}

fn row_provisions(row: &SourceRow, law: &LawRecord) -> Vec<Provision> {
    let cleaned = normalize_text(&row.raw_text);
    document_provisions(&cleaned, &row.heading, &law.source_url)
}

/// Turn one row into a law with its provisions.
///
/// # Examples
/// ```
/// use ruslaw_harvester::harvester::process_row;
/// use ruslaw_harvester::types::SourceRow;
///
/// let row = SourceRow {
///     nd: "102027595".to_string(),
///     doc_type: "Федеральный закон".to_string(),
///     doc_number: "123-ФЗ".to_string(),
///     heading: "О тестировании".to_string(),
///     date_text: "15.06.2023".to_string(),
///     ..Default::default()
/// };
/// let document = process_row(&row);
/// assert_eq!(document.law.id, "fz-123-2023");
/// assert_eq!(document.provisions[0].article, "0");
/// ```
#[must_use]
pub fn process_row(row: &SourceRow) -> Document {
    let law = build_law_record(row);
    let provisions = row_provisions(row, &law);
    Document { law, provisions }
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Not federal legislation, or not classifiable.
    Skipped,

    /// Same document already seen in this run.
    Duplicate,

    /// Added to the census only.
    Catalogued { id: String },

    /// An existing seed record was kept.
    Kept { id: String, provisions: usize },

    /// A seed record was written.
    Written { id: String, provisions: usize },
}

/// Per-batch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Rows read.
    pub rows: usize,

    /// Rows that entered the census.
    pub federal: usize,

    /// Laws with a seed record (written or kept).
    pub laws_written: usize,

    /// Provisions in those records.
    pub provisions: usize,

    pub duplicates: usize,
    pub skipped: usize,
}

impl BatchStats {
    /// Count one row outcome.
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        match outcome {
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Duplicate => self.duplicates += 1,
            RowOutcome::Catalogued { .. } => self.federal += 1,
            RowOutcome::Kept { provisions, .. } | RowOutcome::Written { provisions, .. } => {
                self.federal += 1;
                self.laws_written += 1;
                self.provisions += provisions;
            }
        }
    }
}

/// Ingestion state across all batches of a run.
#[derive(Debug)]
pub struct Harvester {
    options: IngestOptions,
    store: SeedStore,
    registry: IdRegistry,
    entries: Vec<CensusEntry>,
    laws_written: usize,
    total_provisions: usize,
}

impl Harvester {
    #[must_use]
    pub fn new(options: IngestOptions) -> Self {
        let store = SeedStore::new(options.seed_dir.clone());
        Self {
            options,
            store,
            registry: IdRegistry::new(),
            entries: Vec::new(),
            laws_written: 0,
            total_provisions: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    #[must_use]
    pub fn store(&self) -> &SeedStore {
        &self.store
    }

    /// Census entries collected so far.
    #[must_use]
    pub fn entries(&self) -> &[CensusEntry] {
        &self.entries
    }

    #[must_use]
    pub fn laws_written(&self) -> usize {
        self.laws_written
    }

    #[must_use]
    pub fn total_provisions(&self) -> usize {
        self.total_provisions
    }

    /// Ingest one row.
    ///
    /// An id whose seed record belongs to another document counts as taken,
    /// so a later run never takes over an earlier run's record. A record of
    /// the same document that already carries real provisions is kept as
    /// is. A row whose record cannot be written leaves no census entry and
    /// gives its id back.
    pub fn ingest_row(&mut self, row: &SourceRow) -> Result<RowOutcome> {
        if !is_candidate(row) {
            tracing::trace!(nd = %row.nd, doc_type = %row.doc_type, "Skipping row");
            return Ok(RowOutcome::Skipped);
        }

        let mut law = build_law_record(row);
        let store = &self.store;
        let claim = self.registry.claim_with(&law.id, &row.nd, |candidate| {
            store.held_by_other(candidate, &law.source_url)
        });
        match &claim {
            Claim::New => {}
            Claim::Renamed(id) => law.id = id.clone(),
            Claim::Duplicate => {
                tracing::debug!(id = %law.id, nd = %row.nd, "Duplicate document");
                return Ok(RowOutcome::Duplicate);
            }
        }

        let entry = CensusEntry::new(&law, &row.nd, document_class(row));
        if self.options.census_only {
            self.entries.push(entry);
            return Ok(RowOutcome::Catalogued { id: law.id });
        }

        let outcome = match self.seed(row, law) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.registry.release(&entry.id, &claim);
                return Err(e);
            }
        };
        if let RowOutcome::Kept { provisions, .. } | RowOutcome::Written { provisions, .. } =
            &outcome
        {
            self.count_written(*provisions);
        }
        self.entries.push(entry);
        Ok(outcome)
    }

    fn seed(&self, row: &SourceRow, law: LawRecord) -> Result<RowOutcome> {
        if let Some(prior) = self.store.read_prior(&law.id) {
            if prior.is_complete() {
                let provisions = prior.provisions.len();
                tracing::debug!(id = %law.id, provisions, "Keeping existing seed record");
                return Ok(RowOutcome::Kept {
                    id: law.id,
                    provisions,
                });
            }
        }

        let provisions = row_provisions(row, &law);
        let count = provisions.len();
        let id = law.id.clone();
        self.store.write(Document { law, provisions })?;

        Ok(RowOutcome::Written {
            id,
            provisions: count,
        })
    }

    /// Ingest a whole batch.
    ///
    /// Stops at the first failing row. Rows before it stay ingested.
    pub fn ingest_rows(&mut self, rows: &[SourceRow]) -> Result<BatchStats> {
        let mut stats = BatchStats::default();
        for row in rows {
            let outcome = self.ingest_row(row)?;
            stats.record(&outcome);
        }
        Ok(stats)
    }

    fn count_written(&mut self, provisions: usize) {
        self.laws_written += 1;
        self.total_provisions += provisions;
    }

    /// Build the census for everything ingested.
    #[must_use]
    pub fn into_census(self) -> Census {
        let now = Utc::now();
        let ingestion = (!self.options.census_only).then(|| {
            IngestionSummary::new(
                self.laws_written,
                self.total_provisions,
                self.entries.len(),
                now,
            )
        });
        Census::new(self.entries, self.registry.collisions(), ingestion, now)
    }
}
