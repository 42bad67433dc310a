//! Core data types for the harvester.
//!
//! These types represent Russian federal legislation documents as they
//! arrive from the dataset (`SourceRow`) and as they leave the parser
//! (`LawRecord`, `Provision`, `Document`).

use serde::{Deserialize, Deserializer, Serialize};

/// Document type as written in the dataset's `doc_typeIPS` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocType {
    /// "Конституция".
    Constitution,

    /// "Кодекс".
    Code,

    /// "Федеральный конституционный закон".
    FederalConstitutionalLaw,

    /// "Закон Российской Федерации о поправке к Конституции Российской Федерации".
    ConstitutionalAmendment,

    /// "Федеральный закон".
    FederalLaw,

    /// "Закон".
    Law,
}

impl DocType {
    /// Parse from the dataset text. Case-insensitive, surrounding whitespace ignored.
    ///
    /// Returns `None` for empty or unrecognized types.
    #[must_use]
    pub fn from_ips(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "конституция" => Some(Self::Constitution),
            "кодекс" => Some(Self::Code),
            "федеральный конституционный закон" => Some(Self::FederalConstitutionalLaw),
            "закон российской федерации о поправке к конституции российской федерации" => {
                Some(Self::ConstitutionalAmendment)
            }
            "федеральный закон" => Some(Self::FederalLaw),
            "закон" => Some(Self::Law),
            _ => None,
        }
    }
}

/// Category of a federal legal act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawType {
    /// The Constitution of the Russian Federation.
    Constitution,

    /// Consolidated subject-area statute (кодекс).
    Code,

    /// Federal constitutional law (ФКЗ).
    FederalConstitutionalLaw,

    /// Law on an amendment to the Constitution.
    ConstitutionalAmendment,

    /// Federal law (ФЗ).
    FederalLaw,
}

impl LawType {
    /// Get the string value used in records and census keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constitution => "constitution",
            Self::Code => "code",
            Self::FederalConstitutionalLaw => "federal_constitutional_law",
            Self::ConstitutionalAmendment => "constitutional_amendment",
            Self::FederalLaw => "federal_law",
        }
    }
}

/// Lifecycle status of a legal act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawStatus {
    /// In force without recorded amendments.
    InForce,

    /// In force with amendments.
    Amended,

    /// No longer in force.
    Repealed,
}

impl LawStatus {
    /// Get the string value used in records and census keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InForce => "in_force",
            Self::Amended => "amended",
            Self::Repealed => "repealed",
        }
    }
}

/// Whether a row carries enough text to be parsed into provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentClass {
    /// Full text is available.
    Ingestable,

    /// Only metadata is available.
    MetadataOnly,
}

impl DocumentClass {
    /// Get the string value used in records and census keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingestable => "ingestable",
            Self::MetadataOnly => "metadata_only",
        }
    }
}

/// One addressable unit of a law, keyed by article number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provision {
    /// Article number (e.g., "15", "15.1").
    pub article: String,

    /// Short heading text, possibly empty.
    pub title: String,

    /// Body text; never empty for an emitted provision.
    pub content: String,

    /// Zero-based position in first-appearance order.
    pub order_index: usize,
}

impl Provision {
    /// Create a new provision.
    #[must_use]
    pub fn new(
        article: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        order_index: usize,
    ) -> Self {
        Self {
            article: article.into(),
            title: title.into(),
            content: content.into(),
            order_index,
        }
    }
}

/// Canonical metadata of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawRecord {
    /// Derived, stable identifier (e.g., "fz-123-2023").
    pub id: String,

    /// Document heading.
    pub title: String,

    /// Raw document number (e.g., "123-ФЗ").
    pub identifier: String,

    /// Category of the act.
    pub law_type: LawType,

    /// Lifecycle status.
    pub status: LawStatus,

    /// ISO date (YYYY-MM-DD), absent when the source date is unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,

    /// Link to the document on the official portal.
    pub source_url: String,
}

/// One law with its ordered provisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub law: LawRecord,
    pub provisions: Vec<Provision>,
}

/// Metadata consumed by the identifier resolver and the classification engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationInput<'a> {
    pub doc_type: &'a str,
    pub doc_number: &'a str,
    pub issued_by: &'a str,
    pub heading: &'a str,
    pub status_text: &'a str,
    pub date_text: &'a str,
}

/// One dataset row.
///
/// Accepts both snake_case names and the RusLawOD column names. Every field
/// defaults to the empty string; `null`, `"nan"` and `"None"` are read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceRow {
    /// Portal document reference.
    #[serde(default, alias = "pravogovruNd", deserialize_with = "lenient_string")]
    pub nd: String,

    #[serde(default, alias = "doc_typeIPS", deserialize_with = "lenient_string")]
    pub doc_type: String,

    #[serde(default, alias = "docNumberIPS", deserialize_with = "trimmed_string")]
    pub doc_number: String,

    #[serde(default, alias = "headingIPS", deserialize_with = "lenient_string")]
    pub heading: String,

    #[serde(default, alias = "docdateIPS", deserialize_with = "trimmed_string")]
    pub date_text: String,

    #[serde(default, alias = "statusIPS", deserialize_with = "lenient_string")]
    pub status_text: String,

    #[serde(default, alias = "issuedByIPS", deserialize_with = "lenient_string")]
    pub issued_by: String,

    #[serde(default, alias = "textIPS", deserialize_with = "lenient_string")]
    pub raw_text: String,
}

impl SourceRow {
    /// Borrow the metadata fields as a classification input.
    #[must_use]
    pub fn classification_input(&self) -> ClassificationInput<'_> {
        ClassificationInput {
            doc_type: &self.doc_type,
            doc_number: &self.doc_number,
            issued_by: &self.issued_by,
            heading: &self.heading,
            status_text: &self.status_text,
            date_text: &self.date_text,
        }
    }
}

/// Read a scalar JSON value as text, mapping null and missing-value markers to "".
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let text = match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            // Integer references exported through a float column
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    };

    if text == "nan" || text == "None" {
        Ok(String::new())
    } else {
        Ok(text)
    }
}

fn trimmed_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(|s| s.trim().to_string())
}
