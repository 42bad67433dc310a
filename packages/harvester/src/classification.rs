//! Law type, lifecycle status and effective date of a document.
//!
//! All functions are pure: identical metadata always yields identical
//! results, and missing fields fall through to the default branches.

use crate::types::{ClassificationInput, DocType, LawStatus, LawType};

/// Heading phrase identifying the Constitution (lowercase).
pub const CONSTITUTION_PHRASE: &str = "конституция российской федерации";

/// Issuing-authority prefixes of federal laws (lowercase).
const FEDERAL_ISSUER_PREFIXES: [&str; 2] =
    ["федеральный закон", "федеральный конституционный закон"];

/// Derived classification of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub law_type: LawType,
    pub status: LawStatus,
    pub effective_date: Option<String>,
}

/// Classify a document from its metadata.
#[must_use]
pub fn classify(input: &ClassificationInput<'_>) -> Classification {
    Classification {
        law_type: classify_law_type(input),
        status: classify_status(input.status_text),
        effective_date: parse_effective_date(input.date_text),
    }
}

/// Check whether a heading names the Constitution.
#[must_use]
pub fn is_constitution_heading(heading: &str) -> bool {
    heading.to_lowercase().contains(CONSTITUTION_PHRASE)
}

fn number_has_marker(doc_number: &str, marker: &str) -> bool {
    doc_number.to_uppercase().contains(marker)
}

/// Determine the law type.
///
/// Precedence: constitution heading, code, federal constitutional law,
/// constitutional amendment, federal law. Anything else is a federal law.
///
/// # Examples
/// ```
/// use ruslaw_harvester::classification::classify_law_type;
/// use ruslaw_harvester::types::{ClassificationInput, LawType};
///
/// let input = ClassificationInput {
///     doc_number: "2-ФКЗ",
///     ..Default::default()
/// };
/// assert_eq!(classify_law_type(&input), LawType::FederalConstitutionalLaw);
/// ```
#[must_use]
pub fn classify_law_type(input: &ClassificationInput<'_>) -> LawType {
    let doc_type = DocType::from_ips(input.doc_type);
    let doc_number = input.doc_number.trim();

    if is_constitution_heading(input.heading) {
        return LawType::Constitution;
    }

    match doc_type {
        Some(DocType::Code) => LawType::Code,
        _ if number_has_marker(doc_number, "ФКЗ") => LawType::FederalConstitutionalLaw,
        Some(DocType::FederalConstitutionalLaw) => LawType::FederalConstitutionalLaw,
        Some(DocType::ConstitutionalAmendment) => LawType::ConstitutionalAmendment,
        _ => LawType::FederalLaw,
    }
}

/// Determine the lifecycle status from the dataset status text.
///
/// # Examples
/// ```
/// use ruslaw_harvester::classification::classify_status;
/// use ruslaw_harvester::types::LawStatus;
///
/// assert_eq!(classify_status("Документ утратил силу с 01.01.2020"), LawStatus::Repealed);
/// assert_eq!(classify_status(""), LawStatus::InForce);
/// ```
#[must_use]
pub fn classify_status(status_text: &str) -> LawStatus {
    let status = status_text.trim().to_lowercase();
    if status.is_empty() {
        return LawStatus::InForce;
    }

    if status.contains("утратил силу") {
        LawStatus::Repealed
    } else if status.contains("с изменениями") || status.contains("c изменениями") {
        // The second variant spells "с" with a Latin letter
        LawStatus::Amended
    } else {
        LawStatus::InForce
    }
}

/// Parse a day.month.year date into ISO year-month-day.
///
/// Day and month are zero-padded. Returns `None` unless the text splits into
/// exactly three dot-separated numeric parts.
///
/// # Examples
/// ```
/// use ruslaw_harvester::classification::parse_effective_date;
///
/// assert_eq!(parse_effective_date("1.7.2002"), Some("2002-07-01".to_string()));
/// assert_eq!(parse_effective_date("2002-07-01"), None);
/// ```
#[must_use]
pub fn parse_effective_date(date_text: &str) -> Option<String> {
    let parts: Vec<&str> = date_text.trim().split('.').collect();
    let &[day, month, year] = parts.as_slice() else {
        return None;
    };

    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(numeric(day) && numeric(month) && numeric(year)) {
        return None;
    }

    Some(format!("{year}-{month:0>2}-{day:0>2}"))
}

/// Check whether a row belongs to federal legislation.
///
/// A row is federal when its type is one of the federal act types, its
/// number carries a ФЗ/ФКЗ marker, its issuing authority starts with a
/// federal-law prefix, or its heading names the Constitution.
#[must_use]
pub fn is_federal_legislation(input: &ClassificationInput<'_>) -> bool {
    DocType::from_ips(input.doc_type).is_some()
        || has_federal_number(input.doc_number)
        || has_federal_issuer(input.issued_by)
        || is_constitution_heading(input.heading)
}

/// Check whether a row can be classified at all.
///
/// Rows without a recognizable type, without a ФЗ/ФКЗ number and without a
/// federal issuing authority are excluded before classification.
#[must_use]
pub fn is_classifiable(input: &ClassificationInput<'_>) -> bool {
    DocType::from_ips(input.doc_type).is_some()
        || has_federal_number(input.doc_number)
        || has_federal_issuer(input.issued_by)
}

fn has_federal_number(doc_number: &str) -> bool {
    number_has_marker(doc_number, "ФЗ") || number_has_marker(doc_number, "ФКЗ")
}

fn has_federal_issuer(issued_by: &str) -> bool {
    let issued_by = issued_by.trim_start().to_lowercase();
    FEDERAL_ISSUER_PREFIXES
        .iter()
        .any(|prefix| issued_by.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input<'a>(doc_type: &'a str, doc_number: &'a str, heading: &'a str) -> ClassificationInput<'a> {
        ClassificationInput {
            doc_type,
            doc_number,
            heading,
            ..Default::default()
        }
    }

    #[test]
    fn test_law_type_constitution() {
        let i = input("Конституция", "", "Конституция Российской Федерации");
        assert_eq!(classify_law_type(&i), LawType::Constitution);
    }

    #[test]
    fn test_law_type_constitution_beats_code() {
        let i = input("Кодекс", "", "О поправке к Конституции Российской Федерации");
        assert_eq!(classify_law_type(&i), LawType::Code);

        let i = input("Кодекс", "", "Кодекс и Конституция Российской Федерации");
        assert_eq!(classify_law_type(&i), LawType::Constitution);
    }

    #[test]
    fn test_law_type_code() {
        let i = input("Кодекс", "146-ФЗ", "Налоговый кодекс Российской Федерации (часть первая)");
        assert_eq!(classify_law_type(&i), LawType::Code);
    }

    #[test]
    fn test_law_type_federal_constitutional_law() {
        assert_eq!(
            classify_law_type(&input("", "1-ФКЗ", "О судебной системе")),
            LawType::FederalConstitutionalLaw
        );
        assert_eq!(
            classify_law_type(&input("Федеральный конституционный закон", "", "О судах")),
            LawType::FederalConstitutionalLaw
        );
    }

    #[test]
    fn test_law_type_constitutional_amendment() {
        let i = input(
            "Закон Российской Федерации о поправке к Конституции Российской Федерации",
            "",
            "О поправке к Конституции",
        );
        assert_eq!(classify_law_type(&i), LawType::ConstitutionalAmendment);
    }

    #[test]
    fn test_law_type_federal_law_and_default() {
        assert_eq!(
            classify_law_type(&input("Федеральный закон", "", "")),
            LawType::FederalLaw
        );
        assert_eq!(classify_law_type(&input("", "44-ФЗ", "")), LawType::FederalLaw);
        assert_eq!(classify_law_type(&input("", "", "")), LawType::FederalLaw);
    }

    #[test]
    fn test_status() {
        assert_eq!(classify_status(""), LawStatus::InForce);
        assert_eq!(classify_status("   "), LawStatus::InForce);
        assert_eq!(
            classify_status("Документ утратил силу с 01.01.2020"),
            LawStatus::Repealed
        );
        assert_eq!(classify_status("Действует с изменениями"), LawStatus::Amended);
        assert_eq!(classify_status("Действует c изменениями"), LawStatus::Amended);
        assert_eq!(classify_status("Действует без изменений"), LawStatus::InForce);
        assert_eq!(classify_status("УТРАТИЛ СИЛУ"), LawStatus::Repealed);
    }

    #[test]
    fn test_effective_date() {
        assert_eq!(
            parse_effective_date("15.06.2023"),
            Some("2023-06-15".to_string())
        );
        assert_eq!(parse_effective_date("1.7.2002"), Some("2002-07-01".to_string()));
        assert_eq!(parse_effective_date(""), None);
        assert_eq!(parse_effective_date("15.06"), None);
        assert_eq!(parse_effective_date("15.06.2023.1"), None);
        assert_eq!(parse_effective_date("aa.06.2023"), None);
        assert_eq!(parse_effective_date("15..2023"), None);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let i = ClassificationInput {
            doc_type: "Федеральный закон",
            doc_number: "123-ФЗ",
            issued_by: "Федеральный закон",
            heading: "О чем-то",
            status_text: "Действует с изменениями",
            date_text: "15.06.2023",
        };
        let first = classify(&i);
        for _ in 0..3 {
            assert_eq!(classify(&i), first);
        }
        assert_eq!(first.status, LawStatus::Amended);
        assert_eq!(first.effective_date.as_deref(), Some("2023-06-15"));
    }

    #[test]
    fn test_federal_filter() {
        assert!(is_federal_legislation(&input("Кодекс", "", "")));
        assert!(is_federal_legislation(&input("", "12-ФЗ", "")));
        assert!(is_federal_legislation(&input("", "", "Конституция Российской Федерации")));
        assert!(!is_federal_legislation(&input("Постановление", "123", "О мерах")));

        let by_issuer = ClassificationInput {
            issued_by: "Федеральный закон от 01.01.2000",
            ..Default::default()
        };
        assert!(is_federal_legislation(&by_issuer));
    }

    #[test]
    fn test_classifiable() {
        assert!(is_classifiable(&input("Закон", "", "")));
        assert!(is_classifiable(&input("", "3-ФКЗ", "")));
        assert!(!is_classifiable(&input("", "", "Конституция Российской Федерации")));
        assert!(!is_classifiable(&input("", "123", "О мерах")));
    }
}
