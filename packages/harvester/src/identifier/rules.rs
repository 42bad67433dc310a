//! Ordered identifier rules.

use regex::Regex;
use std::sync::LazyLock;

use super::codes::code_slug;
use super::digest::{hex_digest, LAW_DIGEST_LEN, SHORT_DIGEST_LEN};
use crate::classification::is_constitution_heading;
use crate::types::{ClassificationInput, DocType};

/// Fixed identifier of the Constitution.
pub const CONSTITUTION_ID: &str = "constitution-rf";

/// Heading characters included in the generic fallback digest.
const FALLBACK_HEADING_CHARS: usize = 50;

/// Federal constitutional law number ("1-ФКЗ", "1ФКЗ").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FKZ_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)-?ФКЗ$").expect("valid regex"));

/// Federal law number ("123-ФЗ", "123ФЗ").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FZ_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)-?ФЗ$").expect("valid regex"));

/// Metadata prepared once for all rules.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    pub doc_type: Option<DocType>,
    pub doc_type_empty: bool,
    pub doc_number: &'a str,
    pub heading: &'a str,
    pub date_text: &'a str,
    pub year: Option<&'a str>,
}

impl<'a> RuleInput<'a> {
    /// Prepare rule input from classification metadata.
    #[must_use]
    pub fn new(input: &ClassificationInput<'a>) -> Self {
        let date_text = input.date_text.trim();
        Self {
            doc_type: DocType::from_ips(input.doc_type),
            doc_type_empty: input.doc_type.trim().is_empty(),
            doc_number: input.doc_number.trim(),
            heading: input.heading,
            date_text,
            year: extract_year(date_text),
        }
    }

    /// Append "-<year>" when a year is known.
    fn with_year(&self, base: String) -> String {
        match self.year {
            Some(year) => format!("{base}-{year}"),
            None => base,
        }
    }
}

/// Year component of a day.month.year date, used verbatim.
#[must_use]
pub fn extract_year(date_text: &str) -> Option<&str> {
    let parts: Vec<&str> = date_text.split('.').collect();
    match parts.as_slice() {
        &[_, _, year] if !year.is_empty() => Some(year),
        _ => None,
    }
}

fn number_digits<'a>(pattern: &Regex, doc_number: &'a str) -> Option<&'a str> {
    pattern
        .captures(doc_number)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One step of the identifier cascade.
///
/// Rules run in [`ID_RULES`] order; the first one that yields an identifier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// Constitution heading with a constitution or empty type.
    Constitution,

    /// "N-ФКЗ" number.
    FederalConstitutionalLaw,

    /// "N-ФЗ" number.
    FederalLaw,

    /// Consolidated code, via the code slug table.
    Code,

    /// Law on an amendment to the Constitution.
    ConstitutionalAmendment,

    /// Digest of number, date and heading. Always applies.
    Fallback,
}

/// The identifier cascade in evaluation order.
pub const ID_RULES: [IdRule; 6] = [
    IdRule::Constitution,
    IdRule::FederalConstitutionalLaw,
    IdRule::FederalLaw,
    IdRule::Code,
    IdRule::ConstitutionalAmendment,
    IdRule::Fallback,
];

impl IdRule {
    /// Try to resolve an identifier. Returns `None` when the rule does not apply.
    #[must_use]
    pub fn resolve(&self, input: &RuleInput<'_>) -> Option<String> {
        match self {
            Self::Constitution => {
                let type_fits =
                    input.doc_type_empty || input.doc_type == Some(DocType::Constitution);
                (type_fits && is_constitution_heading(input.heading))
                    .then(|| CONSTITUTION_ID.to_string())
            }
            Self::FederalConstitutionalLaw => number_digits(&FKZ_NUMBER_PATTERN, input.doc_number)
                .map(|digits| input.with_year(format!("fkz-{digits}"))),
            Self::FederalLaw => number_digits(&FZ_NUMBER_PATTERN, input.doc_number)
                .map(|digits| input.with_year(format!("fz-{digits}"))),
            Self::Code => (input.doc_type == Some(DocType::Code)).then(|| code_slug(input.heading)),
            Self::ConstitutionalAmendment => {
                if input.doc_type != Some(DocType::ConstitutionalAmendment) {
                    return None;
                }
                let id = match (number_digits(&FKZ_NUMBER_PATTERN, input.doc_number), input.year) {
                    (Some(digits), _) => input.with_year(format!("const-amendment-{digits}")),
                    (None, Some(year)) => format!("const-amendment-{year}"),
                    (None, None) => format!(
                        "const-amendment-{}",
                        hex_digest(input.heading, SHORT_DIGEST_LEN)
                    ),
                };
                Some(id)
            }
            Self::Fallback => {
                let heading_prefix: String =
                    input.heading.chars().take(FALLBACK_HEADING_CHARS).collect();
                let raw = format!("{}_{}_{heading_prefix}", input.doc_number, input.date_text);
                Some(format!("law-{}", hex_digest(&raw, LAW_DIGEST_LEN)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule_input<'a>(input: &ClassificationInput<'a>) -> RuleInput<'a> {
        RuleInput::new(input)
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("15.06.2023"), Some("2023"));
        assert_eq!(extract_year("15.06."), None);
        assert_eq!(extract_year("2023"), None);
        assert_eq!(extract_year("1.2.3.4"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn test_constitution_rule_requires_type() {
        let heading = "Конституция Российской Федерации";
        let applies = ClassificationInput {
            heading,
            doc_type: "",
            ..Default::default()
        };
        assert_eq!(
            IdRule::Constitution.resolve(&rule_input(&applies)),
            Some("constitution-rf".to_string())
        );

        let other_type = ClassificationInput {
            heading,
            doc_type: "Федеральный закон",
            ..Default::default()
        };
        assert_eq!(IdRule::Constitution.resolve(&rule_input(&other_type)), None);
    }

    #[test]
    fn test_fz_rule_number_forms() {
        for number in ["123-ФЗ", "123ФЗ", "123-фз"] {
            let input = ClassificationInput {
                doc_number: number,
                ..Default::default()
            };
            assert_eq!(
                IdRule::FederalLaw.resolve(&rule_input(&input)),
                Some("fz-123".to_string()),
                "number {number}"
            );
        }

        let not_a_law_number = ClassificationInput {
            doc_number: "123-ФЗ-1",
            ..Default::default()
        };
        assert_eq!(IdRule::FederalLaw.resolve(&rule_input(&not_a_law_number)), None);
    }

    #[test]
    fn test_fz_rule_does_not_take_fkz_numbers() {
        let input = ClassificationInput {
            doc_number: "1-ФКЗ",
            ..Default::default()
        };
        assert_eq!(IdRule::FederalLaw.resolve(&rule_input(&input)), None);
    }

    #[test]
    fn test_code_rule_only_for_codes() {
        let input = ClassificationInput {
            doc_type: "Федеральный закон",
            heading: "Трудовой кодекс Российской Федерации",
            ..Default::default()
        };
        assert_eq!(IdRule::Code.resolve(&rule_input(&input)), None);
    }

    #[test]
    fn test_amendment_rule_branches() {
        let doc_type = "Закон Российской Федерации о поправке к Конституции Российской Федерации";
        let heading = "О поправке к Конституции Российской Федерации";

        let with_number = ClassificationInput {
            doc_type,
            heading,
            doc_number: "1-ФКЗ",
            date_text: "14.03.2020",
            ..Default::default()
        };
        assert_eq!(
            IdRule::ConstitutionalAmendment.resolve(&rule_input(&with_number)),
            Some("const-amendment-1-2020".to_string())
        );

        let with_year = ClassificationInput {
            doc_type,
            heading,
            date_text: "14.03.2020",
            ..Default::default()
        };
        assert_eq!(
            IdRule::ConstitutionalAmendment.resolve(&rule_input(&with_year)),
            Some("const-amendment-2020".to_string())
        );

        let bare = ClassificationInput {
            doc_type,
            heading,
            ..Default::default()
        };
        assert_eq!(
            IdRule::ConstitutionalAmendment.resolve(&rule_input(&bare)),
            Some("const-amendment-cb93ea".to_string())
        );
    }

    #[test]
    fn test_fallback_rule_digest() {
        let input = ClassificationInput {
            date_text: "01.01.2000",
            heading: "О порядке",
            ..Default::default()
        };
        assert_eq!(
            IdRule::Fallback.resolve(&rule_input(&input)),
            Some("law-aeaadabd".to_string())
        );

        let empty = ClassificationInput::default();
        assert_eq!(
            IdRule::Fallback.resolve(&rule_input(&empty)),
            Some("law-18f05aed".to_string())
        );
    }

    #[test]
    fn test_fallback_rule_uses_heading_prefix() {
        let heading = "Закон о чем-то очень длинном названии которое превышает пятьдесят символов точно";
        let input = ClassificationInput {
            doc_number: "5",
            date_text: "12.03.2001",
            heading,
            ..Default::default()
        };
        assert_eq!(
            IdRule::Fallback.resolve(&rule_input(&input)),
            Some("law-68c2774a".to_string())
        );
    }
}
