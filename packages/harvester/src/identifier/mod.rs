//! Canonical law identifiers.
//!
//! Identifiers are derived from document metadata by an ordered rule
//! cascade (see [`ID_RULES`]). The resolver is a pure function: it never
//! looks at other documents, so collisions between distinct documents are
//! left to the census to disambiguate.

mod codes;
mod digest;
mod rules;

pub use codes::{code_slug, CODE_SLUGS};
pub use digest::{hex_digest, LAW_DIGEST_LEN, SHORT_DIGEST_LEN};
pub use rules::{extract_year, IdRule, RuleInput, CONSTITUTION_ID, ID_RULES};

use crate::types::ClassificationInput;

/// Resolve the canonical identifier of a document.
///
/// # Examples
/// ```
/// use ruslaw_harvester::identifier::resolve_law_id;
/// use ruslaw_harvester::types::ClassificationInput;
///
/// let input = ClassificationInput {
///     doc_number: "123-ФЗ",
///     date_text: "15.06.2023",
///     ..Default::default()
/// };
/// assert_eq!(resolve_law_id(&input), "fz-123-2023");
/// ```
#[must_use]
pub fn resolve_law_id(input: &ClassificationInput<'_>) -> String {
    let rule_input = RuleInput::new(input);
    ID_RULES
        .iter()
        .find_map(|rule| rule.resolve(&rule_input))
        // Fallback always resolves; this only guards against a reordered table
        .unwrap_or_else(|| IdRule::Fallback.resolve(&rule_input).unwrap_or_default())
}
