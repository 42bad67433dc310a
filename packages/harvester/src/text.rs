//! Text normalization for raw statute text.
//!
//! Dataset text carries portal markup (`<ref nd="...">` cross-reference
//! spans and stray tags) and typographic whitespace. The parser works on
//! plain lines, so this is applied before segmentation.

use regex::Regex;
use std::sync::LazyLock;

/// Opening cross-reference tag, including whitespace that follows it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REF_OPEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<ref\s+nd="[^"]*">\s*"#).expect("valid regex"));

/// Closing cross-reference tag, including whitespace that precedes it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static REF_CLOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*</ref>").expect("valid regex"));

/// Any other bracket-delimited markup.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("valid regex"));

/// Three or more consecutive newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Non-breaking space, em space, en space.
const DISTINGUISHED_SPACES: [char; 3] = ['\u{00A0}', '\u{2003}', '\u{2002}'];

/// Remove markup spans, one pass.
fn strip_markup_once(text: &str) -> String {
    let text = REF_OPEN_PATTERN.replace_all(text, "");
    let text = REF_CLOSE_PATTERN.replace_all(&text, "");
    TAG_PATTERN.replace_all(&text, "").into_owned()
}

/// Collapse runs of three or more newlines to a single blank line.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_PATTERN.replace_all(text, "\n\n").into_owned()
}

/// Normalize raw statute text.
///
/// Applied in order:
/// - remove `<ref>` cross-reference tags and any other `<...>` markup
/// - replace non-breaking, em and en spaces with a plain space
/// - collapse runs of spaces to one
/// - collapse three or more newlines to two
/// - trim leading and trailing whitespace
///
/// Idempotent. Empty or whitespace-only input yields an empty string.
///
/// # Examples
/// ```
/// use ruslaw_harvester::text::normalize_text;
///
/// let raw = "Статья 1.\u{00A0}Общие  положения <ref nd=\"102\">ст. 2</ref>";
/// assert_eq!(normalize_text(raw), "Статья 1. Общие положения ст. 2");
/// assert_eq!(normalize_text("  \n\t "), "");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Loop until stable: removing one tag can join the halves of another ("<<b>a>")
    let mut result = text.to_string();
    loop {
        let stripped = strip_markup_once(&result);
        if stripped == result {
            break;
        }
        result = stripped;
    }

    let result = result.replace(&DISTINGUISHED_SPACES[..], " ");
    let result = SPACE_RUN_PATTERN.replace_all(&result, " ");
    let result = collapse_blank_lines(&result);
    result.trim().to_string()
}
