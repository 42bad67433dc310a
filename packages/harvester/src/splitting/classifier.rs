//! Line classification for statute text.

use regex::Regex;
use std::sync::LazyLock;

/// Article header: "Статья 15.1. Заголовок" or "Статья 2".
///
/// The numeral is greedy, so "Статья 15.1" keeps its decimal part even
/// without a trailing period.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Статья\s+(\d+(?:\.\d+)?)(?:\.\s*|\b[.\s]*)(.*)$").expect("valid regex")
});

/// Chapter, section, part and subsection markers with an Arabic or Roman numeral.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STRUCTURAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:Глава|Раздел|Часть|Подраздел)\s+[\dIVXLCDM]+").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static APPENDIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*Приложение\b").expect("valid regex"));

/// Numbered sub-clause opening ("1. ...").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBCLAUSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("valid regex"));

/// Classification of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line.
    Blank,

    /// Start of an appendix block.
    Appendix,

    /// Article header with its numeral and the (trimmed) text after it.
    ArticleHeader { number: &'a str, remainder: &'a str },

    /// Chapter/section/part heading. Discarded.
    Structural,

    /// Any other line.
    Text(&'a str),
}

/// Trait for line classifiers used by the split engine.
pub trait LineClassifier {
    /// Classify a line. The line is already trimmed.
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a>;

    /// Decide whether an article header remainder is a title.
    ///
    /// Returns `false` when the remainder belongs to the body instead.
    fn is_title(&self, remainder: &str) -> bool;
}

/// Classifier for Russian federal statute text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatuteLineClassifier {
    /// Remainders of this many characters or more are body text.
    pub max_title_length: usize,
}

impl StatuteLineClassifier {
    /// Create a classifier with the given title length limit.
    #[must_use]
    pub fn new(max_title_length: usize) -> Self {
        Self { max_title_length }
    }
}

impl LineClassifier for StatuteLineClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.is_empty() {
            return LineKind::Blank;
        }

        if APPENDIX_PATTERN.is_match(line) {
            return LineKind::Appendix;
        }

        if let Some(caps) = ARTICLE_PATTERN.captures(line) {
            if let Some(number) = caps.get(1) {
                let remainder = caps.get(2).map_or("", |m| m.as_str().trim());
                return LineKind::ArticleHeader {
                    number: number.as_str(),
                    remainder,
                };
            }
        }

        if STRUCTURAL_PATTERN.is_match(line) {
            return LineKind::Structural;
        }

        LineKind::Text(line)
    }

    fn is_title(&self, remainder: &str) -> bool {
        remainder.chars().count() < self.max_title_length && !SUBCLAUSE_PATTERN.is_match(remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> StatuteLineClassifier {
        StatuteLineClassifier::new(200)
    }

    fn header<'a>(number: &'a str, remainder: &'a str) -> LineKind<'a> {
        LineKind::ArticleHeader { number, remainder }
    }

    #[test]
    fn test_classify_article_with_title() {
        assert_eq!(
            classifier().classify("Статья 1. Общие положения"),
            header("1", "Общие положения")
        );
    }

    #[test]
    fn test_classify_article_without_title() {
        assert_eq!(classifier().classify("Статья 2"), header("2", ""));
        assert_eq!(classifier().classify("Статья 3."), header("3", ""));
    }

    #[test]
    fn test_classify_article_decimal_number() {
        assert_eq!(
            classifier().classify("Статья 15.1. Порядок применения"),
            header("15.1", "Порядок применения")
        );
        assert_eq!(classifier().classify("Статья 15.1"), header("15.1", ""));
    }

    #[test]
    fn test_classify_article_word_boundary_remainder() {
        assert_eq!(
            classifier().classify("Статья 7 утратила силу"),
            header("7", "утратила силу")
        );
    }

    #[test]
    fn test_classify_not_an_article() {
        // Number glued to a letter is not a header
        assert_eq!(
            classifier().classify("Статья 12а"),
            LineKind::Text("Статья 12а")
        );
        // Inflected form
        assert_eq!(
            classifier().classify("Статьями 5 и 6 установлено"),
            LineKind::Text("Статьями 5 и 6 установлено")
        );
        // Header token is case-sensitive
        assert_eq!(classifier().classify("статья 5"), LineKind::Text("статья 5"));
    }

    #[test]
    fn test_classify_structural_markers() {
        let c = classifier();
        assert_eq!(c.classify("Глава 1. Общие положения"), LineKind::Structural);
        assert_eq!(c.classify("Раздел II"), LineKind::Structural);
        assert_eq!(c.classify("ЧАСТЬ 3"), LineKind::Structural);
        assert_eq!(c.classify("Подраздел 1"), LineKind::Structural);
        assert_eq!(
            c.classify("Главная цель"),
            LineKind::Text("Главная цель")
        );
    }

    #[test]
    fn test_classify_appendix() {
        let c = classifier();
        assert_eq!(c.classify("Приложение 1"), LineKind::Appendix);
        assert_eq!(c.classify("ПРИЛОЖЕНИЕ"), LineKind::Appendix);
        assert_eq!(
            c.classify("Приложения к закону"),
            LineKind::Text("Приложения к закону")
        );
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(classifier().classify(""), LineKind::Blank);
    }

    #[test]
    fn test_is_title() {
        let c = classifier();
        assert!(c.is_title("Общие положения"));
        assert!(!c.is_title("1. Настоящий Федеральный закон регулирует"));
        assert!(!c.is_title(&"а".repeat(200)));
        assert!(c.is_title(&"а".repeat(199)));
    }
}
