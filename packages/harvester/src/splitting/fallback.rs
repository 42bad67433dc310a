//! Provision list for a whole document, including the no-article fallbacks.

use super::dedup::deduplicate;
use super::engine::SplitEngine;
use crate::config::MIN_TEXT_LENGTH;
use crate::types::Provision;

/// Article number of the single provision built from header-less text.
pub const FULL_TEXT_ARTICLE: &str = "1";

/// Article number of the metadata-only placeholder provision.
pub const PLACEHOLDER_ARTICLE: &str = "0";

/// Split normalized text and merge repeated articles.
#[must_use]
pub fn segment_text(text: &str) -> Vec<Provision> {
    deduplicate(SplitEngine::default().split(text))
}

/// Build the provision list for a document.
///
/// - Text longer than [`MIN_TEXT_LENGTH`] characters is segmented; when no
///   article header is found, the whole text becomes article "1".
/// - Shorter text yields a placeholder article "0" with the heading and a
///   source attribution, marking the document as metadata-only.
///
/// `cleaned` must already be normalized.
#[must_use]
pub fn document_provisions(cleaned: &str, heading: &str, source_url: &str) -> Vec<Provision> {
    if cleaned.chars().count() <= MIN_TEXT_LENGTH {
        return vec![placeholder_provision(heading, source_url)];
    }

    let provisions = segment_text(cleaned);
    if provisions.is_empty() {
        tracing::debug!(heading, "No article headers found, keeping full text");
        return vec![Provision::new(FULL_TEXT_ARTICLE, heading, cleaned, 0)];
    }

    provisions
}

/// Placeholder provision for documents without usable text.
#[must_use]
pub fn placeholder_provision(heading: &str, source_url: &str) -> Provision {
    let content = format!(
        "{heading}\n\nФедеральное законодательство Российской Федерации.\nИсточник: {source_url}"
    );
    Provision::new(PLACEHOLDER_ARTICLE, heading, content, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "http://pravo.gov.ru/proxy/ips/?docbody=&nd=1";

    #[test]
    fn test_document_provisions_with_articles() {
        let text = "Статья 1. Предмет регулирования\nНастоящий Федеральный закон регулирует отношения.\nСтатья 2\nТекст.\nСтатья 1\nПродолжение.";
        let provisions = document_provisions(text, "О законе", URL);

        assert_eq!(provisions.len(), 2);
        assert_eq!(provisions[0].article, "1");
        assert_eq!(
            provisions[0].content,
            "Настоящий Федеральный закон регулирует отношения.\n\nПродолжение."
        );
        assert_eq!(provisions[1].article, "2");
        assert_eq!(provisions[1].order_index, 1);
    }

    #[test]
    fn test_document_provisions_full_text_fallback() {
        let text = "Утвердить прилагаемое положение о порядке ведения реестра федеральных законов.";
        let provisions = document_provisions(text, "Об утверждении", URL);

        assert_eq!(
            provisions,
            vec![Provision::new("1", "Об утверждении", text, 0)]
        );
    }

    #[test]
    fn test_document_provisions_placeholder_for_short_text() {
        let provisions = document_provisions("Короткий текст", "О законе", URL);

        assert_eq!(provisions.len(), 1);
        assert_eq!(provisions[0].article, "0");
        assert_eq!(provisions[0].title, "О законе");
        assert_eq!(
            provisions[0].content,
            format!("О законе\n\nФедеральное законодательство Российской Федерации.\nИсточник: {URL}")
        );
    }

    #[test]
    fn test_document_provisions_threshold_counts_characters() {
        // 50 Cyrillic characters is 100 bytes but still not above the threshold
        let text = "ж".repeat(50);
        assert_eq!(document_provisions(&text, "", "")[0].article, "0");

        let text = "ж".repeat(51);
        assert_eq!(document_provisions(&text, "", "")[0].article, "1");
    }
}
