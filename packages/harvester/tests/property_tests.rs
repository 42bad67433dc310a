//! Property tests for the text pipeline.
//!
//! Checks invariants that must hold for any input: normalization is
//! idempotent, and segmented provisions have unique article numbers with
//! dense order indices.

use proptest::prelude::*;

use ruslaw_harvester::splitting::{deduplicate, document_provisions, segment_text};
use ruslaw_harvester::text::normalize_text;
use ruslaw_harvester::Provision;

/// One line of statute-like text: headers, structure, appendix markers,
/// markup and typographic spaces.
fn statute_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "Статья [0-9]{1,2}(\\.[0-9])?\\.? ?[а-я ]{0,12}",
        "(Глава|Раздел) [0-9IVX]{1,3}\\. [а-я ]{0,12}",
        "Приложение( [0-9])?",
        "[0-9]\\. [а-я ]{0,20}",
        "[а-яА-Я ,.\u{00A0}\u{2002}\u{2003}]{0,40}",
        "<ref nd=\"[0-9]{3}\">[а-я ]{0,8}</ref>",
        "<[a-z]{1,3}>[а-я]{0,8}",
        "",
    ]
}

fn statute_text() -> impl Strategy<Value = String> {
    prop::collection::vec(statute_line(), 0..30).prop_map(|lines| lines.join("\n"))
}

fn assert_dense(provisions: &[Provision]) -> Result<(), TestCaseError> {
    let mut articles: Vec<&str> = provisions.iter().map(|p| p.article.as_str()).collect();
    for (idx, provision) in provisions.iter().enumerate() {
        prop_assert_eq!(provision.order_index, idx);
    }
    articles.sort_unstable();
    articles.dedup();
    prop_assert_eq!(articles.len(), provisions.len(), "duplicate article numbers");
    Ok(())
}

/// Property: normalizing twice gives the same text as normalizing once
#[test]
fn proptest_normalize_idempotent() {
    proptest!(|(text in "\\PC{0,200}")| {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once);
    });
}

/// Property: idempotence also holds for markup and whitespace-heavy text
#[test]
fn proptest_normalize_idempotent_statute_text() {
    proptest!(|(text in statute_text())| {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert!(!once.contains("\n\n\n"));
        prop_assert_eq!(once.trim(), once.as_str());
    });
}

/// Property: segmentation never repeats an article and indexes densely
#[test]
fn proptest_segment_articles_unique() {
    proptest!(|(text in statute_text())| {
        let provisions = segment_text(&normalize_text(&text));
        assert_dense(&provisions)?;
    });
}

/// Property: every document yields at least one provision, indexed densely
#[test]
fn proptest_document_provisions_non_empty() {
    proptest!(|(text in statute_text(), heading in "[а-я ]{0,20}")| {
        let provisions = document_provisions(&normalize_text(&text), &heading, "");
        prop_assert!(!provisions.is_empty());
        assert_dense(&provisions)?;
    });
}

/// Property: merging keeps every piece of content and the first-seen order
#[test]
fn proptest_deduplicate_keeps_content() {
    proptest!(|(items in prop::collection::vec(("[1-6]", "[а-я]{1,6}"), 0..20))| {
        let provisions: Vec<Provision> = items
            .iter()
            .enumerate()
            .map(|(idx, (article, content))| Provision::new(article.as_str(), "", content.as_str(), idx))
            .collect();

        let merged = deduplicate(provisions);
        assert_dense(&merged)?;

        let mut first_seen: Vec<&str> = Vec::new();
        for (article, _) in &items {
            if !first_seen.contains(&article.as_str()) {
                first_seen.push(article.as_str());
            }
        }
        let order: Vec<&str> = merged.iter().map(|p| p.article.as_str()).collect();
        prop_assert_eq!(order, first_seen);

        for (article, content) in &items {
            let target = merged.iter().find(|p| &p.article == article);
            prop_assert!(target.is_some_and(|p| p.content.split("\n\n").any(|part| part == content.as_str())));
        }
    });
}
