//! Split engine that turns normalized statute text into article provisions.

use super::classifier::{LineClassifier, LineKind, StatuteLineClassifier};
use crate::config::MAX_TITLE_LENGTH;
use crate::text::collapse_blank_lines;
use crate::types::Provision;

/// Mutable state of one segmentation run.
///
/// Content lines borrow from the input text; they are only joined into an
/// owned string when the article is flushed.
#[derive(Debug, Default)]
struct SegmentState<'a> {
    current_article: Option<&'a str>,
    current_title: &'a str,
    current_content: Vec<&'a str>,
    order_index: usize,
    in_appendix: bool,
    provisions: Vec<Provision>,
}

impl<'a> SegmentState<'a> {
    /// Close the open article, emitting a provision when it has content.
    fn flush(&mut self) {
        let title = std::mem::take(&mut self.current_title);
        let content = std::mem::take(&mut self.current_content);

        let Some(article) = self.current_article.take() else {
            return;
        };
        if content.is_empty() {
            return;
        }

        let joined = collapse_blank_lines(&content.join("\n"));
        let body = joined.trim();
        if body.is_empty() {
            return;
        }

        self.provisions
            .push(Provision::new(article, title, body, self.order_index));
        self.order_index += 1;
    }

    fn open(&mut self, number: &'a str) {
        self.flush();
        self.current_article = Some(number);
    }

    fn has_content(&self) -> bool {
        self.current_article.is_some() && !self.current_content.is_empty()
    }
}

/// Engine for splitting statute text into provisions.
///
/// Lines are processed in order by a small state machine: article headers
/// open provisions, appendix markers suspend collection until the next
/// header, structural headings are dropped, and everything else is body
/// text of the open article. Output is pre-deduplication.
pub struct SplitEngine<C: LineClassifier> {
    classifier: C,
}

impl<C: LineClassifier> SplitEngine<C> {
    /// Create a new split engine.
    #[must_use]
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Split normalized text into raw provisions.
    pub fn split(&self, text: &str) -> Vec<Provision> {
        let mut state = SegmentState::default();

        for raw_line in text.split('\n') {
            let line = raw_line.trim();
            let kind = self.classifier.classify(line);

            if state.in_appendix {
                match kind {
                    LineKind::ArticleHeader { .. } => state.in_appendix = false,
                    _ => continue,
                }
            }

            match kind {
                LineKind::Blank => {
                    if state.has_content() {
                        state.current_content.push("");
                    }
                }
                LineKind::Appendix => {
                    tracing::trace!(line, "Entering appendix");
                    state.in_appendix = true;
                    state.flush();
                }
                LineKind::ArticleHeader { number, remainder } => {
                    state.open(number);
                    if !remainder.is_empty() {
                        if self.classifier.is_title(remainder) {
                            state.current_title = remainder;
                        } else {
                            state.current_content.push(remainder);
                        }
                    }
                }
                LineKind::Structural => {}
                LineKind::Text(line) => {
                    if state.current_article.is_some() {
                        state.current_content.push(line);
                    }
                }
            }
        }

        state.flush();
        state.provisions
    }
}

impl Default for SplitEngine<StatuteLineClassifier> {
    fn default() -> Self {
        Self::new(StatuteLineClassifier::new(MAX_TITLE_LENGTH))
    }
}
