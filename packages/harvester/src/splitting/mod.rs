//! Article splitting for Russian statute text.
//!
//! Text is split line by line into article-level provisions (keyed by
//! "Статья N"), then provisions sharing an article number are merged.

mod classifier;
mod dedup;
mod engine;
mod fallback;

pub use classifier::{LineClassifier, LineKind, StatuteLineClassifier};
pub use dedup::deduplicate;
pub use engine::SplitEngine;
pub use fallback::{
    document_provisions, placeholder_provision, segment_text, FULL_TEXT_ARTICLE,
    PLACEHOLDER_ARTICLE,
};
