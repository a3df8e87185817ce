//! Model-mention extraction: which AI model/version a short text talks about.
//!
//! Pipeline: compose title and body, split into sentences, detect candidates
//! per sentence, fuse partial mentions across adjacent sentences. Rendering of
//! the best mention lives in [`label`].

pub mod detect;
pub mod fuse;
pub mod label;
pub mod segment;
pub mod types;

pub use label::{FALLBACK_LABEL, best_model_label, render_label};
pub use types::*;

use crate::vocab::{BUILTIN, Vocabulary};

/// Token distance within which family, tier and version tokens pair up.
pub const DEFAULT_WINDOW: usize = 12;

/// Extractor bound to a read-only vocabulary. Holds no mutable state, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct MentionExtractor<'v> {
    vocab: &'v Vocabulary,
    window: usize,
}

impl<'v> MentionExtractor<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self {
            vocab,
            window: DEFAULT_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Extract all mentions from a post. Per-sentence mentions come first in
    /// sentence order, followed by cross-sentence fusions.
    pub fn extract(&self, title: &str, body: &str) -> Vec<Mention> {
        let content = segment::compose(title, body);
        let per_sentence: Vec<Vec<Mention>> = segment::split_sentences(&content)
            .into_iter()
            .map(|s| detect::detect_sentence(self.vocab, self.window, s))
            .collect();
        let mut mentions: Vec<Mention> = per_sentence.iter().flatten().cloned().collect();
        fuse::fuse_adjacent(self.vocab, &per_sentence, &mut mentions);
        mentions
    }
}

impl Default for MentionExtractor<'static> {
    fn default() -> Self {
        Self::new(&BUILTIN)
    }
}

/// Extract mentions with the built-in vocabulary.
pub fn extract_model_mentions(title: &str, body: &str) -> Vec<Mention> {
    MentionExtractor::default().extract(title, body)
}
