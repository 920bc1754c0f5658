//! Phrase segmentation
//!
//! Splits a tagged token stream into candidate phrases: maximal runs of
//! tokens whose tags are in the content tag set. Each run is normalized into
//! an order-independent phrase key, and the segmenter records where every
//! key occurs (as segment ordinals) along with the surface form of every
//! normalized term, so keyphrases can be rendered in their original wording.

use crate::nlp::normalizer::Normalize;
use crate::nlp::tagger::Tag;
use crate::types::{PosTag, Token};
use rustc_hash::FxHashMap;

/// Build the key for a phrase: terms sorted lexicographically, space-joined
///
/// Repeated terms are kept, so `["data", "data"]` keys as `"data data"`.
pub fn phrase_key<S: AsRef<str>>(terms: &[S]) -> String {
    let mut sorted: Vec<&str> = terms.iter().map(|t| t.as_ref()).collect();
    sorted.sort_unstable();
    sorted.join(" ")
}

// ============================================================================
// Surface map
// ============================================================================

/// Where a normalized term was last seen and how it was written there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceForm {
    /// Token position in the document
    pub position: usize,
    /// Original surface text
    pub text: String,
}

/// Normalized term -> most recent surface form
///
/// Later occurrences overwrite earlier ones, so a recovered keyphrase uses
/// the last spelling seen for each of its terms.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMap {
    forms: FxHashMap<String, SurfaceForm>,
}

impl SurfaceMap {
    /// Record (or overwrite) the surface form of a normalized term
    pub fn record(&mut self, term: impl Into<String>, position: usize, text: impl Into<String>) {
        self.forms.insert(
            term.into(),
            SurfaceForm {
                position,
                text: text.into(),
            },
        );
    }

    /// Look up a normalized term
    pub fn get(&self, term: &str) -> Option<&SurfaceForm> {
        self.forms.get(term)
    }

    /// Render a phrase key in original word order
    ///
    /// Terms are ordered by their recorded position. Terms without a surface
    /// form are skipped; `None` if none of them has one.
    pub fn recover(&self, key: &str) -> Option<String> {
        let mut forms: Vec<&SurfaceForm> = key
            .split_whitespace()
            .filter_map(|term| self.forms.get(term))
            .collect();
        if forms.is_empty() {
            return None;
        }
        forms.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.text.cmp(&b.text)));
        Some(
            forms
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Number of distinct normalized terms
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Check if no term was recorded
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

// ============================================================================
// Phrase index
// ============================================================================

/// One closed phrase segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSegment {
    /// Normalized terms in document order
    pub terms: Vec<String>,
    /// Order-independent key
    pub key: String,
}

/// Segments, per-key occurrence lists and surface forms of one document
#[derive(Debug, Clone, Default)]
pub struct PhraseIndex {
    segments: Vec<PhraseSegment>,
    /// Distinct keys in order of first occurrence
    keys: Vec<String>,
    occurrences: FxHashMap<String, Vec<usize>>,
    surface: SurfaceMap,
}

impl PhraseIndex {
    fn push_segment(&mut self, terms: Vec<String>) {
        let key = phrase_key(&terms);
        let index = self.segments.len();
        match self.occurrences.get_mut(&key) {
            Some(positions) => positions.push(index),
            None => {
                self.keys.push(key.clone());
                self.occurrences.insert(key.clone(), vec![index]);
            }
        }
        self.segments.push(PhraseSegment { terms, key });
    }

    /// Keep only the first `max` distinct keys
    ///
    /// Segments keep their ordinals; dropped keys simply lose their
    /// occurrence lists.
    pub fn retain_first(&mut self, max: usize) {
        if self.keys.len() <= max {
            return;
        }
        for key in self.keys.drain(max..) {
            self.occurrences.remove(&key);
        }
    }

    /// All segments in document order
    pub fn segments(&self) -> &[PhraseSegment] {
        &self.segments
    }

    /// Distinct phrase keys in order of first occurrence
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Segment ordinals where `key` occurs (empty for unknown keys)
    pub fn occurrences(&self, key: &str) -> &[usize] {
        self.occurrences.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Surface forms of the normalized terms
    pub fn surface(&self) -> &SurfaceMap {
        &self.surface
    }

    /// Number of distinct phrase keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the document produced no phrases
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// ============================================================================
// Segmenter
// ============================================================================

/// Turns tagged tokens into a [`PhraseIndex`]
pub struct PhraseSegmenter<'a> {
    content_tags: &'a [PosTag],
    normalizer: &'a dyn Normalize,
    fallback_tagger: &'a dyn Tag,
}

impl<'a> PhraseSegmenter<'a> {
    /// Create a segmenter
    ///
    /// `fallback_tagger` re-tags tokens that arrive tagged as
    /// [`PosTag::Foreign`].
    pub fn new(
        content_tags: &'a [PosTag],
        normalizer: &'a dyn Normalize,
        fallback_tagger: &'a dyn Tag,
    ) -> Self {
        Self {
            content_tags,
            normalizer,
            fallback_tagger,
        }
    }

    /// Segment a token stream
    pub fn segment(&self, tokens: &[Token]) -> PhraseIndex {
        let mut index = PhraseIndex::default();
        let mut buffer: Vec<String> = Vec::new();

        for token in tokens {
            let pos = match token.pos {
                PosTag::Foreign => self.fallback_tagger.tag(&token.text),
                pos => pos,
            };

            if self.content_tags.contains(&pos) {
                if let Some(term) = self.normalize(&token.text) {
                    index.surface.record(term.clone(), token.token_idx, token.text.clone());
                    buffer.push(term);
                }
            } else if !buffer.is_empty() {
                index.push_segment(std::mem::take(&mut buffer));
            }
        }

        if !buffer.is_empty() {
            index.push_segment(buffer);
        }

        index
    }

    /// Normalized form, or `None` when the token should be dropped
    fn normalize(&self, surface: &str) -> Option<String> {
        let normalized = self.normalizer.normalize(surface)?;
        let term = normalized.trim();
        if term.chars().count() <= 1 || term.chars().any(char::is_whitespace) {
            return None;
        }
        Some(term.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalizer::LowercaseNormalizer;
    use crate::nlp::tagger::SuffixTagger;

    fn tokens(words: &[(&str, PosTag)]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, &(text, pos))| Token::new(text, pos, 0, i))
            .collect()
    }

    fn segment(words: &[(&str, PosTag)]) -> PhraseIndex {
        let tags = PosTag::default_content_tags();
        PhraseSegmenter::new(&tags, &LowercaseNormalizer, &SuffixTagger).segment(&tokens(words))
    }

    #[test]
    fn test_phrase_key_is_order_independent() {
        assert_eq!(phrase_key(&["neural", "network"]), "network neural");
        assert_eq!(phrase_key(&["network", "neural"]), "network neural");
        assert_eq!(phrase_key(&["data", "data"]), "data data");
    }

    #[test]
    fn test_segments_split_on_non_content_tags() {
        let index = segment(&[
            ("The", PosTag::Determiner),
            ("quick", PosTag::Adjective),
            ("brown", PosTag::Adjective),
            ("fox", PosTag::Noun),
            ("jumps", PosTag::Verb),
            ("over", PosTag::Preposition),
            ("the", PosTag::Determiner),
            ("lazy", PosTag::Adjective),
            ("dog", PosTag::Noun),
        ]);

        assert_eq!(index.keys(), &["brown fox quick", "dog lazy"]);
        assert_eq!(index.occurrences("brown fox quick"), &[0]);
        assert_eq!(index.occurrences("dog lazy"), &[1]);
        assert_eq!(index.segments()[0].terms, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn test_trailing_phrase_is_flushed() {
        let index = segment(&[("runs", PosTag::Verb), ("graph", PosTag::Noun)]);
        assert_eq!(index.keys(), &["graph"]);
        assert_eq!(index.occurrences("graph"), &[0]);
    }

    #[test]
    fn test_same_words_in_other_order_share_a_key() {
        let index = segment(&[
            ("network", PosTag::Noun),
            ("neural", PosTag::Adjective),
            ("is", PosTag::Verb),
            ("neural", PosTag::Adjective),
            ("network", PosTag::Noun),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.occurrences("network neural"), &[0, 1]);
    }

    #[test]
    fn test_short_terms_are_dropped_without_closing() {
        let index = segment(&[
            ("vitamin", PosTag::Noun),
            ("C", PosTag::Noun),
            ("intake", PosTag::Noun),
        ]);

        assert_eq!(index.keys(), &["intake vitamin"]);
        assert!(index.surface().get("c").is_none());
    }

    #[test]
    fn test_dropped_normalizations() {
        let tags = PosTag::default_content_tags();
        let normalizer = |token: &str| -> Option<String> {
            match token {
                "gone" => None,
                "blank" => Some(String::new()),
                "spaced" => Some("two words".to_string()),
                other => Some(other.to_string()),
            }
        };
        let index = PhraseSegmenter::new(&tags, &normalizer, &SuffixTagger).segment(&tokens(&[
            ("gone", PosTag::Noun),
            ("blank", PosTag::Noun),
            ("spaced", PosTag::Noun),
            ("kept", PosTag::Noun),
        ]));

        assert_eq!(index.keys(), &["kept"]);
    }

    #[test]
    fn test_segment_ordinals_skip_gaps() {
        let index = segment(&[
            ("graph", PosTag::Noun),
            ("and", PosTag::Conjunction),
            ("or", PosTag::Conjunction),
            ("but", PosTag::Conjunction),
            ("tree", PosTag::Noun),
            ("graph", PosTag::Noun),
        ]);

        // "graph" alone at segment 0, "graph tree" at segment 1
        assert_eq!(index.segments().len(), 2);
        assert_eq!(index.occurrences("graph"), &[0]);
        assert_eq!(index.occurrences("graph tree"), &[1]);
    }

    #[test]
    fn test_foreign_tokens_use_fallback_tagger() {
        let tags = PosTag::default_content_tags();
        let fallback = |token: &str| {
            if token == "fast" {
                PosTag::Adjective
            } else {
                PosTag::Verb
            }
        };
        let index = PhraseSegmenter::new(&tags, &LowercaseNormalizer, &fallback).segment(&tokens(&[
            ("fast", PosTag::Foreign),
            ("сеть", PosTag::Noun),
            ("run", PosTag::Foreign),
            ("граф", PosTag::Noun),
        ]));

        assert_eq!(index.keys(), &["fast сеть", "граф"]);
    }

    #[test]
    fn test_surface_map_last_write_wins() {
        let index = segment(&[
            ("Graph", PosTag::Noun),
            ("is", PosTag::Verb),
            ("GRAPH", PosTag::Noun),
        ]);

        let form = index.surface().get("graph").unwrap();
        assert_eq!(form.position, 2);
        assert_eq!(form.text, "GRAPH");
    }

    #[test]
    fn test_recover_restores_word_order() {
        let index = segment(&[
            ("Lazy", PosTag::Adjective),
            ("Dog", PosTag::Noun),
        ]);

        assert_eq!(index.surface().recover("dog lazy").as_deref(), Some("Lazy Dog"));
        assert_eq!(index.surface().recover("unknown"), None);
    }

    #[test]
    fn test_retain_first() {
        let mut index = segment(&[
            ("alpha", PosTag::Noun),
            ("x", PosTag::Verb),
            ("beta", PosTag::Noun),
            ("x", PosTag::Verb),
            ("gamma", PosTag::Noun),
        ]);

        index.retain_first(2);
        assert_eq!(index.keys(), &["alpha", "beta"]);
        assert!(index.occurrences("gamma").is_empty());
        assert_eq!(index.segments().len(), 3);
    }

    #[test]
    fn test_no_content_tokens() {
        let index = segment(&[("runs", PosTag::Verb), ("quickly", PosTag::Adverb)]);
        assert!(index.is_empty());
        assert!(index.segments().is_empty());
    }
}
