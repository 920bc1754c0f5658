//! POS tagging capability
//!
//! Tagging itself is delegated: the extractor only needs something that
//! assigns a [`PosTag`] to a single token. It is used as the fallback for
//! tokens the upstream tagger marked as [`PosTag::Foreign`], and by the
//! [`super::tokenizer::Tokenizer`] when building documents from raw text.

use crate::types::PosTag;
use rustc_hash::FxHashMap;

/// Assigns a part-of-speech tag to a single token
pub trait Tag: Send + Sync {
    /// Tag one token
    fn tag(&self, token: &str) -> PosTag;
}

impl<F> Tag for F
where
    F: Fn(&str) -> PosTag + Send + Sync,
{
    fn tag(&self, token: &str) -> PosTag {
        self(token)
    }
}

/// Suffix heuristics for Latin-script words
///
/// Crude, but enough to separate adjectives, adverbs and verb forms from
/// nouns in most English text. Unrecognized words are tagged as nouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixTagger;

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "able", "ible", "ical", "ful", "ous", "ive", "less", "ish", "ic", "al", "ary",
];
const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise"];

impl Tag for SuffixTagger {
    fn tag(&self, token: &str) -> PosTag {
        let lower = token.to_lowercase();

        if lower.is_empty() {
            return PosTag::Other;
        }
        if lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return PosTag::Numeral;
        }
        if lower.chars().all(|c| !c.is_alphanumeric()) {
            return PosTag::Punctuation;
        }
        // Short words rarely carry a productive suffix
        if lower.chars().count() <= 4 {
            return PosTag::Noun;
        }
        if lower.ends_with("ly") {
            return PosTag::Adverb;
        }
        if VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PosTag::Verb;
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return PosTag::Adjective;
        }
        PosTag::Noun
    }
}

/// Dictionary tagger with a fallback for unknown words
pub struct LexiconTagger {
    entries: FxHashMap<String, PosTag>,
    fallback: Box<dyn Tag>,
}

impl std::fmt::Debug for LexiconTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexiconTagger")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Default for LexiconTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconTagger {
    /// Empty lexicon falling back to [`SuffixTagger`]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            fallback: Box::new(SuffixTagger),
        }
    }

    /// Build from (word, tag) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, PosTag)>,
        S: AsRef<str>,
    {
        let mut tagger = Self::new();
        for (word, tag) in pairs {
            tagger.insert(word.as_ref(), tag);
        }
        tagger
    }

    /// Replace the tagger used for unknown words
    pub fn with_fallback(mut self, fallback: impl Tag + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, word: &str, tag: PosTag) {
        self.entries.insert(word.to_lowercase(), tag);
    }
}

impl Tag for LexiconTagger {
    fn tag(&self, token: &str) -> PosTag {
        match self.entries.get(&token.to_lowercase()) {
            Some(&tag) => tag,
            None => self.fallback.tag(token),
        }
    }
}
