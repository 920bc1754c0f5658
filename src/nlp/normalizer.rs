//! Token normalization capability
//!
//! Phrase keys are built from normalized forms, so whatever maps a surface
//! token to its canonical form (a stemmer, a lemmatizer, a dictionary) plugs
//! in through [`Normalize`]. A normalizer that cannot handle a token returns
//! `None` or an empty string, and the token is dropped from its phrase.

use rustc_hash::FxHashMap;

/// Maps a surface token to a single normalized string
pub trait Normalize: Send + Sync {
    /// Normalize one token; `None` (or an empty string) drops it
    fn normalize(&self, token: &str) -> Option<String>;
}

impl<F> Normalize for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn normalize(&self, token: &str) -> Option<String> {
        self(token)
    }
}

/// Lowercases tokens and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseNormalizer;

impl Normalize for LowercaseNormalizer {
    fn normalize(&self, token: &str) -> Option<String> {
        Some(token.to_lowercase())
    }
}

/// Dictionary lookup on the lowercased token
///
/// Tokens missing from the dictionary are lowercased, unless the normalizer
/// is strict, in which case they are dropped.
#[derive(Debug, Clone, Default)]
pub struct LexiconNormalizer {
    forms: FxHashMap<String, String>,
    strict: bool,
}

impl LexiconNormalizer {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (surface, normalized) pairs
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: Into<String>,
    {
        let forms = pairs
            .into_iter()
            .map(|(surface, normal)| (surface.as_ref().to_lowercase(), normal.into()))
            .collect();
        Self {
            forms,
            strict: false,
        }
    }

    /// Drop tokens that are not in the lexicon
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, surface: &str, normalized: impl Into<String>) {
        self.forms.insert(surface.to_lowercase(), normalized.into());
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Check if the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Normalize for LexiconNormalizer {
    fn normalize(&self, token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        match self.forms.get(&lower) {
            Some(form) => Some(form.clone()),
            None if self.strict => None,
            None => Some(lower),
        }
    }
}
