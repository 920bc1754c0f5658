//! Raw text to [`Document`]
//!
//! Basic cleanup and tokenization for callers that do not have their own
//! tagging pipeline: markup tags are stripped, text is split into sentences
//! on terminal punctuation and line breaks, lowercased, split into words on
//! non-word characters, stopwords are removed and the remaining words are
//! tagged with a [`Tag`] implementation.

use super::stopwords::StopwordFilter;
use super::tagger::{SuffixTagger, Tag};
use crate::errors::Result;
use crate::types::{Document, Token};

/// Builds tagged documents from raw text
pub struct Tokenizer {
    stopwords: StopwordFilter,
    tagger: Box<dyn Tag>,
}

impl std::fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Tokenizer {
    /// Tokenizer with the stopword list for `language` and suffix tagging
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: StopwordFilter::new(language),
            tagger: Box::new(SuffixTagger),
        }
    }

    /// Replace the stopword filter
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Replace the tagger
    pub fn with_tagger(mut self, tagger: impl Tag + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Tokenize and tag `text`
    pub fn tokenize(&self, text: &str) -> Result<Document> {
        let cleaned = strip_markup(text);
        let mut tokens = Vec::new();
        let mut sentence_idx = 0;

        for sentence in split_sentences(&cleaned) {
            let lowered = sentence.to_lowercase();
            let before = tokens.len();

            for word in split_words(&lowered) {
                if self.stopwords.is_stopword(word) {
                    continue;
                }
                let token_idx = tokens.len();
                tokens.push(Token::new(word, self.tagger.tag(word), sentence_idx, token_idx));
            }

            if tokens.len() > before {
                sentence_idx += 1;
            }
        }

        tracing::debug!(
            tokens = tokens.len(),
            sentences = sentence_idx,
            "tokenized document"
        );
        Document::new(tokens)
    }
}

/// Remove `<...>` markup tags
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn split_words(sentence: &str) -> impl Iterator<Item = &str> {
    sentence
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}
