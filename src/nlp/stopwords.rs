//! Stopword filtering
//!
//! Backed by the `stop-words` crate. Used by the [`super::tokenizer::Tokenizer`]
//! to drop function words before tagging, and by the frequency and
//! co-occurrence extractors to skip them as candidates.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A case-insensitive stopword set
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    /// Lowercased stopwords
    stopwords: FxHashSet<String>,
}

impl StopwordFilter {
    /// Load the stopword list for a language code or name
    ///
    /// Unknown languages fall back to English.
    pub fn new(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "ru" | "russian" => LANGUAGE::Russian,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "pl" | "polish" => LANGUAGE::Polish,
            other => {
                tracing::debug!(language = other, "no stopword list, using english");
                LANGUAGE::English
            }
        };

        Self {
            stopwords: get(lang).iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// A filter that keeps every word
    pub fn empty() -> Self {
        Self::default()
    }

    /// A filter from a custom word list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add words to the list
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Number of stopwords
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list() {
        let filter = StopwordFilter::new("en");
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("Over"));
        assert!(!filter.is_stopword("keyphrase"));
        assert!(!filter.is_stopword("topic"));
    }

    #[test]
    fn test_russian_list() {
        let filter = StopwordFilter::new("russian");
        assert!(filter.is_stopword("и"));
        assert!(!filter.is_stopword("граф"));
    }

    #[test]
    fn test_custom_list_and_extend() {
        let mut filter = StopwordFilter::from_list(&["Lorem"]);
        assert!(filter.is_stopword("lorem"));
        assert!(!filter.is_stopword("ipsum"));

        filter.extend(["ipsum"]);
        assert!(filter.is_stopword("IPSUM"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = StopwordFilter::empty();
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }
}
