//! TF-IDF variant
//!
//! Frequency baseline. Each sentence of the document is treated as a
//! separate document of a small corpus:
//! - terms are word n-grams (1..=`max_ngram`) within a sentence
//! - idf is smoothed: `ln((1 + n) / (1 + df)) + 1`
//! - every sentence row is l2-normalized
//! - a term's score is the sum of its weights over all sentences

use crate::errors::Result;
use crate::types::{Document, PosTag, TfIdfConfig};
use rustc_hash::FxHashMap;

/// TF-IDF implementation
#[derive(Debug, Clone, Default)]
pub struct TfIdf {
    config: TfIdfConfig,
}

impl TfIdf {
    /// Create a new TF-IDF extractor with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: TfIdfConfig) -> Self {
        Self { config }
    }

    /// Extract keyphrases
    pub fn extract(&self, document: &Document) -> Result<Vec<String>> {
        Ok(self
            .extract_scored(document)?
            .into_iter()
            .map(|(term, _)| term)
            .collect())
    }

    /// Extract keyphrases with their scores, best first
    ///
    /// Equal scores are ordered by term.
    pub fn extract_scored(&self, document: &Document) -> Result<Vec<(String, f64)>> {
        self.config.validate()?;

        let rows: Vec<FxHashMap<String, f64>> = sentences(document)
            .iter()
            .map(|words| self.count_ngrams(words))
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let n = rows.len();
        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        for row in &rows {
            for term in row.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let max_df = self.config.max_df * n as f64;
        let idf: FxHashMap<&str, f64> = df
            .into_iter()
            .filter(|&(_, count)| count >= self.config.min_df && count as f64 <= max_df)
            .map(|(term, count)| (term, ((1.0 + n as f64) / (1.0 + count as f64)).ln() + 1.0))
            .collect();

        let mut scores: FxHashMap<&str, f64> = FxHashMap::default();
        for row in &rows {
            let mut weighted: Vec<(&str, f64)> = row
                .iter()
                .filter_map(|(term, &tf)| idf.get(term.as_str()).map(|&w| (term.as_str(), tf * w)))
                .collect();
            // Fixed order keeps the norm and sums reproducible
            weighted.sort_by(|a, b| a.0.cmp(b.0));

            let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm == 0.0 {
                continue;
            }
            for (term, weight) in weighted {
                *scores.entry(term).or_insert(0.0) += weight / norm;
            }
        }

        let mut ranked: Vec<(String, f64)> = scores
            .into_iter()
            .map(|(term, score)| (term.to_string(), score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.config.n_keywords);

        tracing::debug!(sentences = n, terms = idf.len(), "tf-idf finished");
        Ok(ranked)
    }

    fn count_ngrams(&self, words: &[String]) -> FxHashMap<String, f64> {
        let mut counts = FxHashMap::default();
        for size in 1..=self.config.max_ngram.min(words.len()) {
            for window in words.windows(size) {
                *counts.entry(window.join(" ")).or_insert(0.0) += 1.0;
            }
        }
        counts
    }
}

/// Lowercased words per sentence; punctuation and one-character tokens are skipped
fn sentences(document: &Document) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = Vec::new();
    let mut current = None;
    for token in document.tokens() {
        if current != Some(token.sentence_idx) {
            out.push(Vec::new());
            current = Some(token.sentence_idx);
        }
        if matches!(token.pos, PosTag::Punctuation | PosTag::Symbol) || token.text.chars().count() < 2 {
            continue;
        }
        if let Some(sentence) = out.last_mut() {
            sentence.push(token.text.to_lowercase());
        }
    }
    out
}

/// Convenience function
pub fn extract_keyphrases_tfidf(document: &Document, config: &TfIdfConfig) -> Result<Vec<String>> {
    TfIdf::with_config(config.clone()).extract(document)
}
