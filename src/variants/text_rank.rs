//! TextRank variant
//!
//! Classic word-graph TextRank:
//! 1. Candidate words are tokens with a content tag
//! 2. Words co-occurring within a window of the same sentence are linked
//! 3. PageRank scores the words; the top share is kept as keywords
//! 4. Runs of adjacent keywords are merged into keyphrases, scored by their
//!    best word

use crate::errors::Result;
use crate::graph::builder::{build_graph_parallel, WordCandidate};
use crate::graph::csr::CsrGraph;
use crate::nlp::normalizer::{LowercaseNormalizer, Normalize};
use crate::pagerank::standard::StandardPageRank;
use crate::types::{Document, TextRankConfig};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// A scored keyphrase
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPhrase {
    /// Surface text
    pub text: String,
    /// Normalized words joined by spaces
    pub lemma: String,
    pub score: f64,
}

/// TextRank implementation
#[derive(Clone)]
pub struct TextRank {
    config: TextRankConfig,
    normalizer: Arc<dyn Normalize>,
}

impl std::fmt::Debug for TextRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRank")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TextRank {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRank {
    /// Create a new TextRank extractor with default config
    pub fn new() -> Self {
        Self::with_config(TextRankConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: TextRankConfig) -> Self {
        Self {
            config,
            normalizer: Arc::new(LowercaseNormalizer),
        }
    }

    /// Use a different normalizer
    pub fn with_normalizer(mut self, normalizer: impl Normalize + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Extract keyphrases
    pub fn extract(&self, document: &Document) -> Result<Vec<String>> {
        Ok(self
            .extract_scored(document)?
            .into_iter()
            .map(|p| p.text)
            .collect())
    }

    /// Extract keyphrases with their scores, best first
    pub fn extract_scored(&self, document: &Document) -> Result<Vec<RankedPhrase>> {
        self.config.validate()?;

        let candidates = self.candidates(document);
        let builder = build_graph_parallel(&candidates, self.config.window_size);
        if builder.is_empty() {
            return Ok(Vec::new());
        }

        let graph = CsrGraph::from_builder(&builder);
        let pagerank = StandardPageRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_threshold)
            .run(&graph);

        let num_keywords = ((graph.num_nodes as f64 * self.config.keyword_ratio).ceil() as usize).max(1);
        let keywords: FxHashMap<&str, f64> = pagerank
            .top_n(num_keywords)
            .into_iter()
            .map(|(node, score)| (graph.label(node), score))
            .collect();

        let mut phrases = combine_adjacent(document, &candidates, &keywords);
        phrases.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
        phrases.truncate(self.config.top_n);

        tracing::debug!(
            words = graph.num_nodes,
            keywords = keywords.len(),
            phrases = phrases.len(),
            iterations = pagerank.iterations,
            "textrank finished"
        );

        Ok(phrases)
    }

    fn candidates(&self, document: &Document) -> Vec<WordCandidate> {
        document
            .tokens()
            .iter()
            .filter(|t| self.config.content_tag_set.contains(&t.pos))
            .filter_map(|t| {
                let lemma = self.normalizer.normalize(&t.text)?;
                if lemma.chars().count() <= 1 {
                    return None;
                }
                Some(WordCandidate::new(lemma, t.sentence_idx, t.token_idx))
            })
            .collect()
    }
}

/// Merge runs of adjacent keywords into phrases
///
/// Candidates are adjacent when they are consecutive tokens of one sentence.
/// A phrase seen several times keeps its first surface form.
fn combine_adjacent(
    document: &Document,
    candidates: &[WordCandidate],
    keywords: &FxHashMap<&str, f64>,
) -> Vec<RankedPhrase> {
    let tokens = document.tokens();
    let mut phrases = Vec::new();
    let mut seen = FxHashSet::default();
    let mut run: Vec<&WordCandidate> = Vec::new();

    let mut flush = |run: &mut Vec<&WordCandidate>| {
        if run.is_empty() {
            return;
        }
        let lemma = run.iter().map(|c| c.lemma.as_str()).collect::<Vec<_>>().join(" ");
        if seen.insert(lemma.clone()) {
            let text = run
                .iter()
                .map(|c| tokens[c.token_idx].text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let score = run
                .iter()
                .filter_map(|c| keywords.get(c.lemma.as_str()))
                .fold(0.0_f64, |best, &s| best.max(s));
            phrases.push(RankedPhrase { text, lemma, score });
        }
        run.clear();
    };

    for candidate in candidates {
        if !keywords.contains_key(candidate.lemma.as_str()) {
            flush(&mut run);
            continue;
        }
        let breaks = run.last().is_some_and(|last| {
            last.sentence_idx != candidate.sentence_idx || last.token_idx + 1 != candidate.token_idx
        });
        if breaks {
            flush(&mut run);
        }
        run.push(candidate);
    }
    flush(&mut run);

    phrases
}

/// Convenience function
pub fn extract_keyphrases_textrank(document: &Document, config: &TextRankConfig) -> Result<Vec<String>> {
    TextRank::with_config(config.clone()).extract(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    fn document() -> Document {
        Document::from_sentences(vec![
            vec![
                ("Machine", PosTag::Noun),
                ("learning", PosTag::Noun),
                ("improves", PosTag::Verb),
                ("search", PosTag::Noun),
            ],
            vec![
                ("Machine", PosTag::Noun),
                ("learning", PosTag::Noun),
                ("models", PosTag::Noun),
                ("need", PosTag::Verb),
                ("data", PosTag::Noun),
            ],
            vec![
                ("learning", PosTag::Noun),
                ("from", PosTag::Preposition),
                ("data", PosTag::Noun),
            ],
        ])
        .unwrap()
    }

    #[test]
    fn test_top_word_leads() {
        let phrases = TextRank::new().extract_scored(&document()).unwrap();

        assert!(!phrases.is_empty());
        assert!(phrases[0].lemma.split(' ').any(|w| w == "learning"));
        for pair in phrases.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_adjacent_keywords_merge() {
        let config = TextRankConfig::default().with_keyword_ratio(1.0);
        let phrases = TextRank::with_config(config).extract(&document()).unwrap();

        assert!(phrases.contains(&"Machine learning".to_string()));
        assert!(phrases.contains(&"Machine learning models".to_string()));
        // "from" breaks the run
        assert!(!phrases.iter().any(|p| p.contains("learning from")));
    }

    #[test]
    fn test_top_n_limits_output() {
        let config = TextRankConfig::default().with_keyword_ratio(1.0).with_top_n(2);
        let phrases = TextRank::with_config(config).extract(&document()).unwrap();
        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new(Vec::new()).unwrap();
        assert!(TextRank::new().extract(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_window() {
        let config = TextRankConfig::default().with_window_size(1);
        assert!(extract_keyphrases_textrank(&document(), &config).is_err());
    }
}
