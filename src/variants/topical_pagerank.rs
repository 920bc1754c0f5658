//! Topical PageRank variant
//!
//! Groups candidate phrases into topics before ranking, so each topic
//! contributes at most one keyphrase.
//!
//! Process:
//! 1. Segment the tagged tokens into candidate phrases
//! 2. Cluster phrases on their term vectors (hierarchical, cut by distance)
//! 3. Build a graph over clusters weighted by positional proximity
//! 4. Run PageRank on the cluster graph
//! 5. Render the first phrase of each top cluster in its surface wording

use crate::errors::Result;
use crate::nlp::normalizer::{LowercaseNormalizer, Normalize};
use crate::nlp::tagger::{SuffixTagger, Tag};
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::proximity::ProximityModel;
use crate::phrase::segmenter::{PhraseIndex, PhraseSegmenter};
use crate::topics::clusterer::TopicClusterer;
use crate::topics::ranker::TopicRanker;
use crate::topics::selector::KeyphraseSelector;
use crate::topics::Topic;
use crate::types::{Document, ExtractionWarning, TopicalPageRankConfig};
use std::sync::Arc;

/// Everything one extraction produced
#[derive(Debug, Clone, Default)]
pub struct TopicalExtraction {
    /// Segments, occurrences and surface forms of the document
    pub phrases: PhraseIndex,
    /// Cophenetic correlation of the phrase dendrogram, when defined
    pub cophenetic_correlation: Option<f64>,
    /// Topics in ranking order
    pub topics: Vec<Topic>,
    /// The extracted keyphrases
    pub keyphrases: Vec<String>,
    /// Non-fatal diagnostics, in the order they were raised
    pub warnings: Vec<ExtractionWarning>,
}

/// Topical PageRank implementation
#[derive(Clone)]
pub struct TopicalPageRank {
    config: TopicalPageRankConfig,
    normalizer: Arc<dyn Normalize>,
    fallback_tagger: Arc<dyn Tag>,
}

impl std::fmt::Debug for TopicalPageRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicalPageRank")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TopicalPageRank {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicalPageRank {
    /// Create an extractor with default config, lowercasing and suffix tagging
    pub fn new() -> Self {
        Self::with_config(TopicalPageRankConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: TopicalPageRankConfig) -> Self {
        Self {
            config,
            normalizer: Arc::new(LowercaseNormalizer),
            fallback_tagger: Arc::new(SuffixTagger),
        }
    }

    /// Use a different normalizer
    pub fn with_normalizer(mut self, normalizer: impl Normalize + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Use a different tagger for tokens tagged [`crate::types::PosTag::Foreign`]
    pub fn with_fallback_tagger(mut self, tagger: impl Tag + 'static) -> Self {
        self.fallback_tagger = Arc::new(tagger);
        self
    }

    /// The active configuration
    pub fn config(&self) -> &TopicalPageRankConfig {
        &self.config
    }

    /// Extract keyphrases
    pub fn extract(&self, document: &Document) -> Result<Vec<String>> {
        Ok(self.extract_with_info(document)?.keyphrases)
    }

    /// Extract keyphrases and keep the intermediate results
    pub fn extract_with_info(&self, document: &Document) -> Result<TopicalExtraction> {
        self.config.validate()?;

        let span = tracing::debug_span!("topical_pagerank", tokens = document.len());
        let _guard = span.enter();

        let segmenter = PhraseSegmenter::new(
            &self.config.content_tag_set,
            self.normalizer.as_ref(),
            self.fallback_tagger.as_ref(),
        );
        let mut phrases = segmenter.segment(document.tokens());

        if let Some(max) = self.config.max_phrases {
            if phrases.len() > max {
                tracing::debug!(phrases = phrases.len(), max, "capping distinct phrases");
                phrases.retain_first(max);
            }
        }

        tracing::debug!(
            segments = phrases.segments().len(),
            phrases = phrases.len(),
            "segmented document"
        );

        if phrases.is_empty() {
            return Ok(TopicalExtraction {
                phrases,
                ..Default::default()
            });
        }

        let clustering = TopicClusterer::new(
            self.config.clustering_linkage,
            self.config.clustering_cutoff_distance,
        )
        .with_min_cophenetic_correlation(self.config.min_cophenetic_correlation)
        .cluster(phrases.keys());
        let mut warnings = clustering.warnings;

        let pagerank = StandardPageRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_threshold);
        let ranking = TopicRanker::new()
            .with_pagerank(pagerank)
            .rank(clustering.clusters, &ProximityModel::new(&phrases));
        warnings.extend(ranking.warnings);

        let (keyphrases, selection_warnings) =
            KeyphraseSelector::new(self.config.n_keywords, &self.config.extraction_strategy)
                .select(&ranking.topics, phrases.surface());
        warnings.extend(selection_warnings);

        tracing::debug!(
            topics = ranking.topics.len(),
            keyphrases = keyphrases.len(),
            warnings = warnings.len(),
            "extracted keyphrases"
        );

        Ok(TopicalExtraction {
            phrases,
            cophenetic_correlation: clustering.cophenetic_correlation,
            topics: ranking.topics,
            keyphrases,
            warnings,
        })
    }
}

/// Convenience function
pub fn extract_keyphrases_topical(
    document: &Document,
    config: &TopicalPageRankConfig,
) -> Result<Vec<String>> {
    TopicalPageRank::with_config(config.clone()).extract(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KeyphraseError;
    use crate::nlp::tokenizer::Tokenizer;
    use crate::types::{PosTag, SelectionStrategy};

    fn fox() -> Document {
        Document::from_tagged(vec![
            ("The", PosTag::Determiner),
            ("quick", PosTag::Adjective),
            ("brown", PosTag::Adjective),
            ("fox", PosTag::Noun),
            ("jumps", PosTag::Verb),
            ("over", PosTag::Preposition),
            ("the", PosTag::Determiner),
            ("lazy", PosTag::Adjective),
            ("dog", PosTag::Noun),
        ])
        .unwrap()
    }

    /// Phrases "alpha", "alpha beta", "delta gamma"
    fn three_phrases() -> Document {
        Document::from_tagged(vec![
            ("alpha", PosTag::Noun),
            ("is", PosTag::Verb),
            ("alpha", PosTag::Noun),
            ("beta", PosTag::Noun),
            ("is", PosTag::Verb),
            ("delta", PosTag::Noun),
            ("gamma", PosTag::Noun),
        ])
        .unwrap()
    }

    #[test]
    fn test_quick_brown_fox() {
        let result = TopicalPageRank::new().extract_with_info(&fox()).unwrap();

        assert_eq!(result.keyphrases, vec!["quick brown fox", "lazy dog"]);
        assert_eq!(result.topics.len(), 2);
        assert!((result.topics[0].score - 0.5).abs() < 1e-9);
        assert!((result.topics[1].score - 0.5).abs() < 1e-9);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_repeated_bigram_yields_one_phrase() {
        let doc = Document::from_tagged(vec![
            ("neural", PosTag::Adjective),
            ("network", PosTag::Noun),
            ("is", PosTag::Verb),
            ("a", PosTag::Determiner),
            ("neural", PosTag::Adjective),
            ("network", PosTag::Noun),
        ])
        .unwrap();

        let result = TopicalPageRank::new().extract_with_info(&doc).unwrap();

        assert_eq!(result.keyphrases, vec!["neural network"]);
        assert_eq!(result.phrases.occurrences("network neural"), &[0, 1]);
        assert!((result.topics[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new(Vec::new()).unwrap();
        assert!(TopicalPageRank::new().extract(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_no_content_tokens() {
        let doc = Document::from_tagged(vec![("runs", PosTag::Verb), ("fast", PosTag::Adverb)]).unwrap();
        let result = TopicalPageRank::new().extract_with_info(&doc).unwrap();

        assert!(result.keyphrases.is_empty());
        assert!(result.topics.is_empty());
    }

    #[test]
    fn test_surface_forms_last_write_wins() {
        let doc = Document::from_tagged(vec![
            ("Topic", PosTag::Noun),
            ("models", PosTag::Noun),
            ("use", PosTag::Verb),
            ("TOPIC", PosTag::Noun),
        ])
        .unwrap();

        // "topic" was last seen as "TOPIC" at position 3, after "models"
        let keyphrases = TopicalPageRank::new().extract(&doc).unwrap();
        assert_eq!(keyphrases, vec!["models TOPIC"]);
    }

    #[test]
    fn test_result_bounded_by_n_keywords() {
        let config = TopicalPageRankConfig::default()
            .with_n_keywords(1)
            .with_cutoff_distance(0.0);
        let keyphrases = TopicalPageRank::with_config(config).extract(&three_phrases()).unwrap();

        assert_eq!(keyphrases.len(), 1);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let text = "Graph based ranking models extract keyphrases from documents. \
                    Topic clusters group related candidate phrases. \
                    Ranking topic clusters with random walks finds central topics. \
                    Keyphrases summarize documents for indexing and retrieval.";
        let doc = Tokenizer::new("en").tokenize(text).unwrap();
        let extractor = TopicalPageRank::new();

        let first = extractor.extract(&doc).unwrap();
        for _ in 0..5 {
            assert_eq!(extractor.extract(&doc).unwrap(), first);
        }
        assert!(!first.is_empty());
        assert!(first.len() <= extractor.config().n_keywords);
    }

    #[test]
    fn test_low_cophenetic_correlation_is_reported() {
        let config = TopicalPageRankConfig::default().with_min_cophenetic_correlation(0.99);
        let result = TopicalPageRank::with_config(config)
            .extract_with_info(&three_phrases())
            .unwrap();

        assert_eq!(result.topics.len(), 2);
        assert!(result.cophenetic_correlation.unwrap() < 0.99);
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, ExtractionWarning::LowCopheneticCorrelation { .. })));
        assert_eq!(result.keyphrases.len(), 2);
    }

    #[test]
    fn test_unsupported_strategy_falls_back_to_first() {
        let config = TopicalPageRankConfig::default()
            .with_extraction_strategy(SelectionStrategy::Center);
        let result = TopicalPageRank::with_config(config).extract_with_info(&fox()).unwrap();

        assert_eq!(result.keyphrases, vec!["quick brown fox", "lazy dog"]);
        assert_eq!(
            result.warnings,
            vec![ExtractionWarning::UnsupportedStrategy {
                requested: "center".to_string(),
                used: "first".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TopicalPageRankConfig::default().with_damping(-0.1);
        let err = TopicalPageRank::with_config(config).extract(&fox()).unwrap_err();
        assert!(matches!(err, KeyphraseError::InvalidConfig(_)));
    }

    #[test]
    fn test_max_phrases_caps_candidates() {
        let config = TopicalPageRankConfig::default().with_max_phrases(1);
        let result = TopicalPageRank::with_config(config).extract_with_info(&fox()).unwrap();

        assert_eq!(result.phrases.keys(), &["brown fox quick"]);
        assert_eq!(result.keyphrases, vec!["quick brown fox"]);
    }

    #[test]
    fn test_custom_normalizer_merges_variants() {
        let normalizer = |token: &str| -> Option<String> {
            let lower = token.to_lowercase();
            Some(lower.strip_suffix('s').unwrap_or(&lower).to_string())
        };
        let doc = Document::from_tagged(vec![
            ("networks", PosTag::Noun),
            ("are", PosTag::Verb),
            ("network", PosTag::Noun),
        ])
        .unwrap();

        let result = TopicalPageRank::new()
            .with_normalizer(normalizer)
            .extract_with_info(&doc)
            .unwrap();

        assert_eq!(result.phrases.keys(), &["network"]);
        assert_eq!(result.keyphrases, vec!["network"]);
    }

    #[test]
    fn test_foreign_tokens_use_fallback_tagger() {
        let doc = Document::from_tagged(vec![
            ("большая", PosTag::Adjective),
            ("data", PosTag::Foreign),
            ("модель", PosTag::Noun),
        ])
        .unwrap();

        let verbs = TopicalPageRank::new()
            .with_fallback_tagger(|_: &str| PosTag::Verb)
            .extract_with_info(&doc)
            .unwrap();
        assert_eq!(verbs.phrases.keys(), &["большая", "модель"]);

        let nouns = TopicalPageRank::new().extract_with_info(&doc).unwrap();
        assert_eq!(nouns.phrases.keys(), &["data большая модель"]);
        assert_eq!(nouns.keyphrases, vec!["большая data модель"]);
    }

    #[test]
    fn test_convenience_function() {
        let keyphrases =
            extract_keyphrases_topical(&fox(), &TopicalPageRankConfig::default().with_n_keywords(1))
                .unwrap();
        assert_eq!(keyphrases, vec!["quick brown fox"]);
    }
}
