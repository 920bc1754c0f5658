//! Keyphrase selection
//!
//! Picks one representative phrase key from each of the top-ranked topics
//! and renders it with the original surface wording.

use super::Topic;
use crate::phrase::segmenter::SurfaceMap;
use crate::types::{ExtractionWarning, SelectionStrategy};

/// Turns ranked topics into keyphrase strings
#[derive(Debug, Clone)]
pub struct KeyphraseSelector<'a> {
    n_keywords: usize,
    strategy: &'a SelectionStrategy,
}

impl<'a> KeyphraseSelector<'a> {
    pub fn new(n_keywords: usize, strategy: &'a SelectionStrategy) -> Self {
        Self {
            n_keywords,
            strategy,
        }
    }

    /// Keyphrases for the first `n_keywords` topics
    ///
    /// Topics must already be in ranking order. Empty clusters and keys
    /// with no recorded surface form are skipped, so fewer than
    /// `n_keywords` phrases may come back.
    pub fn select(&self, topics: &[Topic], surface: &SurfaceMap) -> (Vec<String>, Vec<ExtractionWarning>) {
        let mut warnings = Vec::new();
        if !self.strategy.is_supported() {
            tracing::warn!(
                requested = self.strategy.as_str(),
                used = SelectionStrategy::First.as_str(),
                "unsupported extraction strategy"
            );
            warnings.push(ExtractionWarning::UnsupportedStrategy {
                requested: self.strategy.to_string(),
                used: SelectionStrategy::First.to_string(),
            });
        }

        let keyphrases = topics
            .iter()
            .take(self.n_keywords)
            .filter_map(|topic| topic.cluster.first())
            .filter_map(|key| surface.recover(key))
            .collect();

        (keyphrases, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::TopicCluster;

    fn surface() -> SurfaceMap {
        let mut map = SurfaceMap::default();
        map.record("quick", 1, "quick");
        map.record("brown", 2, "Brown");
        map.record("fox", 3, "fox");
        map.record("lazy", 7, "lazy");
        map.record("dog", 8, "dog");
        map
    }

    fn topics() -> Vec<Topic> {
        vec![
            Topic::new(0.5, TopicCluster::new(["brown fox quick", "fox quick"])),
            Topic::new(0.3, TopicCluster::new(["dog lazy"])),
            Topic::new(0.2, TopicCluster::default()),
        ]
    }

    #[test]
    fn test_first_member_in_surface_order() {
        let strategy = SelectionStrategy::First;
        let (phrases, warnings) = KeyphraseSelector::new(10, &strategy).select(&topics(), &surface());

        assert_eq!(phrases, vec!["quick Brown fox", "lazy dog"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_respects_n_keywords() {
        let strategy = SelectionStrategy::First;
        let (phrases, _) = KeyphraseSelector::new(1, &strategy).select(&topics(), &surface());
        assert_eq!(phrases, vec!["quick Brown fox"]);

        let (phrases, _) = KeyphraseSelector::new(0, &strategy).select(&topics(), &surface());
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_unrecoverable_keys_are_skipped() {
        let strategy = SelectionStrategy::First;
        let topics = vec![
            Topic::new(0.6, TopicCluster::new(["unknown"])),
            Topic::new(0.4, TopicCluster::new(["dog lazy"])),
        ];
        let (phrases, _) = KeyphraseSelector::new(10, &strategy).select(&topics, &surface());
        assert_eq!(phrases, vec!["lazy dog"]);
    }

    #[test]
    fn test_unsupported_strategy_falls_back_once() {
        let strategy: SelectionStrategy = "frequent".parse().unwrap();
        let (phrases, warnings) = KeyphraseSelector::new(10, &strategy).select(&topics(), &surface());

        assert_eq!(phrases, vec!["quick Brown fox", "lazy dog"]);
        assert_eq!(
            warnings,
            vec![ExtractionWarning::UnsupportedStrategy {
                requested: "frequent".to_string(),
                used: "first".to_string(),
            }]
        );
    }
}
