//! Topic clusters and their ranking
//!
//! Candidate phrases are grouped into topics by hierarchical clustering
//! ([`clusterer`]), the topics are ranked by centrality in a proximity
//! weighted graph ([`ranker`]) and one phrase per top topic is rendered as a
//! keyphrase ([`selector`]).

pub mod clusterer;
pub mod ranker;
pub mod selector;

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Scores closer than this are considered equal when ordering topics
pub const SCORE_EPSILON: f64 = 1e-10;

/// A set of phrase keys grouped under one topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TopicCluster {
    /// Phrase keys, kept sorted
    pub members: BTreeSet<String>,
}

impl TopicCluster {
    /// Build a cluster from phrase keys
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Lexicographically first member
    pub fn first(&self) -> Option<&str> {
        self.members.first().map(String::as_str)
    }

    /// Number of member keys
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the cluster has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A topic cluster with its centrality score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub score: f64,
    pub cluster: TopicCluster,
}

impl Topic {
    pub fn new(score: f64, cluster: TopicCluster) -> Self {
        Self { score, cluster }
    }

    /// Ranking order: score descending, then members ascending
    ///
    /// Scores within [`SCORE_EPSILON`] of each other count as tied.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        if (self.score - other.score).abs() > SCORE_EPSILON {
            other.score.total_cmp(&self.score)
        } else {
            self.cluster.members.cmp(&other.cluster.members)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_members_sorted_and_deduplicated() {
        let cluster = TopicCluster::new(["neural network", "deep network", "neural network"]);

        assert_eq!(cluster.len(), 2);
        assert_eq!(cluster.first(), Some("deep network"));
        assert!(TopicCluster::default().first().is_none());
    }

    #[test]
    fn test_rank_by_score_then_members() {
        let mut topics = vec![
            Topic::new(0.2, TopicCluster::new(["zeta"])),
            Topic::new(0.4, TopicCluster::new(["dog lazy"])),
            Topic::new(0.4 + 1e-12, TopicCluster::new(["brown fox quick"])),
            Topic::new(0.1, TopicCluster::new(["alpha"])),
        ];

        topics.sort_by(Topic::rank_cmp);

        let firsts: Vec<_> = topics.iter().map(|t| t.cluster.first().unwrap()).collect();
        assert_eq!(firsts, vec!["brown fox quick", "dog lazy", "zeta", "alpha"]);
    }
}
