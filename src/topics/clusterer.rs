//! Phrase clustering into topics
//!
//! Each distinct phrase key becomes a bag-of-terms count vector. Vectors are
//! clustered agglomeratively on Euclidean distance and the dendrogram is cut
//! at a fixed distance to obtain flat topic clusters.

use super::TopicCluster;
use crate::clustering::hac::{cophenetic_correlation, linkage, CondensedMatrix, Linkage};
use crate::clustering::vectorizer::TermVectorizer;
use crate::types::ExtractionWarning;
use rustc_hash::FxHashSet;

/// Clusters plus the diagnostics gathered while building them
#[derive(Debug, Clone, Default)]
pub struct ClusteringOutcome {
    /// Clusters ordered by the first phrase assigned to them
    pub clusters: Vec<TopicCluster>,
    /// Cophenetic correlation of the dendrogram, when defined
    pub cophenetic_correlation: Option<f64>,
    pub warnings: Vec<ExtractionWarning>,
}

/// Hierarchical clustering of phrase keys
#[derive(Debug, Clone)]
pub struct TopicClusterer {
    linkage: Linkage,
    cutoff_distance: f64,
    min_cophenetic_correlation: f64,
}

impl Default for TopicClusterer {
    fn default() -> Self {
        Self::new(Linkage::Average, 1.25)
    }
}

impl TopicClusterer {
    /// Create a clusterer cutting the dendrogram at `cutoff_distance`
    pub fn new(linkage: Linkage, cutoff_distance: f64) -> Self {
        Self {
            linkage,
            cutoff_distance,
            min_cophenetic_correlation: 0.8,
        }
    }

    /// Set the cophenetic correlation below which a warning is raised
    pub fn with_min_cophenetic_correlation(mut self, threshold: f64) -> Self {
        self.min_cophenetic_correlation = threshold;
        self
    }

    /// Cluster phrase keys
    ///
    /// With fewer than two keys no distances are computed: whatever exists
    /// forms a single cluster.
    pub fn cluster<S: AsRef<str>>(&self, keys: &[S]) -> ClusteringOutcome {
        if keys.is_empty() {
            return ClusteringOutcome::default();
        }
        if keys.len() < 2 {
            return ClusteringOutcome {
                clusters: vec![TopicCluster::new(keys.iter().map(|k| k.as_ref()))],
                ..Default::default()
            };
        }

        let mut warnings = Vec::new();
        let (vectorizer, rows) = TermVectorizer::fit_transform(keys);
        let distances = CondensedMatrix::euclidean(&rows);
        let dendrogram = linkage(&distances, self.linkage);

        let coefficient = cophenetic_correlation(&dendrogram, &distances);
        if let Some(coefficient) = coefficient {
            if coefficient < self.min_cophenetic_correlation {
                tracing::warn!(
                    coefficient,
                    threshold = self.min_cophenetic_correlation,
                    linkage = self.linkage.as_str(),
                    "dendrogram preserves phrase distances poorly"
                );
                warnings.push(ExtractionWarning::LowCopheneticCorrelation {
                    coefficient,
                    threshold: self.min_cophenetic_correlation,
                });
            }
        }

        let labels = dendrogram.cut_at_distance(self.cutoff_distance);
        let num_labels = labels.iter().max().map_or(0, |&max| max + 1);
        let mut grouped: Vec<Vec<String>> = vec![Vec::new(); num_labels];

        for ((key, row), &label) in keys.iter().zip(&rows).zip(&labels) {
            let key = key.as_ref();
            let member = vectorizer.inverse_transform(row).join(" ");
            if member != key {
                tracing::warn!(key, member = member.as_str(), "cluster member rebuilt from term vector");
                warnings.push(ExtractionWarning::ReconstructedMember {
                    key: key.to_string(),
                    member: member.clone(),
                });
            }
            grouped[label].push(member);
        }

        let mut seen = FxHashSet::default();
        let clusters: Vec<TopicCluster> = grouped
            .into_iter()
            .map(TopicCluster::new)
            .filter(|cluster| seen.insert(cluster.clone()))
            .collect();

        tracing::debug!(
            phrases = keys.len(),
            clusters = clusters.len(),
            cophenetic_correlation = ?coefficient,
            "clustered phrases"
        );

        ClusteringOutcome {
            clusters,
            cophenetic_correlation: coefficient,
            warnings,
        }
    }
}
