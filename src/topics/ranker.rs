//! Topic ranking
//!
//! Builds an undirected graph with one node per topic cluster, weighting the
//! edge between two clusters by the proximity distance of their members, and
//! ranks the clusters by weighted PageRank.

use super::{Topic, TopicCluster};
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::proximity::ProximityModel;
use crate::types::ExtractionWarning;

/// Ranked topics plus ranking diagnostics
#[derive(Debug, Clone, Default)]
pub struct RankingOutcome {
    /// Topics in ranking order
    pub topics: Vec<Topic>,
    /// PageRank iterations performed
    pub iterations: usize,
    pub warnings: Vec<ExtractionWarning>,
}

/// Ranks topic clusters by centrality
#[derive(Debug, Clone, Default)]
pub struct TopicRanker {
    pagerank: StandardPageRank,
}

impl TopicRanker {
    /// Ranker with default PageRank settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given PageRank settings
    pub fn with_pagerank(mut self, pagerank: StandardPageRank) -> Self {
        self.pagerank = pagerank;
        self
    }

    /// Rank clusters
    ///
    /// Zero-distance pairs get no edge.
    pub fn rank(&self, clusters: Vec<TopicCluster>, proximity: &ProximityModel<'_>) -> RankingOutcome {
        if clusters.is_empty() {
            return RankingOutcome::default();
        }

        let mut builder = GraphBuilder::with_capacity(clusters.len());
        let ids: Vec<u32> = (0..clusters.len())
            .map(|i| builder.get_or_create_node(&format!("topic_{}", i)))
            .collect();

        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let weight = proximity.distance(&clusters[i].members, &clusters[j].members);
                if weight > 0.0 {
                    builder.increment_edge(ids[i], ids[j], weight);
                }
            }
        }

        let graph = CsrGraph::from_builder(&builder);
        let result = self.pagerank.run(&graph);

        let mut warnings = Vec::new();
        if !result.converged {
            tracing::warn!(
                iterations = result.iterations,
                delta = result.delta,
                "topic pagerank did not converge"
            );
            warnings.push(ExtractionWarning::PageRankNotConverged {
                iterations: result.iterations,
                delta: result.delta,
            });
        }

        let mut topics: Vec<Topic> = clusters
            .into_iter()
            .zip(ids)
            .map(|(cluster, id)| Topic::new(result.score(id), cluster))
            .collect();
        topics.sort_by(Topic::rank_cmp);

        tracing::debug!(
            topics = topics.len(),
            edges = builder.edge_count(),
            iterations = result.iterations,
            "ranked topics"
        );

        RankingOutcome {
            topics,
            iterations: result.iterations,
            warnings,
        }
    }
}
