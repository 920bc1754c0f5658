//! Graph builder with efficient edge handling
//!
//! A mutable, undirected, weighted graph keyed by node label. Both graphs in
//! the crate go through it: the topic graph (one node per topic cluster,
//! edges weighted by phrase distance) and the word co-occurrence graph used
//! by the TextRank extractor.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The label for this node
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A word that takes part in the co-occurrence graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCandidate {
    /// Normalized word
    pub lemma: String,
    /// Sentence the word belongs to
    pub sentence_idx: usize,
    /// Position in the document
    pub token_idx: usize,
}

impl WordCandidate {
    /// Create a candidate
    pub fn new(lemma: impl Into<String>, sentence_idx: usize, token_idx: usize) -> Self {
        Self {
            lemma: lemma.into(),
            sentence_idx,
            token_idx,
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps label -> node ID
    label_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given label, returning its ID
    ///
    /// IDs are assigned in creation order.
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.label_to_id.insert(label.to_string(), id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Add `weight` to the undirected edge between two nodes
    ///
    /// Missing edges start at 0. Self-loops are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build a co-occurrence graph with a forward sliding window
    ///
    /// Words co-occurring within `window_size` positions of the same
    /// sentence are linked with weight 1 per co-occurrence. Candidates must
    /// be grouped by sentence.
    pub fn from_candidates(candidates: &[WordCandidate], window_size: usize) -> Self {
        let mut builder = Self::with_capacity(candidates.len() / 2);

        let mut i = 0;
        while i < candidates.len() {
            let sent_idx = candidates[i].sentence_idx;

            let sent_start = i;
            while i < candidates.len() && candidates[i].sentence_idx == sent_idx {
                i += 1;
            }
            let sent_end = i;

            for j in sent_start..sent_end {
                let node_j = builder.get_or_create_node(&candidates[j].lemma);

                for k in (j + 1)..std::cmp::min(j + window_size, sent_end) {
                    let node_k = builder.get_or_create_node(&candidates[k].lemma);
                    builder.increment_edge(node_j, node_k, 1.0);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Get the label for a node ID
    pub fn get_label(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.label.as_str())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build a co-occurrence graph in parallel (for large documents)
///
/// Sentences are processed in parallel into partial edge maps which are then
/// merged. Node IDs follow the first appearance of each word in the
/// document, so the result matches [`GraphBuilder::from_candidates`].
pub fn build_graph_parallel(candidates: &[WordCandidate], window_size: usize) -> GraphBuilder {
    // For small documents, sequential is faster
    if candidates.len() < 1000 {
        return GraphBuilder::from_candidates(candidates, window_size);
    }

    let mut sentences: Vec<&[WordCandidate]> = Vec::new();
    let mut start = 0;
    for i in 1..=candidates.len() {
        if i == candidates.len() || candidates[i].sentence_idx != candidates[start].sentence_idx {
            sentences.push(&candidates[start..i]);
            start = i;
        }
    }

    let partial_graphs: Vec<FxHashMap<(&str, &str), f64>> = sentences
        .par_iter()
        .map(|sent| {
            let mut edges = FxHashMap::default();
            for i in 0..sent.len() {
                for j in (i + 1)..std::cmp::min(i + window_size, sent.len()) {
                    let (a, b) = if sent[i].lemma <= sent[j].lemma {
                        (sent[i].lemma.as_str(), sent[j].lemma.as_str())
                    } else {
                        (sent[j].lemma.as_str(), sent[i].lemma.as_str())
                    };
                    if a != b {
                        *edges.entry((a, b)).or_insert(0.0) += 1.0;
                    }
                }
            }
            edges
        })
        .collect();

    let mut builder = GraphBuilder::with_capacity(candidates.len() / 2);
    for candidate in candidates {
        builder.get_or_create_node(&candidate.lemma);
    }
    for partial in partial_graphs {
        // Sorted so float accumulation order does not depend on hashing
        let mut edges: Vec<_> = partial.into_iter().collect();
        edges.sort_by(|x, y| x.0.cmp(&y.0));
        for ((a, b), weight) in edges {
            let id_a = builder.get_or_create_node(a);
            let id_b = builder.get_or_create_node(b);
            builder.increment_edge(id_a, id_b, weight);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(sentences: &[&[&str]]) -> Vec<WordCandidate> {
        let mut out = Vec::new();
        for (sent_idx, words) in sentences.iter().enumerate() {
            for word in words.iter() {
                let idx = out.len();
                out.push(WordCandidate::new(*word, sent_idx, idx));
            }
        }
        out
    }

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("topic_0");
        let id_b = builder.get_or_create_node("topic_1");
        let id_c = builder.get_or_create_node("topic_0");

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.get_label(id_b), Some("topic_1"));
    }

    #[test]
    fn test_edge_incrementing() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");

        builder.increment_edge(id_a, id_b, 1.0);
        builder.increment_edge(id_a, id_b, 0.5);

        assert_eq!(builder.get_node(id_a).unwrap().edges.get(&id_b), Some(&1.5));
        assert_eq!(builder.get_node(id_b).unwrap().edges.get(&id_a), Some(&1.5));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_from_candidates_window() {
        let words = candidates(&[&["machine", "learning", "model", "training"]]);
        let builder = GraphBuilder::from_candidates(&words, 3);

        assert_eq!(builder.node_count(), 4);
        let machine = builder.get_node_id("machine").unwrap();
        let model = builder.get_node_id("model").unwrap();
        let training = builder.get_node_id("training").unwrap();
        let node = builder.get_node(machine).unwrap();

        assert!(node.edges.contains_key(&model));
        assert!(!node.edges.contains_key(&training));
    }

    #[test]
    fn test_no_cross_sentence_edges() {
        let words = candidates(&[&["machine", "learning"], &["deep", "neural"]]);
        let builder = GraphBuilder::from_candidates(&words, 3);

        let learning = builder.get_node_id("learning").unwrap();
        let deep = builder.get_node_id("deep").unwrap();
        assert!(!builder.get_node(learning).unwrap().edges.contains_key(&deep));
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id_a = builder.get_or_create_node("test");

        builder.increment_edge(id_a, id_a, 1.0);

        assert!(builder.get_node(id_a).unwrap().edges.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vocab = ["graph", "node", "edge", "weight", "rank", "walk", "score"];
        let mut words = Vec::new();
        for sent_idx in 0..200 {
            for k in 0..6 {
                let idx = words.len();
                words.push(WordCandidate::new(vocab[(sent_idx + k * 3) % vocab.len()], sent_idx, idx));
            }
        }
        assert!(words.len() >= 1000);

        let sequential = GraphBuilder::from_candidates(&words, 3);
        let parallel = build_graph_parallel(&words, 3);

        assert_eq!(sequential.node_count(), parallel.node_count());
        for (id, node) in sequential.nodes() {
            assert_eq!(parallel.get_label(id), Some(node.label.as_str()));
            let other = parallel.get_node(id).unwrap();
            assert_eq!(node.edges.len(), other.edges.len());
            for (target, weight) in &node.edges {
                assert!((other.edges[target] - weight).abs() < 1e-9);
            }
        }
    }
}
