//! Clustering primitives
//!
//! Term-count vectorization of phrase keys and hierarchical agglomerative
//! clustering over their Euclidean distances.

pub mod hac;
pub mod vectorizer;
