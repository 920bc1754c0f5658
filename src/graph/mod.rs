//! Graph construction and representation
//!
//! Incremental graph building and the CSR layout PageRank iterates over.
//! Used for the topic graph and the TextRank word graph.

pub mod builder;
pub mod csr;
