//! # topical_pagerank
//!
//! Keyphrase extraction from a single POS-tagged document.
//!
//! The main extractor, [`TopicalPageRank`], segments the document into
//! candidate phrases, clusters them into topics by their shared terms, ranks
//! the topics by how closely their phrases occur together, and returns one
//! phrase per top topic in its original wording. TextRank and TF-IDF
//! extractors are available behind the same [`Extractor`] interface.
//!
//! ## Features
//!
//! - **Deterministic**: identical input and configuration give identical output
//! - **Pluggable**: normalization and fallback tagging are capability traits
//! - **Diagnosable**: clustering quality and convergence problems are
//!   reported as warnings, not errors
//!
//! ```no_run
//! use topical_pagerank::{Document, PosTag, TopicalPageRank};
//!
//! let doc = Document::from_tagged(vec![
//!     ("quick", PosTag::Adjective),
//!     ("fox", PosTag::Noun),
//! ])?;
//! let keyphrases = TopicalPageRank::new().extract(&doc)?;
//! # Ok::<(), topical_pagerank::KeyphraseError>(())
//! ```

pub mod clustering;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod topics;
pub mod types;
pub mod variants;

// Re-export commonly used types
pub use errors::{KeyphraseError, Result};
pub use types::{
    Document, ExtractionWarning, PosTag, SelectionStrategy, TextRankConfig, TfIdfConfig, Token,
    TopicalPageRankConfig,
};

// Re-export main functionality
pub use clustering::hac::Linkage;
pub use nlp::{
    normalizer::{LexiconNormalizer, LowercaseNormalizer, Normalize},
    stopwords::StopwordFilter,
    tagger::{LexiconTagger, SuffixTagger, Tag},
    tokenizer::Tokenizer,
};
pub use topics::{Topic, TopicCluster};
pub use variants::{
    text_rank::TextRank,
    tf_idf::TfIdf,
    topical_pagerank::{TopicalExtraction, TopicalPageRank},
    Extractor, Variant,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
