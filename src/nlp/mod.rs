//! Natural Language Processing components
//!
//! Capability traits for normalization and tagging, their reference
//! implementations, stopword filtering and a raw-text tokenizer.

pub mod normalizer;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;
