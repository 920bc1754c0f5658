//! Phrase extraction components
//!
//! Segmentation of the tagged token stream into candidate phrases, and the
//! positional proximity model over their occurrences.

pub mod proximity;
pub mod segmenter;
