//! Keyphrase extractors
//!
//! This module provides the extractor family:
//! - TopicalPageRank: Clusters phrases into topics and ranks the topics
//! - TextRank: Ranks words in a co-occurrence graph
//! - TfIdf: Frequency baseline with sentences as documents

pub mod text_rank;
pub mod tf_idf;
pub mod topical_pagerank;

use crate::errors::Result;
use crate::types::{Document, TextRankConfig, TfIdfConfig, TopicalPageRankConfig};
use text_rank::TextRank;
use tf_idf::TfIdf;
use topical_pagerank::TopicalPageRank;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    TopicalPageRank,
    TextRank,
    TfIdf,
}

impl Variant {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "textrank" | "text_rank" | "text" => Variant::TextRank,
            "tfidf" | "tf_idf" | "tf-idf" => Variant::TfIdf,
            _ => Variant::TopicalPageRank,
        }
    }

    /// Extractor of this kind with default settings
    pub fn extractor(self) -> Extractor {
        match self {
            Variant::TopicalPageRank => Extractor::TopicalPageRank(TopicalPageRank::new()),
            Variant::TextRank => Extractor::TextRank(TextRank::new()),
            Variant::TfIdf => Extractor::TfIdf(TfIdf::new()),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Variant::parse(value))
    }
}

/// Any configured extractor
#[derive(Debug, Clone)]
pub enum Extractor {
    TopicalPageRank(TopicalPageRank),
    TextRank(TextRank),
    TfIdf(TfIdf),
}

impl Extractor {
    /// Extract keyphrases, best first
    pub fn extract(&self, document: &Document) -> Result<Vec<String>> {
        match self {
            Extractor::TopicalPageRank(extractor) => extractor.extract(document),
            Extractor::TextRank(extractor) => extractor.extract(document),
            Extractor::TfIdf(extractor) => extractor.extract(document),
        }
    }

    /// Which variant this is
    pub fn variant(&self) -> Variant {
        match self {
            Extractor::TopicalPageRank(_) => Variant::TopicalPageRank,
            Extractor::TextRank(_) => Variant::TextRank,
            Extractor::TfIdf(_) => Variant::TfIdf,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Variant::TopicalPageRank.extractor()
    }
}

impl From<TopicalPageRankConfig> for Extractor {
    fn from(config: TopicalPageRankConfig) -> Self {
        Extractor::TopicalPageRank(TopicalPageRank::with_config(config))
    }
}

impl From<TextRankConfig> for Extractor {
    fn from(config: TextRankConfig) -> Self {
        Extractor::TextRank(TextRank::with_config(config))
    }
}

impl From<TfIdfConfig> for Extractor {
    fn from(config: TfIdfConfig) -> Self {
        Extractor::TfIdf(TfIdf::with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    #[test]
    fn test_variant_parse() {
        assert_eq!("TextRank".parse::<Variant>().unwrap(), Variant::TextRank);
        assert_eq!("tf-idf".parse::<Variant>().unwrap(), Variant::TfIdf);
        assert_eq!("topical_pagerank".parse::<Variant>().unwrap(), Variant::TopicalPageRank);
        assert_eq!("anything".parse::<Variant>().unwrap(), Variant::TopicalPageRank);
    }

    #[test]
    fn test_every_variant_extracts() {
        let doc = Document::from_sentences(vec![
            vec![("quick", PosTag::Adjective), ("fox", PosTag::Noun), ("runs", PosTag::Verb)],
            vec![("lazy", PosTag::Adjective), ("dog", PosTag::Noun), ("sleeps", PosTag::Verb)],
        ])
        .unwrap();

        for variant in [Variant::TopicalPageRank, Variant::TextRank, Variant::TfIdf] {
            let extractor = variant.extractor();
            assert_eq!(extractor.variant(), variant);
            assert!(!extractor.extract(&doc).unwrap().is_empty());
        }
    }

    #[test]
    fn test_from_config() {
        let extractor = Extractor::from(TopicalPageRankConfig::default().with_n_keywords(1));
        assert_eq!(extractor.variant(), Variant::TopicalPageRank);
        assert_eq!(Extractor::default().variant(), Variant::TopicalPageRank);
    }
}
