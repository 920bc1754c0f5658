//! Core types for topical_pagerank
//!
//! This module defines the token and document model consumed by every
//! extractor, the POS tag set, extractor configurations and the non-fatal
//! warnings an extraction can report.

use crate::clustering::hac::Linkage;
use crate::errors::{KeyphraseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Part-of-speech tags
///
/// `Foreign` is the generic Latin-script category some upstream taggers emit
/// for words outside their dictionary; such tokens are re-tagged through a
/// fallback tagger before phrase segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Interjection,
    Numeral,
    Particle,
    Punctuation,
    Symbol,
    Foreign,
    Other,
}

impl PosTag {
    /// Check if this tag is a noun (common or proper)
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }

    /// Default content tags for phrase membership: adjectives and nouns
    pub fn default_content_tags() -> Vec<PosTag> {
        vec![PosTag::Adjective, PosTag::Noun, PosTag::ProperNoun]
    }

    /// Parse a Universal Dependencies / spaCy coarse tag
    pub fn from_universal(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "PROPN" => PosTag::ProperNoun,
            "ADJ" => PosTag::Adjective,
            "VERB" | "AUX" => PosTag::Verb,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" => PosTag::Conjunction,
            "INTJ" => PosTag::Interjection,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            _ => PosTag::Other,
        }
    }

    /// Parse a Penn Treebank tag (`NN`, `JJR`, `VBD`, ...)
    pub fn from_penn(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NN" | "NNS" => PosTag::Noun,
            "NNP" | "NNPS" => PosTag::ProperNoun,
            "JJ" | "JJR" | "JJS" => PosTag::Adjective,
            "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "MD" => PosTag::Verb,
            "RB" | "RBR" | "RBS" | "WRB" => PosTag::Adverb,
            "PRP" | "PRP$" | "WP" | "WP$" => PosTag::Pronoun,
            "DT" | "PDT" | "WDT" => PosTag::Determiner,
            "IN" | "TO" => PosTag::Preposition,
            "CC" => PosTag::Conjunction,
            "UH" => PosTag::Interjection,
            "CD" => PosTag::Numeral,
            "RP" => PosTag::Particle,
            "FW" => PosTag::Foreign,
            "SYM" | "$" | "#" => PosTag::Symbol,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" => PosTag::Punctuation,
            _ => PosTag::Other,
        }
    }

    /// Parse an OpenCorpora grammeme (`NOUN`, `ADJF`, `LATN`, ...)
    pub fn from_opencorpora(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "ADJF" | "ADJS" => PosTag::Adjective,
            "VERB" | "INFN" | "PRTF" | "PRTS" | "GRND" => PosTag::Verb,
            "ADVB" => PosTag::Adverb,
            "NPRO" => PosTag::Pronoun,
            "PREP" => PosTag::Preposition,
            "CONJ" => PosTag::Conjunction,
            "PRCL" => PosTag::Particle,
            "INTJ" => PosTag::Interjection,
            "NUMR" | "NUMB" => PosTag::Numeral,
            "PNCT" => PosTag::Punctuation,
            "LATN" => PosTag::Foreign,
            _ => PosTag::Other,
        }
    }

    /// Short uppercase name, as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Adjective => "ADJ",
            PosTag::Verb => "VERB",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Interjection => "INTJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::Foreign => "LATN",
            PosTag::Other => "X",
        }
    }
}

// ============================================================================
// Token & Document
// ============================================================================

/// A tagged token from the input text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Sentence index this token belongs to
    pub sentence_idx: usize,
    /// Token index within the document
    pub token_idx: usize,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, pos: PosTag, sentence_idx: usize, token_idx: usize) -> Self {
        Self {
            text: text.into(),
            pos,
            sentence_idx,
            token_idx,
        }
    }
}

/// A validated token sequence for one document
///
/// Positions are sequential from zero, surface forms are single non-empty
/// words and sentence indices never decrease. Extractors rely on these
/// properties, so a `Document` can only be obtained through the checked
/// constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    /// Validate a token sequence and wrap it
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        let mut last_sentence = 0;
        for (i, token) in tokens.iter().enumerate() {
            if token.token_idx != i {
                return Err(KeyphraseError::malformed(
                    i,
                    format!("expected token_idx {}, found {}", i, token.token_idx),
                ));
            }
            if token.text.is_empty() {
                return Err(KeyphraseError::malformed(i, "empty surface form"));
            }
            if token.text.chars().any(char::is_whitespace) {
                return Err(KeyphraseError::malformed(
                    i,
                    format!("surface form {:?} contains whitespace", token.text),
                ));
            }
            if token.sentence_idx < last_sentence {
                return Err(KeyphraseError::malformed(
                    i,
                    format!(
                        "sentence_idx {} goes back from {}",
                        token.sentence_idx, last_sentence
                    ),
                ));
            }
            last_sentence = token.sentence_idx;
        }
        Ok(Self { tokens })
    }

    /// Build a single-sentence document from (surface, tag) pairs
    pub fn from_tagged<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, PosTag)>,
        S: Into<String>,
    {
        let tokens = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (text, pos))| Token::new(text, pos, 0, i))
            .collect();
        Self::new(tokens)
    }

    /// Build a document from sentences of (surface, tag) pairs
    pub fn from_sentences<I, J, S>(sentences: I) -> Result<Self>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (S, PosTag)>,
        S: Into<String>,
    {
        let mut tokens = Vec::new();
        for (sentence_idx, sentence) in sentences.into_iter().enumerate() {
            for (text, pos) in sentence {
                let token_idx = tokens.len();
                tokens.push(Token::new(text, pos, sentence_idx, token_idx));
            }
        }
        Self::new(tokens)
    }

    /// The validated tokens
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the document has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of sentences (highest sentence index + 1)
    pub fn num_sentences(&self) -> usize {
        self.tokens.last().map_or(0, |t| t.sentence_idx + 1)
    }
}

// ============================================================================
// Keyphrase selection strategy
// ============================================================================

/// How a representative phrase is picked from a topic cluster
///
/// Only `First` is implemented; the other policies are accepted so that
/// configurations naming them still run, and fall back to `First` with a
/// warning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SelectionStrategy {
    /// Lexicographically-first phrase key of the cluster
    #[default]
    First,
    /// Phrase closest to the cluster centroid
    Center,
    /// Most frequent phrase of the cluster
    Frequent,
    /// Any other requested name
    Unrecognized(String),
}

impl SelectionStrategy {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "first" => SelectionStrategy::First,
            "center" | "centre" => SelectionStrategy::Center,
            "frequent" => SelectionStrategy::Frequent,
            _ => SelectionStrategy::Unrecognized(value.to_string()),
        }
    }

    /// Name of the strategy
    pub fn as_str(&self) -> &str {
        match self {
            SelectionStrategy::First => "first",
            SelectionStrategy::Center => "center",
            SelectionStrategy::Frequent => "frequent",
            SelectionStrategy::Unrecognized(name) => name,
        }
    }

    /// Whether selection actually runs this policy
    pub fn is_supported(&self) -> bool {
        matches!(self, SelectionStrategy::First)
    }
}

impl std::str::FromStr for SelectionStrategy {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(SelectionStrategy::parse(value))
    }
}

impl From<String> for SelectionStrategy {
    fn from(value: String) -> Self {
        SelectionStrategy::parse(&value)
    }
}

impl From<SelectionStrategy> for String {
    fn from(value: SelectionStrategy) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// A non-fatal diagnostic raised during extraction
///
/// Warnings never change the shape of the result; they are logged when they
/// occur and collected on the extraction result for callers that want them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// The dendrogram preserves pairwise distances poorly
    LowCopheneticCorrelation { coefficient: f64, threshold: f64 },
    /// A cluster member rebuilt from its term vector differs from its key
    ReconstructedMember { key: String, member: String },
    /// Pagerank hit its iteration limit before converging
    PageRankNotConverged { iterations: usize, delta: f64 },
    /// The requested selection strategy is not implemented
    UnsupportedStrategy { requested: String, used: String },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::LowCopheneticCorrelation {
                coefficient,
                threshold,
            } => write!(
                f,
                "cophenetic correlation {:.4} < {}",
                coefficient, threshold
            ),
            ExtractionWarning::ReconstructedMember { key, member } => {
                write!(f, "phrase {:?} clustered as {:?}", key, member)
            }
            ExtractionWarning::PageRankNotConverged { iterations, delta } => write!(
                f,
                "pagerank did not converge after {} iterations (delta {:e})",
                iterations, delta
            ),
            ExtractionWarning::UnsupportedStrategy { requested, used } => write!(
                f,
                "extraction strategy {:?} is not supported, using {:?}",
                requested, used
            ),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for topical pagerank extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicalPageRankConfig {
    /// Number of top-ranked topics to turn into keyphrases
    pub n_keywords: usize,
    /// POS tags eligible for phrase membership
    pub content_tag_set: Vec<PosTag>,
    /// Linkage method for hierarchical clustering
    pub clustering_linkage: Linkage,
    /// Dendrogram cut threshold (cophenetic distance)
    pub clustering_cutoff_distance: f64,
    /// Representative phrase selection policy
    pub extraction_strategy: SelectionStrategy,
    /// Cophenetic correlation below which a quality warning is raised
    pub min_cophenetic_correlation: f64,
    /// Damping factor for PageRank
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    pub max_iterations: usize,
    /// Convergence threshold (L1 delta between iterations)
    pub convergence_threshold: f64,
    /// Optional cap on distinct phrases (first occurrences win)
    pub max_phrases: Option<usize>,
}

impl Default for TopicalPageRankConfig {
    fn default() -> Self {
        Self {
            n_keywords: 10,
            content_tag_set: PosTag::default_content_tags(),
            clustering_linkage: Linkage::Average,
            clustering_cutoff_distance: 1.25,
            extraction_strategy: SelectionStrategy::First,
            min_cophenetic_correlation: 0.8,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            max_phrases: None,
        }
    }
}

impl TopicalPageRankConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.clustering_cutoff_distance.is_finite() || self.clustering_cutoff_distance < 0.0 {
            return Err(KeyphraseError::invalid_config(format!(
                "clustering_cutoff_distance must be a finite value >= 0, got {}",
                self.clustering_cutoff_distance
            )));
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(KeyphraseError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(KeyphraseError::invalid_config("max_iterations must be > 0"));
        }

        if self.convergence_threshold.is_nan() || self.convergence_threshold <= 0.0 {
            return Err(KeyphraseError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.min_cophenetic_correlation.is_nan() {
            return Err(KeyphraseError::invalid_config(
                "min_cophenetic_correlation must be a number",
            ));
        }

        if self.max_phrases == Some(0) {
            return Err(KeyphraseError::invalid_config("max_phrases must be > 0"));
        }

        Ok(())
    }

    pub fn with_n_keywords(mut self, n_keywords: usize) -> Self {
        self.n_keywords = n_keywords;
        self
    }

    pub fn with_content_tags(mut self, tags: Vec<PosTag>) -> Self {
        self.content_tag_set = tags;
        self
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.clustering_linkage = linkage;
        self
    }

    pub fn with_cutoff_distance(mut self, cutoff: f64) -> Self {
        self.clustering_cutoff_distance = cutoff;
        self
    }

    pub fn with_extraction_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.extraction_strategy = strategy;
        self
    }

    pub fn with_min_cophenetic_correlation(mut self, threshold: f64) -> Self {
        self.min_cophenetic_correlation = threshold;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_max_phrases(mut self, max: usize) -> Self {
        self.max_phrases = Some(max);
        self
    }
}

/// Configuration for the TextRank extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRankConfig {
    /// Number of keyphrases to return
    pub top_n: usize,
    /// Co-occurrence window over candidate words
    pub window_size: usize,
    /// POS tags of candidate words
    pub content_tag_set: Vec<PosTag>,
    /// Share of the ranked vocabulary marked as keywords
    pub keyword_ratio: f64,
    /// Damping factor for PageRank
    pub damping: f64,
    /// Maximum iterations for PageRank convergence
    pub max_iterations: usize,
    /// Convergence threshold (L1 delta between iterations)
    pub convergence_threshold: f64,
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            window_size: 3,
            content_tag_set: PosTag::default_content_tags(),
            keyword_ratio: 1.0 / 3.0,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

impl TextRankConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 {
            return Err(KeyphraseError::invalid_config("window_size must be >= 2"));
        }

        if !(self.keyword_ratio > 0.0 && self.keyword_ratio <= 1.0) {
            return Err(KeyphraseError::invalid_config(format!(
                "keyword_ratio must be in (0, 1], got {}",
                self.keyword_ratio
            )));
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(KeyphraseError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(KeyphraseError::invalid_config("max_iterations must be > 0"));
        }

        Ok(())
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_keyword_ratio(mut self, ratio: f64) -> Self {
        self.keyword_ratio = ratio;
        self
    }
}

/// Configuration for the TF-IDF extractor
///
/// Sentences of the document play the role of the corpus documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Number of keyphrases to return
    pub n_keywords: usize,
    /// Longest n-gram considered
    pub max_ngram: usize,
    /// Minimum number of sentences a term must appear in
    pub min_df: usize,
    /// Maximum share of sentences a term may appear in
    pub max_df: f64,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            n_keywords: 10,
            max_ngram: 3,
            min_df: 1,
            max_df: 1.0,
        }
    }
}

impl TfIdfConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_ngram == 0 {
            return Err(KeyphraseError::invalid_config("max_ngram must be > 0"));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(KeyphraseError::invalid_config(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        Ok(())
    }

    pub fn with_n_keywords(mut self, n_keywords: usize) -> Self {
        self.n_keywords = n_keywords;
        self
    }

    pub fn with_max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram;
        self
    }

    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }
}
