//! Proximity distance between phrase groups
//!
//! Two groups of phrases are "close" when their occurrences sit near each
//! other in the segment sequence:
//!
//! ```text
//! distance(A, B) = sum over a in A, b in B, a != b
//!                  sum over i in occ(a), j in occ(b)  1 / |i - j|
//! ```
//!
//! Larger values mean the groups co-occur more tightly. The value is used as
//! the edge weight of the topic graph.

use super::segmenter::PhraseIndex;

/// Computes proximity distances over one document's [`PhraseIndex`]
#[derive(Debug, Clone, Copy)]
pub struct ProximityModel<'a> {
    index: &'a PhraseIndex,
}

impl<'a> ProximityModel<'a> {
    /// Create a model over an index
    pub fn new(index: &'a PhraseIndex) -> Self {
        Self { index }
    }

    /// Distance between two groups of phrase keys
    ///
    /// Symmetric bit for bit: contributions are summed in ascending order.
    /// Identical keys and coinciding occurrences contribute nothing; keys
    /// without occurrences are ignored.
    pub fn distance<A, B>(&self, group_a: A, group_b: B) -> f64
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
    {
        let group_b: Vec<B::Item> = group_b.into_iter().collect();
        let mut contributions = Vec::new();

        for a in group_a {
            let a: &str = a.as_ref();
            let occ_a = self.index.occurrences(a);
            if occ_a.is_empty() {
                continue;
            }
            for b in &group_b {
                let b: &str = b.as_ref();
                if a == b {
                    continue;
                }
                for &i in occ_a {
                    for &j in self.index.occurrences(b) {
                        if i == j {
                            tracing::debug!(a, b, segment = i, "coinciding occurrences skipped");
                            continue;
                        }
                        contributions.push(1.0 / i.abs_diff(j) as f64);
                    }
                }
            }
        }

        contributions.sort_by(f64::total_cmp);
        contributions.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalizer::LowercaseNormalizer;
    use crate::nlp::tagger::SuffixTagger;
    use crate::phrase::segmenter::PhraseSegmenter;
    use crate::types::{PosTag, Token};

    /// Segments "a x b x c x a": keys a@{0,3}, b@{1}, c@{2}
    fn index() -> PhraseIndex {
        let words = [
            ("alpha", PosTag::Noun),
            ("is", PosTag::Verb),
            ("beta", PosTag::Noun),
            ("is", PosTag::Verb),
            ("gamma", PosTag::Noun),
            ("is", PosTag::Verb),
            ("alpha", PosTag::Noun),
        ];
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, &(w, p))| Token::new(w, p, 0, i))
            .collect();
        let tags = PosTag::default_content_tags();
        PhraseSegmenter::new(&tags, &LowercaseNormalizer, &SuffixTagger).segment(&tokens)
    }

    #[test]
    fn test_distance_between_single_keys() {
        let index = index();
        let model = ProximityModel::new(&index);

        // alpha@{0,3} vs beta@{1}: 1/1 + 1/2
        assert!((model.distance(["alpha"], ["beta"]) - 1.5).abs() < 1e-12);
        // beta@{1} vs gamma@{2}
        assert!((model.distance(["beta"], ["gamma"]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_between_groups() {
        let index = index();
        let model = ProximityModel::new(&index);

        // alpha-gamma: 1/2 + 1/1, beta-gamma: 1/1
        let d = model.distance(vec!["alpha".to_string(), "beta".to_string()], ["gamma"]);
        assert!((d - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let index = index();
        let model = ProximityModel::new(&index);

        let ab = model.distance(["alpha", "gamma"], ["beta"]);
        let ba = model.distance(["beta"], ["gamma", "alpha"]);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_same_key_contributes_nothing() {
        let index = index();
        let model = ProximityModel::new(&index);

        assert_eq!(model.distance(["alpha"], ["alpha"]), 0.0);
    }

    #[test]
    fn test_unknown_keys_contribute_nothing() {
        let index = index();
        let model = ProximityModel::new(&index);

        assert_eq!(model.distance(["missing"], ["beta"]), 0.0);
        assert_eq!(model.distance(["beta"], Vec::<String>::new()), 0.0);
    }
}
