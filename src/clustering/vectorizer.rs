//! Bag-of-terms vectorizer for phrase keys
//!
//! Each phrase key becomes a term-count vector over the sorted vocabulary of
//! all terms seen while fitting. Vectors can be mapped back to the sorted
//! set of terms they contain, which is how cluster members are rebuilt.

use rustc_hash::FxHashMap;

/// Term-count vectorizer over whitespace-separated terms
#[derive(Debug, Clone, Default)]
pub struct TermVectorizer {
    /// Sorted vocabulary; a term's index is its column
    vocabulary: Vec<String>,
    /// Term -> column
    columns: FxHashMap<String, usize>,
}

impl TermVectorizer {
    /// Learn the vocabulary from a set of documents
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: Vec<String> = documents
            .iter()
            .flat_map(|doc| doc.as_ref().split_whitespace())
            .map(str::to_string)
            .collect();
        vocabulary.sort();
        vocabulary.dedup();

        let columns = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Self {
            vocabulary,
            columns,
        }
    }

    /// Fit on the documents and return their count vectors
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<Vec<f64>>) {
        let vectorizer = Self::fit(documents);
        let rows = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        (vectorizer, rows)
    }

    /// Count vector for one document; unknown terms are ignored
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];
        for term in document.split_whitespace() {
            if let Some(&col) = self.columns.get(term) {
                row[col] += 1.0;
            }
        }
        row
    }

    /// Terms with a non-zero count in `row`, in vocabulary order
    pub fn inverse_transform<'a>(&'a self, row: &[f64]) -> Vec<&'a str> {
        row.iter()
            .zip(self.vocabulary.iter())
            .filter(|(&count, _)| count != 0.0)
            .map(|(_, term)| term.as_str())
            .collect()
    }

    /// The fitted vocabulary
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of terms in the vocabulary
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}
