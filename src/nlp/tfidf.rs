//! N-gram TF-IDF document-term matrix over pre-tokenized documents.

use std::collections::{BTreeMap, HashMap};

use anyhow::{bail, Result};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Vectorizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfConfig {
    /// Inclusive n-gram lengths.
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must occur in.
    pub min_df: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 4),
            min_df: 2,
        }
    }
}

/// Fitted vocabulary and inverse document frequencies.
///
/// Columns follow the lexicographic order of the feature names.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Array1<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary from `documents` and return their weight matrix.
    pub fn fit_transform(
        config: TfidfConfig,
        documents: &[Vec<String>],
    ) -> Result<(Self, Array2<f64>)> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|tokens| term_counts(tokens, config.ngram_range))
            .collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let total_terms = document_frequency.len();
        let kept: Vec<(&str, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= config.min_df)
            .collect();
        if kept.is_empty() {
            bail!(
                "no terms remain after pruning {total_terms} candidates with min_df={}",
                config.min_df
            );
        }

        let n_documents = documents.len() as f64;
        let vocabulary: Vec<String> = kept.iter().map(|(term, _)| term.to_string()).collect();
        let idf = kept
            .iter()
            .map(|(_, df)| ((1.0 + n_documents) / (1.0 + *df as f64)).ln() + 1.0)
            .collect::<Array1<f64>>();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        debug!(
            candidates = total_terms,
            kept = vocabulary.len(),
            "built tf-idf vocabulary"
        );

        let vectorizer = Self {
            config,
            vocabulary,
            index,
            idf,
        };
        let matrix = vectorizer.weigh(&counts);
        Ok((vectorizer, matrix))
    }

    /// Weight unseen documents against the fitted vocabulary.
    pub fn transform(&self, documents: &[Vec<String>]) -> Array2<f64> {
        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|tokens| term_counts(tokens, self.config.ngram_range))
            .collect();
        self.weigh(&counts)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }

    fn weigh(&self, counts: &[HashMap<String, usize>]) -> Array2<f64> {
        let mut matrix = Array2::<f64>::zeros((counts.len(), self.vocabulary.len()));
        for (mut row, doc) in matrix.rows_mut().into_iter().zip(counts) {
            for (term, count) in doc {
                if let Some(&column) = self.index.get(term) {
                    row[column] = *count as f64 * self.idf[column];
                }
            }
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }
        matrix
    }
}

/// Space-joined n-grams of every length in `range`, in document order.
pub fn ngrams(tokens: &[String], range: (usize, usize)) -> Vec<String> {
    let (min_n, max_n) = range;
    let mut grams = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        grams.extend(tokens.windows(n).map(|window| window.join(" ")));
    }
    grams
}

fn term_counts(tokens: &[String], range: (usize, usize)) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for gram in ngrams(tokens, range) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}
