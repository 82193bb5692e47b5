use std::collections::HashMap;

use crate::DocFrequencies;

/// Smoothed IDF: `max(log10((N - df + 0.5) / (df + 0.5)), 0)`.
///
/// A term missing from `df_table` takes the backoff branch
/// `log10((N + 0.5) / (N / 10))` rather than being treated as unseen with
/// `df = 0`. Weights are never negative; a degenerate ratio (empty corpus,
/// `df > N`) yields 0.
pub fn compute_idf(term: &str, df_table: &DocFrequencies, num_pages: usize) -> f32 {
    let n_pages = num_pages as f64;
    let (numerator, denominator) = match df_table.get(term) {
        Some(&df) => (n_pages - df as f64 + 0.5, df as f64 + 0.5),
        None => (n_pages + 0.5, n_pages / 10.0),
    };
    let idf = (numerator / denominator).log10();
    if idf.is_finite() {
        idf.max(0.0) as f32
    } else {
        0.0
    }
}

/// IDF weight for every term of the document-frequency table, computed once.
#[derive(Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f32>,
}

impl IdfTable {
    pub fn from_document_frequencies(df_table: &DocFrequencies, num_pages: usize) -> Self {
        let weights = df_table
            .keys()
            .map(|term| (term.clone(), compute_idf(term, df_table, num_pages)))
            .collect();
        Self { weights }
    }

    pub fn weight(&self, term: &str) -> Option<f32> {
        self.weights.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
