//! Exact nearest-neighbour index over page embeddings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{vector, RowId};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IndexError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("row {0} has no page identifier")]
    UnmappedRow(RowId),
    #[error("page {page_id:?} is mapped from rows {first} and {second}")]
    DuplicatePageId { page_id: String, first: RowId, second: RowId },
    #[error("corrupt index: {0}")]
    Corrupt(String),
}

/// Similarity metric of a `FlatIndex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Dot product, higher is better.
    InnerProduct,
    /// Squared Euclidean distance, lower is better.
    L2,
}

impl Metric {
    fn score(self, query: &[f32], stored: &[f32]) -> f32 {
        match self {
            Metric::InnerProduct => vector::dot(query, stored),
            Metric::L2 => vector::squared_l2(query, stored),
        }
    }

    /// Best-first ordering; equal scores fall back to ascending row.
    fn rank(self, a: &Neighbor, b: &Neighbor) -> Ordering {
        let by_score = match self {
            Metric::InnerProduct => b.score.total_cmp(&a.score),
            Metric::L2 => a.score.total_cmp(&b.score),
        };
        by_score.then(a.row.cmp(&b.row))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub row: RowId,
    pub score: f32,
}

/// Brute-force index storing vectors row-major. Row `i` is the `i`-th vector
/// added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    metric: Metric,
    dimensions: usize,
    vectors: Vec<f32>,
}

impl FlatIndex {
    pub fn new(metric: Metric, dimensions: usize) -> Self {
        Self { metric, dimensions, vectors: Vec::new() }
    }

    pub fn from_vectors(metric: Metric, dimensions: usize, rows: &[Vec<f32>]) -> Result<Self, IndexError> {
        let mut index = Self::new(metric, dimensions);
        for row in rows {
            index.add(row)?;
        }
        Ok(index)
    }

    /// Append a vector and return its row.
    pub fn add(&mut self, v: &[f32]) -> Result<RowId, IndexError> {
        if v.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch { expected: self.dimensions, got: v.len() });
        }
        let row = self.len() as RowId;
        self.vectors.extend_from_slice(v);
        Ok(row)
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        if self.dimensions == 0 { 0 } else { self.vectors.len() / self.dimensions }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks the layout of an index read from disk.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.dimensions == 0 {
            return Err(IndexError::Corrupt("zero dimensions".into()));
        }
        if self.vectors.len() % self.dimensions != 0 {
            return Err(IndexError::Corrupt(format!(
                "{} values do not divide into rows of {}",
                self.vectors.len(),
                self.dimensions
            )));
        }
        if self.len() > RowId::MAX as usize {
            return Err(IndexError::Corrupt(format!("{} rows exceed the row id range", self.len())));
        }
        Ok(())
    }

    /// The `k` best rows for `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if query.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch { expected: self.dimensions, got: query.len() });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }
        let metric = self.metric;
        let mut scored: Vec<Neighbor> = self
            .vectors
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(row, stored)| Neighbor { row: row as RowId, score: metric.score(query, stored) })
            .collect();
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, |a, b| metric.rank(a, b));
            scored.truncate(k);
        }
        scored.sort_by(|a, b| metric.rank(a, b));
        Ok(scored)
    }
}

/// Row number <-> page identifier, both directions.
#[derive(Debug, Clone, Default)]
pub struct RowIndexMap {
    forward: HashMap<RowId, String>,
    inverse: HashMap<String, RowId>,
}

impl RowIndexMap {
    /// Derive the inverse of `forward`. Fails if two rows share a page id.
    pub fn from_forward(forward: HashMap<RowId, String>) -> Result<Self, IndexError> {
        let mut inverse = HashMap::with_capacity(forward.len());
        for (&row, page_id) in &forward {
            if let Some(first) = inverse.insert(page_id.clone(), row) {
                let (first, second) = if first < row { (first, row) } else { (row, first) };
                return Err(IndexError::DuplicatePageId { page_id: page_id.clone(), first, second });
            }
        }
        Ok(Self { forward, inverse })
    }

    pub fn page_id(&self, row: RowId) -> Option<&str> {
        self.forward.get(&row).map(String::as_str)
    }

    pub fn row(&self, page_id: &str) -> Option<RowId> {
        self.inverse.get(page_id).copied()
    }

    pub fn forward(&self) -> &HashMap<RowId, String> {
        &self.forward
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// A `FlatIndex` whose rows resolve to page identifiers.
#[derive(Debug)]
pub struct SimilarityIndex {
    index: FlatIndex,
    rows: RowIndexMap,
}

impl SimilarityIndex {
    pub fn new(index: FlatIndex, rows: RowIndexMap) -> Self {
        if index.len() != rows.len() {
            tracing::warn!(index_rows = index.len(), mapped_rows = rows.len(), "row map size differs from index size");
        }
        Self { index, rows }
    }

    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn rows(&self) -> &RowIndexMap {
        &self.rows
    }

    pub fn retrieve_rows(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        self.index.search(query, k)
    }

    /// Page identifiers of the `k` nearest rows, best first.
    pub fn retrieve_similar(&self, query: &[f32], k: usize) -> Result<Vec<String>, IndexError> {
        self.retrieve_rows(query, k)?
            .into_iter()
            .map(|n| {
                self.rows
                    .page_id(n.row)
                    .map(str::to_string)
                    .ok_or(IndexError::UnmappedRow(n.row))
            })
            .collect()
    }
}
