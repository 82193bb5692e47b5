use std::collections::HashMap;

use crate::index::RowIndexMap;

/// Vector-index row number.
pub type RowId = u32;

/// Page identifier (`"{book}_{page}"`) -> text lines of that page.
pub type PageTexts = HashMap<String, Vec<String>>;

/// Term -> number of pages containing the term.
pub type DocFrequencies = HashMap<String, u32>;

/// Lookup tables loaded once at startup and never mutated afterwards.
#[derive(Debug, Default)]
pub struct Corpus {
    pub pages: PageTexts,
    pub doc_frequencies: DocFrequencies,
    pub rows: RowIndexMap,
}

impl Corpus {
    /// Total page count, the `N` of the IDF formula.
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }
}
