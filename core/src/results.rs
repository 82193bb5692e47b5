use serde::Serialize;
use std::collections::BTreeMap;

use crate::PageTexts;

/// Snippet length in characters.
pub const SNIPPET_CHARS: usize = 200;

const PAGE_ID_DELIMITER: char = '_';

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("page identifier {0:?} is not of the form <book>_<page>")]
    MalformedPageId(String),
    #[error("no text stored for page {0:?}")]
    PageNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub book: String,
    pub page_num: String,
    pub snippet: String,
}

/// Results keyed by 1-based rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResults {
    ranked: BTreeMap<usize, ResultEntry>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn get(&self, rank: usize) -> Option<&ResultEntry> {
        self.ranked.get(&rank)
    }

    /// `(rank, entry)` pairs, best first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ResultEntry)> {
        self.ranked.iter().map(|(rank, entry)| (*rank, entry))
    }

    /// Four-space indented JSON, ranks in numeric order, non-ASCII kept as is.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Split `"{book}_{page}[_...]"` into its first two components.
pub fn split_page_id(page_id: &str) -> Result<(&str, &str), AssembleError> {
    let mut parts = page_id.split(PAGE_ID_DELIMITER);
    match (parts.next(), parts.next()) {
        (Some(book), Some(page)) => Ok((book, page)),
        _ => Err(AssembleError::MalformedPageId(page_id.to_string())),
    }
}

/// Lines joined by single spaces, hard-cut to `max_chars` characters.
pub fn snippet(lines: &[String], max_chars: usize) -> String {
    lines.join(" ").chars().take(max_chars).collect()
}

/// Join retrieved page identifiers with their text, preserving rank order.
pub fn assemble(page_ids: &[String], pages: &PageTexts, max_chars: usize) -> Result<SearchResults, AssembleError> {
    let mut ranked = BTreeMap::new();
    for (i, page_id) in page_ids.iter().enumerate() {
        let (book, page_num) = split_page_id(page_id)?;
        let key = format!("{book}{PAGE_ID_DELIMITER}{page_num}");
        let lines = pages.get(&key).ok_or(AssembleError::PageNotFound(key))?;
        ranked.insert(
            i + 1,
            ResultEntry { book: book.to_string(), page_num: page_num.to_string(), snippet: snippet(lines, max_chars) },
        );
    }
    Ok(SearchResults { ranked })
}
