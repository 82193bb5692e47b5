use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::normalizer::Language;
use crate::query::EmbedOptions;
use crate::results::SNIPPET_CHARS;

/// Query-time settings. Every field may be omitted from the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pages retrieved per query.
    pub k: usize,
    pub apply_idf: bool,
    pub expand_query: bool,
    pub snippet_chars: usize,
    pub language: Language,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { k: 10, apply_idf: true, expand_query: false, snippet_chars: SNIPPET_CHARS, language: Language::German }
    }
}

impl SearchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut f = File::open(path).with_context(|| format!("open config {}", path.display()))?;
        let mut buf = String::new();
        f.read_to_string(&mut buf)?;
        let config: SearchConfig =
            serde_json::from_str(&buf).with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn embed_options(&self) -> EmbedOptions {
        EmbedOptions { apply_idf: self.apply_idf, expand_query: self.expand_query }
    }
}
