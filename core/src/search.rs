//! Query pipeline: embed, retrieve, assemble.

use sentencepiece::SentencePieceProcessor;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::embeddings::{DocumentEmbedder, DocumentPoolEmbeddings, Segmenter, SubwordEmbeddings, TokenEmbedder};
use crate::idf::IdfTable;
use crate::index::{FlatIndex, IndexError, SimilarityIndex};
use crate::normalizer::Normalizer;
use crate::query::{EmbedError, QueryEmbedder};
use crate::results::{assemble, AssembleError, SearchResults};
use crate::{Corpus, PageTexts};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Embed(#[from] EmbedError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
}

/// Everything a query needs, built once and read-only afterwards.
pub struct SearchContext<T, D> {
    pages: PageTexts,
    embedder: QueryEmbedder<T, D>,
    index: SimilarityIndex,
    config: SearchConfig,
}

/// The context used by the command line tool.
pub type PageSearch<S = SentencePieceProcessor> =
    SearchContext<Arc<SubwordEmbeddings<S>>, DocumentPoolEmbeddings<Arc<SubwordEmbeddings<S>>>>;

impl<S: Segmenter> PageSearch<S> {
    /// Wire subword embeddings as both the token and the pooled document embedder.
    pub fn with_subwords(
        corpus: Corpus,
        index: FlatIndex,
        subwords: SubwordEmbeddings<S>,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        let subwords = Arc::new(subwords);
        Self::new(corpus, index, subwords.clone(), DocumentPoolEmbeddings::new(subwords), config)
    }
}

impl<T: TokenEmbedder, D: DocumentEmbedder> SearchContext<T, D> {
    pub fn new(corpus: Corpus, index: FlatIndex, tokens: T, documents: D, config: SearchConfig) -> Result<Self, SearchError> {
        for got in [tokens.dimensions(), documents.dimensions()] {
            if got != index.dimensions() {
                return Err(IndexError::DimensionMismatch { expected: index.dimensions(), got }.into());
            }
        }

        let Corpus { pages, doc_frequencies, rows } = corpus;
        let idf = IdfTable::from_document_frequencies(&doc_frequencies, pages.len());
        tracing::info!(terms = idf.len(), num_pages = pages.len(), "computed IDF table");

        let embedder = QueryEmbedder::new(Normalizer::new(config.language), idf, tokens, documents);
        let index = SimilarityIndex::new(index, rows);
        Ok(Self { pages, embedder, index, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn embedder(&self) -> &QueryEmbedder<T, D> {
        &self.embedder
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Run one query end to end.
    pub fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        let embedding = self.embedder.embed(query, &self.config.embed_options())?;
        let page_ids = self.index.retrieve_similar(&embedding, self.config.k)?;
        tracing::debug!(query, hits = page_ids.len(), "retrieved pages");
        Ok(assemble(&page_ids, &self.pages, self.config.snippet_chars)?)
    }
}
