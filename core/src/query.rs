//! Query text -> unit-length query vector.

use tracing::debug;

use crate::embeddings::{DocumentEmbedder, TokenEmbedError, TokenEmbedder};
use crate::idf::IdfTable;
use crate::normalizer::{NormalizeOptions, Normalizer, TextError};
use crate::vector;

/// Weight applied to tokens missing from the IDF table.
pub const DEFAULT_IDF: f32 = 1.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EmbedError {
    #[error("empty string is not a valid query")]
    EmptyQuery,
    #[error(transparent)]
    Text(#[from] TextError),
    #[error("no valid word tokens were found in query")]
    NoEmbeddableTokens,
    #[error("query embedding has zero norm")]
    DegenerateEmbedding,
    #[error("document embedding failed: {0}")]
    Document(#[from] TokenEmbedError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    pub apply_idf: bool,
    /// Accepted for compatibility; expansion is not implemented and has no effect.
    pub expand_query: bool,
}

/// How a query's tokens become one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingStrategy {
    /// Per-token embeddings scaled by IDF, then averaged.
    IdfWeightedAverage,
    /// The document embedder over the whole query.
    Pooled,
}

impl EmbeddingStrategy {
    pub fn select(apply_idf: bool, num_tokens: usize) -> Self {
        if apply_idf && num_tokens > 1 {
            EmbeddingStrategy::IdfWeightedAverage
        } else {
            EmbeddingStrategy::Pooled
        }
    }
}

pub struct QueryEmbedder<T, D> {
    normalizer: Normalizer,
    idf: IdfTable,
    tokens: T,
    documents: D,
}

impl<T: TokenEmbedder, D: DocumentEmbedder> QueryEmbedder<T, D> {
    pub fn new(normalizer: Normalizer, idf: IdfTable, tokens: T, documents: D) -> Self {
        Self { normalizer, idf, tokens, documents }
    }

    pub fn idf(&self) -> &IdfTable {
        &self.idf
    }

    /// Output dimension of the document embedder.
    pub fn dimensions(&self) -> usize {
        self.documents.dimensions()
    }

    /// Query tokens with stopwords, punctuation and digits removed.
    pub fn process_query(&self, query: &str) -> Result<Vec<String>, EmbedError> {
        if query.is_empty() {
            return Err(EmbedError::EmptyQuery);
        }
        Ok(self.normalizer.normalize(query, NormalizeOptions::default().with_stopwords())?)
    }

    pub fn embed(&self, query: &str, options: &EmbedOptions) -> Result<Vec<f32>, EmbedError> {
        let tokens = self.process_query(query)?;
        let strategy = EmbeddingStrategy::select(options.apply_idf, tokens.len());
        debug!(?strategy, tokens = tokens.len(), "embedding query");

        let mut embedding = match strategy {
            EmbeddingStrategy::IdfWeightedAverage => self.idf_weighted_average(&tokens)?,
            EmbeddingStrategy::Pooled => self.documents.embed_document(&tokens)?,
        };

        if options.expand_query {
            debug!("query expansion requested; not supported, ignoring");
        }

        if !vector::l2_normalize(&mut embedding) {
            return Err(EmbedError::DegenerateEmbedding);
        }
        Ok(embedding)
    }

    /// Average of IDF-scaled token embeddings. Tokens that fail to embed are
    /// skipped; the query fails only when none succeed.
    fn idf_weighted_average(&self, tokens: &[String]) -> Result<Vec<f32>, EmbedError> {
        let expected = self.tokens.dimensions();
        let outcomes: Vec<(&str, Result<Vec<f32>, TokenEmbedError>)> = tokens
            .iter()
            .map(|tok| (tok.as_str(), self.weighted_token(tok, expected)))
            .collect();

        let mut embedded = Vec::with_capacity(outcomes.len());
        for (token, outcome) in outcomes {
            match outcome {
                Ok(v) => embedded.push(v),
                Err(e) => debug!(token, error = %e, "skipping token"),
            }
        }
        vector::mean(&embedded).ok_or(EmbedError::NoEmbeddableTokens)
    }

    fn weighted_token(&self, token: &str, expected: usize) -> Result<Vec<f32>, TokenEmbedError> {
        let weight = self.idf.weight(token).unwrap_or(DEFAULT_IDF);
        let mut v = self.tokens.embed_token(token)?;
        if v.len() != expected {
            return Err(TokenEmbedError::Dimension { expected, got: v.len() });
        }
        for x in v.iter_mut() {
            *x *= weight;
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{DocumentPoolEmbeddings, Segmenter, SubwordEmbeddings, SubwordVectors};
    use crate::normalizer::Language;
    use crate::DocFrequencies;
    use std::sync::Arc;

    /// Every word is a single piece.
    struct WholeWords;

    impl Segmenter for WholeWords {
        fn pieces(&self, word: &str) -> Result<Vec<String>, TokenEmbedError> {
            Ok(vec![format!("▁{word}")])
        }
    }

    type Subwords = Arc<SubwordEmbeddings<WholeWords>>;

    fn embedder(idf: IdfTable) -> QueryEmbedder<Subwords, DocumentPoolEmbeddings<Subwords>> {
        let vectors = SubwordVectors::from_entries(
            2,
            vec![
                ("▁berlin".to_string(), vec![1.0, 0.0]),
                ("▁mauer".to_string(), vec![0.0, 1.0]),
                ("▁leer".to_string(), vec![0.0, 0.0]),
            ],
        )
        .unwrap();
        let subwords = Arc::new(SubwordEmbeddings::new(WholeWords, vectors));
        QueryEmbedder::new(
            Normalizer::new(Language::German),
            idf,
            subwords.clone(),
            DocumentPoolEmbeddings::new(subwords),
        )
    }

    fn idf_for(entries: &[(&str, u32)], num_pages: usize) -> IdfTable {
        let df: DocFrequencies = entries.iter().map(|(t, n)| (t.to_string(), *n)).collect();
        IdfTable::from_document_frequencies(&df, num_pages)
    }

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn selects_strategy_by_flag_and_length() {
        assert_eq!(EmbeddingStrategy::select(true, 2), EmbeddingStrategy::IdfWeightedAverage);
        assert_eq!(EmbeddingStrategy::select(true, 1), EmbeddingStrategy::Pooled);
        assert_eq!(EmbeddingStrategy::select(false, 5), EmbeddingStrategy::Pooled);
    }

    #[test]
    fn empty_query_is_rejected() {
        let e = embedder(IdfTable::default());
        assert_eq!(e.embed("", &EmbedOptions::default()), Err(EmbedError::EmptyQuery));
    }

    #[test]
    fn stopword_only_query_has_no_tokens() {
        let e = embedder(IdfTable::default());
        assert_eq!(
            e.embed("und die der", &EmbedOptions::default()),
            Err(EmbedError::Text(TextError::NoValidTokens))
        );
    }

    #[test]
    fn output_is_unit_length() {
        let e = embedder(idf_for(&[("Berlin", 1), ("Mauer", 5)], 10));
        for options in [EmbedOptions { apply_idf: true, expand_query: false }, EmbedOptions::default()] {
            let v = e.embed("Die Berlin Mauer", &options).unwrap();
            assert_eq!(v.len(), 4);
            assert!((norm(&v) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn idf_weighting_favours_rare_terms() {
        let e = embedder(idf_for(&[("Berlin", 1), ("Mauer", 5)], 10));
        let v = e.embed("Berlin Mauer", &EmbedOptions { apply_idf: true, expand_query: false }).unwrap();
        // berlin occupies dims 0 and 2, mauer dims 1 and 3
        assert!(v[0] > v[1]);

        let pooled = e.embed("Berlin Mauer", &EmbedOptions::default()).unwrap();
        assert!((pooled[0] - pooled[1]).abs() < 1e-6);
    }

    #[test]
    fn failing_tokens_are_skipped() {
        let e = embedder(IdfTable::default());
        let options = EmbedOptions { apply_idf: true, expand_query: false };
        let v = e.embed("Berlin Xylophon", &options).unwrap();
        let only_berlin = e.embed("Berlin", &options).unwrap();
        assert_eq!(v, only_berlin);
    }

    #[test]
    fn all_tokens_failing_is_an_error() {
        let e = embedder(IdfTable::default());
        let options = EmbedOptions { apply_idf: true, expand_query: false };
        assert_eq!(e.embed("Xylophon Quark", &options), Err(EmbedError::NoEmbeddableTokens));
    }

    #[test]
    fn zero_embedding_is_degenerate() {
        let e = embedder(IdfTable::default());
        assert_eq!(e.embed("leer", &EmbedOptions::default()), Err(EmbedError::DegenerateEmbedding));
    }

    #[test]
    fn expansion_is_a_no_op() {
        let e = embedder(IdfTable::default());
        let plain = e.embed("Berlin Mauer", &EmbedOptions::default()).unwrap();
        let expanded = e.embed("Berlin Mauer", &EmbedOptions { apply_idf: false, expand_query: true }).unwrap();
        assert_eq!(plain, expanded);
    }
}
