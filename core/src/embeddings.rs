//! Token and document embedding sources.
//!
//! - `TokenEmbedder` / `DocumentEmbedder`: the seams the query embedder uses
//! - `Segmenter`: splits a word into the pieces of a subword model; backed by
//!   a SentencePiece BPE model (the `.model` file BPEmb distributes)
//! - `SubwordVectors`: one vector per piece, loaded from word2vec text
//! - `SubwordEmbeddings`: a word's first and last piece vectors side by side
//! - `DocumentPoolEmbeddings`: mean pooling over token embeddings

use anyhow::{bail, Context, Result};
use sentencepiece::SentencePieceProcessor;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

use crate::vector;

/// Vector used for pieces the vector file does not list.
pub const UNKNOWN_SUBWORD: &str = "<unk>";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TokenEmbedError {
    #[error("segmenting {token:?} failed: {reason}")]
    Segmentation { token: String, reason: String },
    #[error("no vector for piece {piece:?} of token {token:?}")]
    UnknownSubword { piece: String, token: String },
    #[error("token {0:?} produced no subwords")]
    NoSubwords(String),
    #[error("embedding has {got} dimensions, expected {expected}")]
    Dimension { expected: usize, got: usize },
    #[error("cannot pool an empty document")]
    EmptyDocument,
}

/// Embeds a single token.
pub trait TokenEmbedder {
    fn dimensions(&self) -> usize;
    fn embed_token(&self, token: &str) -> Result<Vec<f32>, TokenEmbedError>;
}

/// Embeds a whole token sequence into one vector.
pub trait DocumentEmbedder {
    fn dimensions(&self) -> usize;
    fn embed_document(&self, tokens: &[String]) -> Result<Vec<f32>, TokenEmbedError>;
}

impl<E: TokenEmbedder + ?Sized> TokenEmbedder for Arc<E> {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed_token(&self, token: &str) -> Result<Vec<f32>, TokenEmbedError> {
        (**self).embed_token(token)
    }
}

/// Splits an already preprocessed word into subword pieces, in order.
pub trait Segmenter {
    fn pieces(&self, word: &str) -> Result<Vec<String>, TokenEmbedError>;
}

impl Segmenter for SentencePieceProcessor {
    fn pieces(&self, word: &str) -> Result<Vec<String>, TokenEmbedError> {
        let pieces = self.encode(word).map_err(|e| TokenEmbedError::Segmentation {
            token: word.to_string(),
            reason: e.to_string(),
        })?;
        Ok(pieces.into_iter().map(|p| p.piece).collect())
    }
}

/// Piece vectors keyed by piece text.
pub struct SubwordVectors {
    vocab: HashMap<String, usize>,
    vectors: Vec<f32>,
    dim: usize,
}

impl SubwordVectors {
    /// Build from `(piece, vector)` pairs; every vector must have `dim` entries.
    pub fn from_entries(dim: usize, entries: Vec<(String, Vec<f32>)>) -> Result<Self> {
        if dim == 0 {
            bail!("subword vectors must have at least one dimension");
        }
        let mut vocab = HashMap::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len() * dim);
        for (piece, vector) in entries {
            if vector.len() != dim {
                bail!("piece {piece:?} has {} dimensions, expected {dim}", vector.len());
            }
            if vocab.contains_key(&piece) {
                bail!("duplicate piece {piece:?}");
            }
            vocab.insert(piece, vocab.len());
            vectors.extend_from_slice(&vector);
        }
        Ok(Self { vocab, vectors, dim })
    }

    /// Load vectors in word2vec text format: a `<count> <dim>` header line
    /// followed by `<piece> <v1> ... <vdim>` lines.
    pub fn load_word2vec<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open subword vectors {}", path.display()))?;
        let vectors = Self::from_word2vec_reader(BufReader::new(f))
            .with_context(|| format!("parse subword vectors {}", path.display()))?;
        tracing::info!(path = %path.display(), pieces = vectors.len(), dim = vectors.dim, "loaded subword vectors");
        Ok(vectors)
    }

    pub fn from_word2vec_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => bail!("missing word2vec header"),
        };
        let mut fields = header.split_whitespace();
        let (count, dim) = match (fields.next(), fields.next(), fields.next()) {
            (Some(count), Some(dim), None) => (
                count.parse::<usize>().context("invalid vocabulary size in header")?,
                dim.parse::<usize>().context("invalid dimension in header")?,
            ),
            _ => bail!("malformed word2vec header {header:?}"),
        };

        // The header count is only checked, never trusted for allocation.
        let mut entries = Vec::new();
        for (lineno, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let mut parts = line.split_whitespace();
            let Some(piece) = parts.next() else { continue };
            let vector = parts
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .with_context(|| format!("invalid vector on line {}", lineno + 2))?;
            entries.push((piece.to_string(), vector));
        }
        if entries.len() != count {
            tracing::warn!(expected = count, found = entries.len(), "word2vec header count mismatch");
        }
        Self::from_entries(dim, entries)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    pub fn get(&self, piece: &str) -> Option<&[f32]> {
        let row = *self.vocab.get(piece)?;
        Some(&self.vectors[row * self.dim..(row + 1) * self.dim])
    }
}

/// Subword embeddings: a segmenter plus one vector per piece.
pub struct SubwordEmbeddings<S = SentencePieceProcessor> {
    segmenter: S,
    vectors: SubwordVectors,
}

impl SubwordEmbeddings {
    /// Open a SentencePiece model and its word2vec piece vectors.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(model: P, vectors: Q) -> Result<Self> {
        let model = model.as_ref();
        let segmenter = SentencePieceProcessor::open(model)
            .with_context(|| format!("open subword model {}", model.display()))?;
        tracing::info!(path = %model.display(), "loaded subword model");
        Ok(Self::new(segmenter, SubwordVectors::load_word2vec(vectors)?))
    }
}

impl<S: Segmenter> SubwordEmbeddings<S> {
    pub fn new(segmenter: S, vectors: SubwordVectors) -> Self {
        Self { segmenter, vectors }
    }

    pub fn vectors(&self) -> &SubwordVectors {
        &self.vectors
    }

    /// Pieces of `word` after lowercasing, NFKC folding and mapping every
    /// digit to `0`, the preprocessing the pretrained vectors expect.
    pub fn segment(&self, word: &str) -> Result<Vec<String>, TokenEmbedError> {
        let prepared: String = word
            .nfkc()
            .flat_map(char::to_lowercase)
            .map(|c| if c.is_numeric() { '0' } else { c })
            .collect();
        self.segmenter.pieces(&prepared)
    }

    /// Vector of `piece`, or of `UNKNOWN_SUBWORD` when the vectors do not list it.
    fn piece_vector(&self, piece: &str, token: &str) -> Result<&[f32], TokenEmbedError> {
        self.vectors
            .get(piece)
            .or_else(|| self.vectors.get(UNKNOWN_SUBWORD))
            .ok_or_else(|| TokenEmbedError::UnknownSubword { piece: piece.to_string(), token: token.to_string() })
    }
}

impl<S: Segmenter> TokenEmbedder for SubwordEmbeddings<S> {
    /// First and last piece vectors side by side.
    fn dimensions(&self) -> usize {
        self.vectors.dim * 2
    }

    fn embed_token(&self, token: &str) -> Result<Vec<f32>, TokenEmbedError> {
        if token.trim().is_empty() {
            return Ok(vec![0.0; self.dimensions()]);
        }
        let pieces = self.segment(token)?;
        let (Some(first), Some(last)) = (pieces.first(), pieces.last()) else {
            return Err(TokenEmbedError::NoSubwords(token.to_string()));
        };
        let mut embedding = Vec::with_capacity(self.dimensions());
        embedding.extend_from_slice(self.piece_vector(first, token)?);
        embedding.extend_from_slice(self.piece_vector(last, token)?);
        Ok(embedding)
    }
}

/// Mean-pools the embeddings of every token of a document.
pub struct DocumentPoolEmbeddings<E> {
    inner: E,
}

impl<E: TokenEmbedder> DocumentPoolEmbeddings<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: TokenEmbedder> DocumentEmbedder for DocumentPoolEmbeddings<E> {
    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn embed_document(&self, tokens: &[String]) -> Result<Vec<f32>, TokenEmbedError> {
        let embeddings = tokens
            .iter()
            .map(|tok| self.inner.embed_token(tok))
            .collect::<Result<Vec<_>, _>>()?;
        vector::mean(&embeddings).ok_or(TokenEmbedError::EmptyDocument)
    }
}
