pub mod config;
pub mod corpus;
pub mod embeddings;
pub mod idf;
pub mod index;
pub mod normalizer;
pub mod persist;
pub mod query;
pub mod results;
pub mod search;
mod stopwords;
pub mod vector;

pub use config::SearchConfig;
pub use corpus::{Corpus, DocFrequencies, PageTexts, RowId};
pub use embeddings::{DocumentEmbedder, DocumentPoolEmbeddings, Segmenter, SubwordEmbeddings, SubwordVectors, TokenEmbedder};
pub use idf::{compute_idf, IdfTable};
pub use index::{FlatIndex, Metric, RowIndexMap, SimilarityIndex};
pub use normalizer::{Language, NormalizeOptions, Normalizer};
pub use query::{EmbedOptions, QueryEmbedder};
pub use results::{SearchResults, SNIPPET_CHARS};
pub use search::{PageSearch, SearchContext, SearchError};
