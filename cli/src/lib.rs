use anyhow::{bail, Result};
use clap::Parser;
use pagesearch_core::persist::{load_corpus, load_index, load_meta, ArtifactPaths};
use pagesearch_core::{
    DocumentEmbedder, Language, PageSearch, SearchConfig, SearchContext, Segmenter, SubwordEmbeddings, TokenEmbedder,
};
use std::io::{BufRead, Write};
use std::path::Path;

/// Typing this on its own line ends the session.
pub const EXIT_COMMAND: &str = "exit";

pub const PROMPT: &str = "Please enter query here: ";

#[derive(Parser, Debug)]
#[command(name = "pagesearch")]
#[command(about = "Semantic search over book pages with a prebuilt vector index", long_about = None)]
pub struct Args {
    /// Directory with page_text.bin, doc_frequency.bin, row_ids.bin, pages.index and meta.json
    #[arg(long, default_value = "./data")]
    pub data: String,
    /// SentencePiece model used to split words into subwords
    #[arg(long, default_value = "./models/de.wiki.bpe.vs200000.model")]
    pub subword_model: String,
    /// Subword vectors in word2vec text format
    #[arg(long, default_value = "./models/de.wiki.bpe.vs200000.d300.w2v.txt")]
    pub embeddings: String,
    /// Optional JSON file with search settings
    #[arg(long)]
    pub config: Option<String>,
    /// Number of pages to retrieve per query
    #[arg(long)]
    pub k: Option<usize>,
    /// Embed the whole query by pooling instead of IDF-weighted token averaging
    #[arg(long, default_value_t = false)]
    pub no_idf: bool,
    /// Stopword language (german, english)
    #[arg(long)]
    pub language: Option<Language>,
    /// Run a single query, print its results and exit
    #[arg(long)]
    pub query: Option<String>,
}

impl Args {
    /// Settings from `--config` (or defaults), with command line flags taking precedence.
    pub fn search_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };
        if let Some(k) = self.k { config.k = k; }
        if self.no_idf { config.apply_idf = false; }
        if let Some(language) = self.language { config.language = language; }
        Ok(config)
    }
}

/// Load every artifact and wire the query pipeline.
pub fn open_search<P: AsRef<Path>, S: Segmenter>(
    data_dir: P,
    subwords: SubwordEmbeddings<S>,
    config: SearchConfig,
) -> Result<PageSearch<S>> {
    let paths = ArtifactPaths::new(data_dir);
    let meta = load_meta(&paths)?;
    let corpus = load_corpus(&paths)?;
    if meta.num_pages as usize != corpus.num_pages() {
        tracing::warn!(meta_pages = meta.num_pages, loaded_pages = corpus.num_pages(), "page count differs from meta.json");
    }

    tracing::info!(path = %paths.index().display(), "reading search index");
    let index = load_index(&paths)?;
    if index.dimensions() != meta.dimensions {
        bail!("index has {} dimensions but meta.json records {}", index.dimensions(), meta.dimensions);
    }
    tracing::info!(rows = index.len(), dimensions = index.dimensions(), metric = ?index.metric(), "search index loaded");

    let search = PageSearch::<S>::with_subwords(corpus, index, subwords, config)?;
    Ok(search)
}

/// Prompt, read a query, print its results; repeat until `exit` or end of input.
/// A failing query is logged and the loop carries on.
pub fn run_loop<T, D, R, W>(search: &SearchContext<T, D>, mut input: R, mut output: W) -> Result<()>
where
    T: TokenEmbedder,
    D: DocumentEmbedder,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::debug!("end of input");
            break;
        }
        let query = line.strip_suffix('\n').unwrap_or(&line);
        let query = query.strip_suffix('\r').unwrap_or(query);
        if query == EXIT_COMMAND {
            break;
        }

        writeln!(output, "You entered: {query}")?;
        match search.search(query) {
            Ok(results) => writeln!(output, "{}", results.to_json_pretty()?)?,
            Err(e) => tracing::error!(error = %e, query, "query failed"),
        }
    }
    Ok(())
}
