use anyhow::Result;
use clap::Parser;
use pagesearch::{open_search, run_loop, Args};
use pagesearch_core::SubwordEmbeddings;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();
    let config = args.search_config()?;
    tracing::info!(?config, "starting");

    let subwords = SubwordEmbeddings::open(&args.subword_model, &args.embeddings)?;
    let search = open_search(&args.data, subwords, config)?;

    if let Some(query) = &args.query {
        let results = search.search(query)?;
        println!("{}", results.to_json_pretty()?);
        return Ok(());
    }

    let stdin = io::stdin();
    run_loop(&search, stdin.lock(), io::stdout().lock())
}
