use pagesearch::{open_search, run_loop, PROMPT};
use pagesearch_core::embeddings::TokenEmbedError;
use pagesearch_core::persist::write::{save_doc_frequency, save_index, save_meta, save_page_text, save_row_ids};
use pagesearch_core::persist::{ArtifactPaths, MetaFile};
use pagesearch_core::{
    DocFrequencies, FlatIndex, Metric, PageSearch, PageTexts, SearchConfig, Segmenter, SubwordEmbeddings, SubwordVectors,
};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const EMBEDDINGS: &str = "3 2\n▁berlin 1 0\n▁hamburg 0 1\n<unk> 0.1 0.1\n";

/// Every word is a single piece.
struct WholeWords;

impl Segmenter for WholeWords {
    fn pieces(&self, word: &str) -> Result<Vec<String>, TokenEmbedError> {
        Ok(vec![format!("▁{word}")])
    }
}

fn subwords(path: &Path) -> SubwordEmbeddings<WholeWords> {
    SubwordEmbeddings::new(WholeWords, SubwordVectors::load_word2vec(path).unwrap())
}

fn build_tiny_artifacts(dir: &Path, dimensions: usize) -> PathBuf {
    let paths = ArtifactPaths::new(dir);

    let mut pages: PageTexts = HashMap::new();
    pages.insert("1_1".into(), vec!["Berlin ist die Hauptstadt".into(), "der Bundesrepublik.".into()]);
    pages.insert("2_1".into(), vec!["Hamburg hat einen Hafen.".into()]);
    pages.insert("3_1".into(), vec!["Zwischen Berlin und Hamburg".into()]);
    save_page_text(&paths, &pages).unwrap();

    let df: DocFrequencies = HashMap::from([
        ("Berlin".to_string(), 2),
        ("Hamburg".to_string(), 2),
        ("Hauptstadt".to_string(), 1),
        ("Hafen".to_string(), 1),
    ]);
    save_doc_frequency(&paths, &df).unwrap();

    // Row 2 carries a suffix after book and page.
    let rows = HashMap::from([(0, "1_1".to_string()), (1, "2_1".to_string()), (2, "3_1_mixed".to_string())]);
    save_row_ids(&paths, &rows).unwrap();

    let h = std::f32::consts::FRAC_1_SQRT_2;
    let index = FlatIndex::from_vectors(
        Metric::InnerProduct,
        4,
        &[vec![h, 0.0, h, 0.0], vec![0.0, h, 0.0, h], vec![0.5, 0.5, 0.5, 0.5]],
    )
    .unwrap();
    save_index(&paths, &index).unwrap();

    let meta = MetaFile { num_pages: 3, dimensions, created_at: "2024-01-01T00:00:00Z".into(), version: 1 };
    save_meta(&paths, &meta).unwrap();

    let embeddings = dir.join("subwords.w2v.txt");
    fs::write(&embeddings, EMBEDDINGS).unwrap();
    embeddings
}

fn open(dir: &Path) -> PageSearch<WholeWords> {
    let embeddings = build_tiny_artifacts(dir, 4);
    open_search(dir, subwords(&embeddings), SearchConfig::default()).unwrap()
}

fn run(search: &PageSearch<WholeWords>, input: &str) -> String {
    let mut out = Vec::new();
    run_loop(search, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn json_blocks(output: &str) -> Vec<Value> {
    output
        .split("You entered: ")
        .skip(1)
        .filter_map(|chunk| {
            let start = chunk.find('{')?;
            let end = chunk.rfind('}')?;
            serde_json::from_str(&chunk[start..=end]).ok()
        })
        .collect()
}

#[test]
fn exit_terminates_without_results() {
    let dir = tempdir().unwrap();
    let search = open(dir.path());
    let out = run(&search, "exit\n");
    assert_eq!(out, PROMPT);
    assert!(!out.contains('{'));
}

#[test]
fn query_prints_ranked_json() {
    let dir = tempdir().unwrap();
    let search = open(dir.path());
    let out = run(&search, "Berlin\nexit\n");
    assert!(out.contains("You entered: Berlin\n"));
    assert!(out.ends_with(PROMPT));

    let blocks = json_blocks(&out);
    assert_eq!(blocks.len(), 1);
    let json = &blocks[0];
    assert_eq!(json["1"]["book"], "1");
    assert_eq!(json["1"]["page_num"], "1");
    assert_eq!(json["1"]["snippet"], "Berlin ist die Hauptstadt der Bundesrepublik.");
    assert_eq!(json["2"]["book"], "3");
    assert_eq!(json["3"]["book"], "2");
}

#[test]
fn failed_query_does_not_end_the_session() {
    let dir = tempdir().unwrap();
    let search = open(dir.path());
    let out = run(&search, "und die\nHamburg\n");
    assert!(out.contains("You entered: und die\n"));
    let blocks = json_blocks(&out);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["1"]["book"], "2");
}

#[test]
fn crlf_exit_is_recognised() {
    let dir = tempdir().unwrap();
    let search = open(dir.path());
    assert_eq!(run(&search, "exit\r\nBerlin\n"), PROMPT);
}

#[test]
fn dimension_mismatch_in_meta_fails_startup() {
    let dir = tempdir().unwrap();
    let embeddings = build_tiny_artifacts(dir.path(), 300);
    assert!(open_search(dir.path(), subwords(&embeddings), SearchConfig::default()).is_err());
}

#[test]
fn missing_artifacts_fail_startup() {
    let dir = tempdir().unwrap();
    let embeddings = dir.path().join("subwords.w2v.txt");
    fs::write(&embeddings, EMBEDDINGS).unwrap();
    assert!(open_search(dir.path(), subwords(&embeddings), SearchConfig::default()).is_err());
}
