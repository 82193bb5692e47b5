use crate::index::{FlatIndex, RowIndexMap};
use crate::{Corpus, DocFrequencies, PageTexts, RowId};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
/// Artifact layout version understood by this build.
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_pages: u32,
    pub dimensions: usize,
    pub created_at: String,
    pub version: u32,
}

/// File layout of a prebuilt artifacts directory.
pub struct ArtifactPaths {
    pub root: PathBuf,
}

impl ArtifactPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn page_text(&self) -> PathBuf { self.root.join("page_text.bin") }
    pub fn doc_frequency(&self) -> PathBuf { self.root.join("doc_frequency.bin") }
    pub fn row_ids(&self) -> PathBuf { self.root.join("row_ids.bin") }
    pub fn index(&self) -> PathBuf { self.root.join("pages.index") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let value = bincode::deserialize_from(BufReader::new(f))
        .with_context(|| format!("decode {}", path.display()))?;
    Ok(value)
}

pub fn load_page_text(paths: &ArtifactPaths) -> Result<PageTexts> {
    read_bincode(&paths.page_text())
}

pub fn load_doc_frequency(paths: &ArtifactPaths) -> Result<DocFrequencies> {
    read_bincode(&paths.doc_frequency())
}

pub fn load_row_ids(paths: &ArtifactPaths) -> Result<RowIndexMap> {
    let forward: HashMap<RowId, String> = read_bincode(&paths.row_ids())?;
    let rows = RowIndexMap::from_forward(forward)
        .with_context(|| format!("invalid row map {}", paths.row_ids().display()))?;
    Ok(rows)
}

pub fn load_index(paths: &ArtifactPaths) -> Result<FlatIndex> {
    let index: FlatIndex = read_bincode(&paths.index())?;
    index.validate().with_context(|| format!("invalid index {}", paths.index().display()))?;
    Ok(index)
}

pub fn load_meta(paths: &ArtifactPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("open {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    if meta.version != ARTIFACT_VERSION {
        bail!("artifact version {} is not supported (expected {})", meta.version, ARTIFACT_VERSION);
    }
    Ok(meta)
}

/// Load the page text, document frequency and row tables.
pub fn load_corpus(paths: &ArtifactPaths) -> Result<Corpus> {
    tracing::info!(path = %paths.page_text().display(), "reading page text");
    let pages = load_page_text(paths)?;
    tracing::info!(path = %paths.doc_frequency().display(), "reading document frequencies");
    let doc_frequencies = load_doc_frequency(paths)?;
    tracing::info!(path = %paths.row_ids().display(), "reading row map");
    let rows = load_row_ids(paths)?;
    tracing::info!(num_pages = pages.len(), num_terms = doc_frequencies.len(), rows = rows.len(), "corpus loaded");
    Ok(Corpus { pages, doc_frequencies, rows })
}

/// Writers for building artifact directories in tests. Artifacts are
/// produced offline, so release builds only read them.
#[cfg(any(test, feature = "test-support"))]
pub mod write {
    use super::{ArtifactPaths, MetaFile};
    use crate::index::FlatIndex;
    use crate::{DocFrequencies, PageTexts, RowId};
    use anyhow::{Context, Result};
    use serde::Serialize;
    use std::collections::HashMap;
    use std::fs::{create_dir_all, File};
    use std::io::{BufWriter, Write};
    use std::path::Path;

    fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(f);
        bincode::serialize_into(&mut w, value)?;
        w.flush()?;
        Ok(())
    }

    pub fn save_page_text(paths: &ArtifactPaths, pages: &PageTexts) -> Result<()> {
        create_dir_all(&paths.root)?;
        write_bincode(&paths.page_text(), pages)
    }

    pub fn save_doc_frequency(paths: &ArtifactPaths, df: &DocFrequencies) -> Result<()> {
        create_dir_all(&paths.root)?;
        write_bincode(&paths.doc_frequency(), df)
    }

    pub fn save_row_ids(paths: &ArtifactPaths, rows: &HashMap<RowId, String>) -> Result<()> {
        create_dir_all(&paths.root)?;
        write_bincode(&paths.row_ids(), rows)
    }

    pub fn save_index(paths: &ArtifactPaths, index: &FlatIndex) -> Result<()> {
        create_dir_all(&paths.root)?;
        write_bincode(&paths.index(), index)
    }

    pub fn save_meta(paths: &ArtifactPaths, meta: &MetaFile) -> Result<()> {
        create_dir_all(&paths.root)?;
        let mut f = File::create(paths.meta())?;
        let json = serde_json::to_string_pretty(meta)?;
        f.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::write::*;
    use super::*;
    use crate::index::Metric;

    #[test]
    fn corpus_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path().join("artifacts"));

        let pages: PageTexts = HashMap::from([("1_1".to_string(), vec!["Berlin".to_string()])]);
        let df: DocFrequencies = HashMap::from([("Berlin".to_string(), 1)]);
        let rows = HashMap::from([(0, "1_1".to_string())]);
        save_page_text(&paths, &pages).unwrap();
        save_doc_frequency(&paths, &df).unwrap();
        save_row_ids(&paths, &rows).unwrap();

        let corpus = load_corpus(&paths).unwrap();
        assert_eq!(corpus.pages, pages);
        assert_eq!(corpus.doc_frequencies, df);
        assert_eq!(corpus.rows.row("1_1"), Some(0));
        assert_eq!(corpus.num_pages(), 1);
    }

    #[test]
    fn duplicate_row_ids_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path());
        let rows = HashMap::from([(0, "1_1".to_string()), (1, "1_1".to_string())]);
        save_row_ids(&paths, &rows).unwrap();
        assert!(load_row_ids(&paths).is_err());
    }

    #[test]
    fn index_and_meta_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path());
        let index = FlatIndex::from_vectors(Metric::InnerProduct, 2, &[vec![1.0, 0.0]]).unwrap();
        save_index(&paths, &index).unwrap();
        let loaded = load_index(&paths).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.metric(), Metric::InnerProduct);

        let meta = MetaFile { num_pages: 1, dimensions: 2, created_at: "2024-01-01T00:00:00Z".into(), version: 1 };
        save_meta(&paths, &meta).unwrap();
        assert_eq!(load_meta(&paths).unwrap().dimensions, 2);
    }

    #[test]
    fn rejects_unknown_artifact_version() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path());
        let meta = MetaFile { num_pages: 1, dimensions: 2, created_at: String::new(), version: 99 };
        save_meta(&paths, &meta).unwrap();
        assert!(load_meta(&paths).is_err());
    }
}
