// Published artifact store
//
// Each report kind owns two objects: `{kind}_parsed.json` (the table) and
// `{kind}_metadata.json` (provenance). Publishing one kind never touches
// another kind's objects. Same-kind writers race; the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use nplboard_extract::model::{ArtifactMetadata, DailyTable, LedgerTable, Shape, Table};
use nplboard_extract::{PublishedArtifact, ReportKind};
use serde::Serialize;

pub trait ArtifactStore {
    /// Replace the kind's table and metadata.
    fn publish(&self, artifact: &PublishedArtifact) -> Result<(), String>;

    /// Metadata of the kind's live artifact, `None` when nothing is published.
    fn metadata(&self, kind: ReportKind) -> Result<Option<ArtifactMetadata>, String>;

    /// The kind's live artifact, `None` when either object is missing.
    fn load_artifact(&self, kind: ReportKind) -> Result<Option<PublishedArtifact>, String>;
}

/// Per-kind metadata, `null` for kinds with no data yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStatus {
    pub npl: Option<ArtifactMetadata>,
    pub kol2: Option<ArtifactMetadata>,
    pub realisasi: Option<ArtifactMetadata>,
}

impl StoreStatus {
    pub fn read(store: &dyn ArtifactStore) -> Result<Self, String> {
        Ok(Self {
            npl: store.metadata(ReportKind::Npl)?,
            kol2: store.metadata(ReportKind::Kol2)?,
            realisasi: store.metadata(ReportKind::Realisasi)?,
        })
    }
}

/// Artifact store backed by a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Store rooted at `root` without touching the filesystem. Reads from a
    /// missing directory find no data.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open (and create if needed) the store directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, String> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| format!("cannot create store directory {}: {}", root.display(), e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json(&self, name: &str) -> Result<Option<serde_json::Value>, String> {
        let path = self.root.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("cannot read {}: {}", path.display(), e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| format!("corrupt artifact {}: {}", path.display(), e))
    }

    /// Write via a temp file and rename so readers never see a partial file.
    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), String> {
        let path = self.root.join(name);
        let temp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        fs::write(&temp, json).map_err(|e| format!("cannot write {}: {}", temp.display(), e))?;
        fs::rename(&temp, &path).map_err(|e| format!("cannot replace {}: {}", path.display(), e))?;
        debug!("wrote {}", path.display());
        Ok(())
    }
}

impl ArtifactStore for DirStore {
    fn publish(&self, artifact: &PublishedArtifact) -> Result<(), String> {
        let kind = artifact.kind;
        self.write_json(&kind.parsed_name(), &artifact.table)?;
        self.write_json(&kind.metadata_name(), &artifact.metadata)?;
        info!("published {} ({})", kind, artifact.metadata.filename);
        Ok(())
    }

    fn metadata(&self, kind: ReportKind) -> Result<Option<ArtifactMetadata>, String> {
        match self.read_json(&kind.metadata_name())? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| format!("corrupt {}: {}", kind.metadata_name(), e)),
            None => Ok(None),
        }
    }

    fn load_artifact(&self, kind: ReportKind) -> Result<Option<PublishedArtifact>, String> {
        let Some(metadata) = self.metadata(kind)? else {
            return Ok(None);
        };
        let Some(value) = self.read_json(&kind.parsed_name())? else {
            return Ok(None);
        };

        let corrupt = |e: serde_json::Error| format!("corrupt {}: {}", kind.parsed_name(), e);
        let table = match kind.shape() {
            Shape::Ledger => Table::Ledger(serde_json::from_value::<LedgerTable>(value).map_err(corrupt)?),
            Shape::Daily => Table::Daily(serde_json::from_value::<DailyTable>(value).map_err(corrupt)?),
        };
        Ok(Some(PublishedArtifact { kind, metadata, table }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nplboard_extract::model::{DailyRecord, MonthlyTotals};

    fn artifact(kind: ReportKind, filename: &str) -> PublishedArtifact {
        let table = match kind.shape() {
            Shape::Ledger => Table::Ledger(LedgerTable::default()),
            Shape::Daily => Table::Daily(DailyTable {
                days: vec![DailyRecord { day: 1, kur: 1.0, kumk: 2.0, sme_swadana: 3.0, total: 6.0 }],
                monthly_totals: MonthlyTotals { prior_prior: None, prior: None, current: 6.0 },
            }),
        };
        nplboard_extract::assemble(kind, table, filename, 10)
    }

    #[test]
    fn empty_store_has_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        for kind in ReportKind::ALL {
            assert!(store.load_artifact(kind).unwrap().is_none());
        }
        let status = StoreStatus::read(&store).unwrap();
        assert_eq!(status, StoreStatus { npl: None, kol2: None, realisasi: None });
        let json = serde_json::to_value(&status).unwrap();
        assert!(json["npl"].is_null());
    }

    #[test]
    fn missing_directory_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::new(dir.path().join("never-created"));
        assert!(store.metadata(ReportKind::Npl).unwrap().is_none());
        assert!(!store.root().exists());
    }

    #[test]
    fn publish_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        let art = artifact(ReportKind::Realisasi, "realisasi.pdf");
        store.publish(&art).unwrap();

        assert!(dir.path().join("realisasi_parsed.json").exists());
        assert!(dir.path().join("realisasi_metadata.json").exists());
        assert!(!dir.path().join("realisasi_parsed.json.tmp").exists());
        assert_eq!(store.load_artifact(ReportKind::Realisasi).unwrap(), Some(art));
    }

    #[test]
    fn kinds_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        let npl = artifact(ReportKind::Npl, "npl-1.pdf");
        store.publish(&npl).unwrap();
        store.publish(&artifact(ReportKind::Kol2, "kol2-1.pdf")).unwrap();
        store.publish(&artifact(ReportKind::Kol2, "kol2-2.pdf")).unwrap();

        assert_eq!(store.load_artifact(ReportKind::Npl).unwrap(), Some(npl));
        let status = StoreStatus::read(&store).unwrap();
        assert_eq!(status.kol2.unwrap().filename, "kol2-2.pdf");
        assert!(status.realisasi.is_none());
    }

    #[test]
    fn missing_table_half_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        store.publish(&artifact(ReportKind::Npl, "npl.pdf")).unwrap();
        fs::remove_file(dir.path().join("npl_parsed.json")).unwrap();
        assert!(store.load_artifact(ReportKind::Npl).unwrap().is_none());
    }

    #[test]
    fn corrupt_metadata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kol2_metadata.json"), "{not json").unwrap();
        let store = DirStore::open(dir.path()).unwrap();
        assert!(store.metadata(ReportKind::Kol2).unwrap_err().contains("corrupt"));
    }
}
