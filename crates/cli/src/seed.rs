// nplb seed - publish a placeholder ledger from branch totals

use std::path::Path;

use log::info;
use nplboard_extract::model::Shape;
use nplboard_extract::{assemble, placeholder_ledger, BranchSeed, ReportKind, SplitRatio, Table};
use nplboard_io::{ArtifactStore, DirStore};

use crate::{emit_json, CliError};

pub fn cmd_seed(kind: ReportKind, branches: &Path, kumk_share: f64, store: &Path) -> Result<(), CliError> {
    if kind.shape() != Shape::Ledger {
        return Err(CliError::usage(format!("cannot seed '{}': only npl and kol2 have a branch ledger", kind)));
    }
    if !(0.0..=1.0).contains(&kumk_share) {
        return Err(CliError::usage(format!("--kumk-share must be between 0 and 1, got {}", kumk_share)));
    }

    let file_size = std::fs::metadata(branches)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", branches.display(), e)))?
        .len();
    let mut reader = csv::Reader::from_path(branches)
        .map_err(|e| CliError::io(format!("cannot open {}: {}", branches.display(), e)))?;
    let seeds = reader
        .deserialize::<BranchSeed>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            CliError::decode(format!("{}: {}", branches.display(), e))
                .with_hint("expected header: region,name,total,totalPercent")
        })?;
    if seeds.is_empty() {
        return Err(CliError::decode(format!("{}: no branch rows", branches.display())));
    }

    let ratio = SplitRatio { kumk: kumk_share, kur: 1.0 - kumk_share };
    let table = Table::Ledger(placeholder_ledger(&seeds, ratio));
    let summary = table.summary();

    let filename = branches
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| branches.display().to_string());
    let artifact = assemble(kind, table, &filename, file_size);

    let store = DirStore::open(store).map_err(CliError::io)?;
    store.publish(&artifact).map_err(CliError::io)?;
    info!("{}: seeded {} branches", kind, summary.branch_count);

    emit_json(&summary, None)
}
