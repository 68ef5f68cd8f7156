// nplb upload - extract each given report and publish it

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use nplboard_extract::assemble::assemble_at;
use nplboard_extract::{ExtractConfig, ReportKind, UploadSummary};
use nplboard_io::{extract_file, ArtifactStore, DirStore, SourceFormat};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::exit_codes::EXIT_PARTIAL;
use crate::{emit_json, load_config, CliError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Published {
    filename: String,
    file_size: u64,
    #[serde(flatten)]
    summary: UploadSummary,
}

#[derive(Serialize)]
struct Failed {
    error: String,
    code: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadReport {
    success: bool,
    upload_date: String,
    reports: Map<String, Value>,
}

pub fn cmd_upload(inputs: Vec<(ReportKind, PathBuf)>, config: &Path, store: &Path) -> Result<(), CliError> {
    if inputs.is_empty() {
        return Err(CliError::usage("no report files given")
            .with_hint("pass at least one of --npl, --kol2 or --realisasi"));
    }

    let config = load_config(config)?;
    let store = DirStore::open(store).map_err(CliError::io)?;
    let now = Utc::now();

    let mut reports = Map::new();
    let mut failures: Vec<CliError> = Vec::new();

    for (kind, path) in &inputs {
        let entry = match publish_one(*kind, path, &config, &store, now) {
            Ok(published) => {
                eprintln!(
                    "{:<10} {}  ({} regions, {} branches, {} days)",
                    kind.as_str(),
                    published.filename,
                    published.summary.region_count,
                    published.summary.branch_count,
                    published.summary.day_count,
                );
                to_value(&published)?
            }
            Err(err) => {
                eprintln!("{:<10} FAILED  {}", kind.as_str(), err.message);
                let value = to_value(&Failed { error: err.message.clone(), code: err.code })?;
                failures.push(err);
                value
            }
        };
        reports.insert(kind.as_str().to_string(), entry);
    }

    let report = UploadReport {
        success: failures.is_empty(),
        upload_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        reports,
    };
    emit_json(&report, None)?;

    if failures.is_empty() {
        return Ok(());
    }
    if failures.len() < inputs.len() {
        return Err(CliError {
            code: EXIT_PARTIAL,
            message: format!("{} of {} reports failed", failures.len(), inputs.len()),
            hint: None,
        });
    }
    // Nothing published: surface the first failure's class. Its message
    // was already printed above.
    let first = failures.swap_remove(0);
    Err(CliError { code: first.code, message: String::new(), hint: first.hint })
}

fn publish_one(
    kind: ReportKind,
    path: &Path,
    config: &ExtractConfig,
    store: &DirStore,
    now: chrono::DateTime<Utc>,
) -> Result<Published, CliError> {
    let meta = std::fs::metadata(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;
    SourceFormat::detect(path).map_err(CliError::usage)?;

    let table = extract_file(kind, path, config).map_err(CliError::decode)?;
    let summary = table.summary();
    if summary == UploadSummary::default() {
        warn!("{}: no rows recognized in {}", kind, path.display());
    }

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let artifact = assemble_at(kind, table, &filename, meta.len(), now);
    store.publish(&artifact).map_err(CliError::io)?;
    info!("{}: published to {}", kind, store.root().display());

    Ok(Published { filename, file_size: meta.len(), summary })
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|e| CliError::io(format!("JSON serialization error: {e}")))
}
