// nplb parse - extract one report without publishing

use std::path::Path;

use log::warn;
use nplboard_extract::{ReportKind, UploadSummary};
use nplboard_io::{extract_file, SourceFormat};

use crate::{emit_json, load_config, CliError};

pub fn cmd_parse(kind: ReportKind, file: &Path, config: &Path, output: Option<&Path>) -> Result<(), CliError> {
    SourceFormat::detect(file).map_err(CliError::usage)?;
    if !file.exists() {
        return Err(CliError::io(format!("file not found: {}", file.display())));
    }
    let config = load_config(config)?;

    let table = extract_file(kind, file, &config).map_err(CliError::decode)?;
    let summary = table.summary();
    if summary == UploadSummary::default() {
        warn!("{}: no rows recognized in {}", kind, file.display());
    }
    emit_json(&table, output)?;
    eprintln!(
        "{}: {} regions, {} branches, {} days",
        kind, summary.region_count, summary.branch_count, summary.day_count
    );
    Ok(())
}
