// nplb status - metadata of what is currently published

use std::path::Path;

use nplboard_io::{DirStore, StoreStatus};

use crate::{emit_json, CliError};

pub fn cmd_status(store: &Path) -> Result<(), CliError> {
    let store = DirStore::new(store);
    let status = StoreStatus::read(&store).map_err(CliError::io)?;
    emit_json(&status, None)
}
