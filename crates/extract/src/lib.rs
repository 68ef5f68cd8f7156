//! `nplboard-extract`: report extraction engine.
//!
//! Pure engine crate: receives text lines or spreadsheet rows, returns the
//! hierarchical NPL/KOL2 ledger or the daily realisasi table.
//! No CLI or IO dependencies.

pub mod assemble;
pub mod classify;
pub mod collect;
pub mod config;
pub mod daily;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod number;
pub mod sheet;

pub use assemble::{assemble, placeholder_ledger, BranchSeed, SplitRatio};
pub use config::ExtractConfig;
pub use engine::{extract_lines, extract_rows};
pub use error::ExtractError;
pub use model::{ArtifactMetadata, PublishedArtifact, ReportKind, Table, UploadSummary};
pub use number::normalize;
pub use sheet::Cell;
