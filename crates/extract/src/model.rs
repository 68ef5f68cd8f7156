use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

// ---------------------------------------------------------------------------
// Report kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Npl,
    Kol2,
    Realisasi,
}

/// Table shape a report kind extracts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// nation → kanwil → cabang, 12-field ledger records.
    Ledger,
    /// day → category, 4-field daily records.
    Daily,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [ReportKind::Npl, ReportKind::Kol2, ReportKind::Realisasi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npl => "npl",
            Self::Kol2 => "kol2",
            Self::Realisasi => "realisasi",
        }
    }

    /// NPL and KOL2 share one document shape.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Npl | Self::Kol2 => Shape::Ledger,
            Self::Realisasi => Shape::Daily,
        }
    }

    /// Object name of the structured table artifact.
    pub fn parsed_name(&self) -> String {
        format!("{}_parsed.json", self.as_str())
    }

    /// Object name of the provenance artifact.
    pub fn metadata_name(&self) -> String {
        format!("{}_metadata.json", self.as_str())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npl" => Ok(Self::Npl),
            "kol2" => Ok(Self::Kol2),
            "realisasi" => Ok(Self::Realisasi),
            _ => Err(ExtractError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger (NPL / KOL2)
// ---------------------------------------------------------------------------

/// Six figures for one reporting period. Subcategory A is KUMK, B is KUR.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodFigures {
    pub kumk: f64,
    pub kumk_percent: f64,
    pub kur: f64,
    pub kur_percent: f64,
    pub total: f64,
    pub total_percent: f64,
}

impl PeriodFigures {
    pub const WIDTH: usize = 6;

    /// Positional assignment: `[kumk, kumk%, kur, kur%, total, total%]`.
    pub fn from_fields(fields: &[f64]) -> Option<Self> {
        match fields {
            [kumk, kumk_percent, kur, kur_percent, total, total_percent, ..] => Some(Self {
                kumk: *kumk,
                kumk_percent: *kumk_percent,
                kur: *kur,
                kur_percent: *kur_percent,
                total: *total,
                total_percent: *total_percent,
            }),
            _ => None,
        }
    }
}

/// The 12-field record for one ledger row: current period, then prior.
/// Current-period fields sit at the top level of the JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(flatten)]
    pub current: PeriodFigures,
    pub prior: PeriodFigures,
}

impl LedgerRecord {
    pub const WIDTH: usize = 2 * PeriodFigures::WIDTH;

    /// Fixed field order: current period at offsets 0..6, prior at 6..12.
    /// Values are taken as printed; `total` is never recomputed.
    pub fn from_fields(fields: &[f64]) -> Option<Self> {
        if fields.len() < Self::WIDTH {
            return None;
        }
        Some(Self {
            current: PeriodFigures::from_fields(&fields[..PeriodFigures::WIDTH])?,
            prior: PeriodFigures::from_fields(&fields[PeriodFigures::WIDTH..Self::WIDTH])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    #[serde(flatten)]
    pub ledger: LedgerRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    pub region: String,
    pub name: String,
    #[serde(flatten)]
    pub ledger: LedgerRecord,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTable {
    pub national_total: Option<LedgerRecord>,
    pub regions: Vec<RegionRecord>,
    pub branches: Vec<BranchRecord>,
}

// ---------------------------------------------------------------------------
// Daily (Realisasi)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Day of month, 1..=31.
    pub day: u32,
    pub kur: f64,
    pub kumk: f64,
    pub sme_swadana: f64,
    pub total: f64,
}

/// Month totals for the three periods a realisasi report covers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub prior_prior: Option<f64>,
    pub prior: Option<f64>,
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTable {
    pub days: Vec<DailyRecord>,
    pub monthly_totals: MonthlyTotals,
}

// ---------------------------------------------------------------------------
// Published artifact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Table {
    Ledger(LedgerTable),
    Daily(DailyTable),
}

impl Table {
    pub fn summary(&self) -> UploadSummary {
        match self {
            Self::Ledger(t) => UploadSummary {
                region_count: t.regions.len(),
                branch_count: t.branches.len(),
                day_count: 0,
            },
            Self::Daily(t) => UploadSummary {
                region_count: 0,
                branch_count: 0,
                day_count: t.days.len(),
            },
        }
    }
}

/// Provenance of a published table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetadata {
    pub filename: String,
    /// ISO-8601 timestamp taken at assembly time.
    pub upload_date: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedArtifact {
    pub kind: ReportKind,
    pub metadata: ArtifactMetadata,
    pub table: Table,
}

/// Counts returned to the uploader for feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub region_count: usize,
    pub branch_count: usize,
    pub day_count: usize,
}
