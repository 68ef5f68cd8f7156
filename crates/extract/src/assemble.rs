//! Report assembly: provenance metadata and derived placeholder tables.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::ledger::derive_missing_totals;
use crate::model::{
    ArtifactMetadata, BranchRecord, LedgerRecord, LedgerTable, PeriodFigures, PublishedArtifact,
    ReportKind, Table,
};

/// Wrap a built table with provenance stamped at the current time.
pub fn assemble(kind: ReportKind, table: Table, filename: &str, file_size: u64) -> PublishedArtifact {
    assemble_at(kind, table, filename, file_size, Utc::now())
}

/// [`assemble`] with an explicit timestamp.
pub fn assemble_at(
    kind: ReportKind,
    table: Table,
    filename: &str,
    file_size: u64,
    at: DateTime<Utc>,
) -> PublishedArtifact {
    PublishedArtifact {
        kind,
        metadata: ArtifactMetadata {
            filename: filename.to_string(),
            upload_date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            file_size,
        },
        table,
    }
}

// ---------------------------------------------------------------------------
// Derived split
// ---------------------------------------------------------------------------

/// Fixed KUMK/KUR share used when only a total is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatio {
    pub kumk: f64,
    pub kur: f64,
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self { kumk: 0.55, kur: 0.45 }
    }
}

/// Pro-rate a total and its percentage across KUMK and KUR.
///
/// An approximation for placeholder data, not a recomputation from the
/// underlying portfolio.
pub fn split_period(total: f64, total_percent: f64, ratio: SplitRatio) -> PeriodFigures {
    PeriodFigures {
        kumk: total * ratio.kumk,
        kumk_percent: total_percent * ratio.kumk,
        kur: total * ratio.kur,
        kur_percent: total_percent * ratio.kur,
        total,
        total_percent,
    }
}

/// One branch of a placeholder table: a region, a name and a current total.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSeed {
    pub region: String,
    pub name: String,
    pub total: f64,
    pub total_percent: f64,
}

/// Build an NPL/KOL2 table from branch totals alone.
///
/// Branch figures are split by `ratio`; the prior period is zero. Region
/// and national rows are aggregated the same way a document missing its
/// total rows would be.
pub fn placeholder_ledger(seeds: &[BranchSeed], ratio: SplitRatio) -> LedgerTable {
    let branches = seeds
        .iter()
        .map(|s| BranchRecord {
            region: s.region.trim().to_string(),
            name: s.name.trim().to_string(),
            ledger: LedgerRecord {
                current: split_period(s.total, s.total_percent, ratio),
                prior: PeriodFigures::default(),
            },
        })
        .collect();

    let mut table = LedgerTable { national_total: None, regions: Vec::new(), branches };
    derive_missing_totals(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DailyTable, UploadSummary};
    use chrono::TimeZone;

    fn seed(region: &str, name: &str, total: f64, pct: f64) -> BranchSeed {
        BranchSeed { region: region.into(), name: name.into(), total, total_percent: pct }
    }

    #[test]
    fn metadata_timestamp_is_iso8601() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 8, 30, 0).unwrap();
        let art = assemble_at(ReportKind::Realisasi, Table::Daily(DailyTable::default()), "r.pdf", 1024, at);
        assert_eq!(art.metadata.upload_date, "2026-01-05T08:30:00.000Z");
        assert_eq!(art.metadata.filename, "r.pdf");
        assert_eq!(art.metadata.file_size, 1024);
        assert_eq!(art.table.summary(), UploadSummary::default());
    }

    #[test]
    fn assemble_stamps_now() {
        let before = Utc::now();
        let art = assemble(ReportKind::Npl, Table::Ledger(LedgerTable::default()), "n.pdf", 1);
        let stamped = DateTime::parse_from_rfc3339(&art.metadata.upload_date).unwrap();
        assert!(stamped.timestamp_millis() >= before.timestamp_millis());
    }

    #[test]
    fn split_uses_ratio_for_amount_and_percent() {
        let p = split_period(1000.0, 10.0, SplitRatio::default());
        assert!((p.kumk - 550.0).abs() < 1e-9);
        assert!((p.kur - 450.0).abs() < 1e-9);
        assert!((p.kumk_percent - 5.5).abs() < 1e-9);
        assert!((p.kur_percent - 4.5).abs() < 1e-9);
        assert_eq!(p.total, 1000.0);
    }

    #[test]
    fn placeholder_aggregates_regions_and_nation() {
        let seeds = [
            seed("Sumatera 1", "Medan", 9876.0, 12.0),
            seed("Sumatera 1", "Batam", 124.0, 8.0),
            seed("Kalimantan", "Balikpapan", 1000.0, 4.0),
        ];
        let table = placeholder_ledger(&seeds, SplitRatio::default());
        assert_eq!(table.branches.len(), 3);
        assert_eq!(table.regions.len(), 2);
        assert_eq!(table.regions[0].name, "Sumatera 1");
        assert_eq!(table.regions[0].ledger.current.total, 10000.0);
        assert_eq!(table.regions[0].ledger.current.total_percent, 10.0);

        let nat = table.national_total.unwrap();
        assert_eq!(nat.current.total, 11000.0);
        assert_eq!(nat.current.total_percent, 7.0);
        assert_eq!(nat.prior, PeriodFigures::default());
    }

    #[test]
    fn placeholder_from_nothing_is_empty() {
        let table = placeholder_ledger(&[], SplitRatio::default());
        assert_eq!(table, LedgerTable::default());
    }
}
