use log::info;

use crate::classify::{DailyClassifier, LedgerClassifier};
use crate::collect::{logical_rows, LogicalRow};
use crate::config::ExtractConfig;
use crate::daily::build_daily;
use crate::ledger::build_ledger;
use crate::model::{ReportKind, Shape, Table};
use crate::sheet::{daily_rows, ledger_rows, Cell};

/// Extract a report table from text lines (PDF text, one line per entry).
pub fn extract_lines<S: AsRef<str>>(kind: ReportKind, lines: &[S], config: &ExtractConfig) -> Table {
    let cap = config.collector.max_lookahead;
    let rows = match kind.shape() {
        Shape::Ledger => logical_rows(&LedgerClassifier::new(config), lines, cap),
        Shape::Daily => logical_rows(&DailyClassifier::new(config), lines, cap),
    };
    info!("{kind}: {} lines, {} logical rows", lines.len(), rows.len());
    build(kind, &rows, config)
}

/// Extract a report table from spreadsheet rows at the configured offsets.
pub fn extract_rows(kind: ReportKind, rows: &[Vec<Cell>], config: &ExtractConfig) -> Table {
    let logical = match kind.shape() {
        Shape::Ledger => ledger_rows(rows, config),
        Shape::Daily => daily_rows(rows, config),
    };
    info!("{kind}: {} sheet rows, {} logical rows", rows.len(), logical.len());
    build(kind, &logical, config)
}

fn build(kind: ReportKind, rows: &[LogicalRow], config: &ExtractConfig) -> Table {
    let table = match kind.shape() {
        Shape::Ledger => Table::Ledger(build_ledger(rows)),
        Shape::Daily => Table::Daily(build_daily(rows, &config.daily)),
    };
    let s = table.summary();
    info!(
        "{kind}: {} regions, {} branches, {} days",
        s.region_count, s.branch_count, s.day_count
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npl_and_kol2_share_one_pipeline() {
        let config = ExtractConfig::with_regions(["Jakarta I"]);
        let lines = [
            "TOTAL KANWIL JAKARTA I 10 1 20 2 30 3 4 1 5 1 9 1",
            "1 Harmoni 10 1 20 2 30 3 4 1 5 1 9 1",
        ];
        let npl = extract_lines(ReportKind::Npl, &lines, &config);
        let kol2 = extract_lines(ReportKind::Kol2, &lines, &config);
        assert_eq!(npl, kol2);
        assert_eq!(npl.summary().branch_count, 1);
    }

    #[test]
    fn realisasi_from_lines() {
        let config = ExtractConfig::with_regions(["Jakarta I"]);
        let lines = ["1 419 250 200 0 0 0 869", "2 304 0 0 0 0 0 304"];
        let Table::Daily(t) = extract_lines(ReportKind::Realisasi, &lines, &config) else {
            panic!("expected daily table");
        };
        assert_eq!(t.days.len(), 2);
        assert_eq!(t.monthly_totals.current, 1173.0);
    }

    #[test]
    fn sheet_and_text_agree() {
        let config = ExtractConfig::with_regions(["Jakarta I"]);
        let figures = [10.0, 1.0, 20.0, 2.0, 30.0, 3.0, 4.0, 1.0, 5.0, 1.0, 9.0, 1.0];
        let mut region = vec![Cell::Empty, Cell::text("TOTAL KANWIL JAKARTA I")];
        region.extend(figures.iter().map(|v| Cell::Number(*v)));
        let mut branch = vec![Cell::Number(1.0), Cell::text("Harmoni")];
        branch.extend(figures.iter().map(|v| Cell::Number(*v)));

        let from_sheet = extract_rows(ReportKind::Npl, &[region, branch], &config);
        let from_text = extract_lines(
            ReportKind::Npl,
            &[
                "TOTAL KANWIL JAKARTA I 10 1 20 2 30 3 4 1 5 1 9 1",
                "1 Harmoni 10 1 20 2 30 3 4 1 5 1 9 1",
            ],
            &config,
        );
        assert_eq!(from_sheet, from_text);
    }
}
