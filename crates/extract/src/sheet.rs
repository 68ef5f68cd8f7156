//! Spreadsheet path: rows of cells at fixed column offsets.
//!
//! Produces the same [`LogicalRow`]s as the text path, so both feed the
//! same table builders. Cells never wrap, so there is no collector here.
//! Gaps inside a row's data columns (empty or non-numeric cells) read as
//! zero; a row whose data columns are all gaps has no numbers.

use log::debug;

use crate::classify::{key_words, parse_day, parse_row_index, Lexicon, LineRole, MAX_BRANCH_INDEX};
use crate::collect::LogicalRow;
use crate::config::ExtractConfig;
use crate::model::LedgerRecord;
use crate::number::normalize;

/// One decoded spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Cell content as label text. Numbers render without a trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Whole number in the cell, from either a numeric or a text cell.
    fn as_index(&self) -> Option<u32> {
        match self {
            Self::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX) => Some(*n as u32),
            Self::Text(s) => parse_row_index(s.trim()),
            _ => None,
        }
    }
}

static EMPTY: Cell = Cell::Empty;

fn cell(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&EMPTY)
}

/// Numeric value of each data cell; `None` marks a gap.
fn data_values(cells: &[Cell], lexicon: &Lexicon) -> Vec<Option<f64>> {
    cells
        .iter()
        .map(|c| match c {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => normalize(s, lexicon.policy()),
            _ => None,
        })
        .collect()
}

/// Gaps become zero; an all-gap row yields no numbers.
fn fill_gaps(values: Vec<Option<f64>>) -> Vec<f64> {
    if values.iter().all(Option::is_none) {
        return Vec::new();
    }
    values.into_iter().map(|v| v.unwrap_or(0.0)).collect()
}

/// Logical rows of an NPL/KOL2 worksheet.
pub fn ledger_rows(rows: &[Vec<Cell>], config: &ExtractConfig) -> Vec<LogicalRow> {
    let lexicon = Lexicon::new(config);
    let layout = &config.sheet.ledger;
    let mut current: Option<String> = None;
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let line = i + 1;
        let head: Vec<String> = row.iter().take(layout.data_col).map(Cell::as_text).collect();
        let keys = key_words(&head.join(" "));
        if keys.is_empty() || lexicon.is_noise(&keys) {
            continue;
        }

        let end = (layout.data_col + LedgerRecord::WIDTH).min(row.len());
        let data = row.get(layout.data_col..end).unwrap_or(&[]);
        let numbers = fill_gaps(data_values(data, &lexicon));

        if Lexicon::leading_marker(&lexicon.national_total, &keys).is_some() {
            out.push(LogicalRow { role: LineRole::NationalTotal, numbers, line });
            continue;
        }

        if let Some(len) = Lexicon::leading_marker(&lexicon.region_total, &keys) {
            match lexicon.find_region(&keys, len) {
                Some((_, _, region)) => {
                    current = Some(region.to_string());
                    out.push(LogicalRow { role: LineRole::RegionTotal { region: region.to_string() }, numbers, line });
                }
                None => debug!("row {line}: region total without a known region, skipped"),
            }
            continue;
        }

        let label = cell(row, layout.label_col).as_text();
        let index = cell(row, layout.index_col).as_index();
        if let Some(index) = index.filter(|i| (1..=MAX_BRANCH_INDEX).contains(i)) {
            if !label.is_empty() {
                let named = layout
                    .region_col
                    .map(|c| key_words(&cell(row, c).as_text()))
                    .and_then(|k| lexicon.find_region(&k, 0).map(|(_, _, r)| r.to_string()))
                    .or_else(|| lexicon.find_region(&key_words(&label), 0).map(|(_, _, r)| r.to_string()));
                let region = named.or_else(|| current.clone());

                let mut leaf_numbers = vec![f64::from(index)];
                leaf_numbers.extend(numbers);
                out.push(LogicalRow {
                    role: LineRole::LeafCandidate { index, name: label, region },
                    numbers: leaf_numbers,
                    line,
                });
                continue;
            }
        }
        debug!("row {line}: not a table row, skipped");
    }

    out
}

/// Logical rows of a realisasi worksheet.
pub fn daily_rows(rows: &[Vec<Cell>], config: &ExtractConfig) -> Vec<LogicalRow> {
    let lexicon = Lexicon::new(config);
    let layout = &config.sheet.daily;
    let mut out = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let line = i + 1;
        let head: Vec<String> = row.iter().take(layout.data_col).map(Cell::as_text).collect();
        let keys = key_words(&head.join(" "));
        if keys.is_empty() || lexicon.is_noise(&keys) {
            continue;
        }

        let mut data: &[Cell] = row.get(layout.data_col..).unwrap_or(&[]);
        while let Some((last, rest)) = data.split_last() {
            if !last.is_empty() {
                break;
            }
            data = rest;
        }
        let numbers = fill_gaps(data_values(data, &lexicon));

        if Lexicon::leading_marker(&lexicon.month_total, &keys).is_some() {
            out.push(LogicalRow { role: LineRole::MonthTotal, numbers, line });
            continue;
        }

        let day = match cell(row, layout.day_col) {
            Cell::Text(s) => parse_day(s.trim()),
            c => c.as_index().filter(|d| (1..=31).contains(d)),
        };
        if let Some(day) = day {
            out.push(LogicalRow { role: LineRole::DailyRow { day }, numbers, line });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExtractConfig {
        ExtractConfig::with_regions(["Jakarta I", "Jakarta II", "Sumatera 1"])
    }

    fn row(head: &[Cell], data: &[f64]) -> Vec<Cell> {
        let mut cells = head.to_vec();
        cells.extend(data.iter().map(|v| Cell::Number(*v)));
        cells
    }

    fn twelve() -> Vec<f64> {
        (1..=12).map(f64::from).collect()
    }

    #[test]
    fn ledger_sheet_roles() {
        let rows = vec![
            vec![Cell::text("LAPORAN NPL"), Cell::Empty],
            row(&[Cell::text("TOTAL NASIONAL"), Cell::Empty], &twelve()),
            row(&[Cell::Empty, Cell::text("TOTAL KANWIL JAKARTA II")], &twelve()),
            row(&[Cell::Number(1.0), Cell::text("Bogor")], &twelve()),
            row(&[Cell::text("2."), Cell::text("Depok")], &twelve()),
        ];
        let got = ledger_rows(&rows, &config());
        assert_eq!(got.len(), 4);
        assert_eq!(got[0].role, LineRole::NationalTotal);
        assert_eq!(got[0].line, 2);
        assert_eq!(got[1].role, LineRole::RegionTotal { region: "Jakarta II".into() });
        assert_eq!(
            got[2].role,
            LineRole::LeafCandidate { index: 1, name: "Bogor".into(), region: Some("Jakarta II".into()) }
        );
        assert_eq!(got[2].numbers.len(), 13);
        assert_eq!(got[2].numbers[0], 1.0);
        assert!(matches!(got[3].role, LineRole::LeafCandidate { index: 2, .. }));
    }

    #[test]
    fn text_cells_are_normalized_and_gaps_read_zero() {
        let mut r = vec![Cell::text("TOTAL NASIONAL"), Cell::Empty];
        r.extend([Cell::text("1.234,5"), Cell::text("-"), Cell::Empty, Cell::text("(10)")]);
        r.extend((0..8).map(|_| Cell::Number(1.0)));
        let got = ledger_rows(&[r], &config());
        assert_eq!(&got[0].numbers[..4], &[1234.5, 0.0, 0.0, -10.0]);
        assert_eq!(got[0].numbers.len(), 12);
    }

    #[test]
    fn region_column_sets_branch_region() {
        let mut config = config();
        config.sheet.ledger.region_col = Some(2);
        config.sheet.ledger.data_col = 3;
        let rows = vec![row(&[Cell::Number(4.0), Cell::text("Medan"), Cell::text("SUMATERA 1")], &twelve())];
        let got = ledger_rows(&rows, &config);
        assert_eq!(
            got[0].role,
            LineRole::LeafCandidate { index: 4, name: "Medan".into(), region: Some("Sumatera 1".into()) }
        );
    }

    #[test]
    fn header_row_naming_region_does_not_set_context() {
        let rows = vec![
            vec![Cell::Empty, Cell::text("Jakarta I")],
            row(&[Cell::Number(1.0), Cell::text("Harmoni")], &twelve()),
        ];
        let got = ledger_rows(&rows, &config());
        assert_eq!(got.len(), 1);
        assert!(matches!(&got[0].role, LineRole::LeafCandidate { region: None, .. }));

        let table = crate::ledger::build_ledger(&got);
        assert!(table.branches.is_empty());
    }

    #[test]
    fn branch_rows_follow_region_total_not_earlier_branch() {
        let mut config = config();
        config.sheet.ledger.region_col = Some(2);
        config.sheet.ledger.data_col = 3;
        let rows = vec![
            row(&[Cell::Empty, Cell::text("TOTAL KANWIL JAKARTA I"), Cell::Empty], &twelve()),
            row(&[Cell::Number(1.0), Cell::text("Medan"), Cell::text("Sumatera 1")], &twelve()),
            row(&[Cell::Number(2.0), Cell::text("Harmoni"), Cell::Empty], &twelve()),
        ];
        let got = ledger_rows(&rows, &config);
        assert!(matches!(&got[1].role, LineRole::LeafCandidate { region: Some(r), .. } if r == "Sumatera 1"));
        assert!(matches!(&got[2].role, LineRole::LeafCandidate { region: Some(r), .. } if r == "Jakarta I"));
    }

    #[test]
    fn index_out_of_range_is_not_a_branch() {
        let rows = vec![row(&[Cell::Number(51.0), Cell::text("Bogor")], &twelve())];
        assert!(ledger_rows(&rows, &config()).is_empty());
    }

    #[test]
    fn daily_sheet_rows() {
        let rows = vec![
            vec![Cell::text("Tanggal"), Cell::text("KUR")],
            row(&[Cell::Number(1.0)], &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 6.0]),
            row(&[Cell::text("02/01/2026")], &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 6.0]),
            {
                let mut r = row(&[Cell::text("TOTAL")], &vec![1.0; 21]);
                r.push(Cell::Empty);
                r
            },
        ];
        let got = daily_rows(&rows, &config());
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].role, LineRole::DailyRow { day: 1 });
        assert_eq!(got[1].role, LineRole::DailyRow { day: 2 });
        assert_eq!(got[2].role, LineRole::MonthTotal);
        assert_eq!(got[2].numbers.len(), 21);
    }

    #[test]
    fn cell_text_rendering() {
        assert_eq!(Cell::Number(7.0).as_text(), "7");
        assert_eq!(Cell::Number(2.5).as_text(), "2.5");
        assert_eq!(Cell::text("  Bogor ").as_text(), "Bogor");
    }
}
