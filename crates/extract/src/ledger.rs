//! Hierarchical NPL/KOL2 table builder.
//!
//! A fold over logical rows with an explicit `Seeking | InRegion` state.
//! Only a region-total row enters `InRegion`. Branch rows seen while
//! `Seeking` are dropped, even when they name a kanwil; under a region, a
//! kanwil named on the branch row itself applies to that row alone. Total
//! rows that never appear are derived at the end.

use log::{debug, info, warn};

use crate::classify::LineRole;
use crate::collect::LogicalRow;
use crate::model::{BranchRecord, LedgerRecord, LedgerTable, PeriodFigures, RegionRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BuildState {
    #[default]
    Seeking,
    InRegion(String),
}

/// Fold accumulator: the state machine plus the table built so far.
#[derive(Debug, Default)]
struct Walk {
    state: BuildState,
    table: LedgerTable,
}

impl Walk {
    fn step(mut self, row: &LogicalRow) -> Self {
        match &row.role {
            LineRole::NationalTotal => {
                match LedgerRecord::from_fields(&row.numbers) {
                    Some(_) if self.table.national_total.is_some() => {
                        debug!("line {}: repeated national total ignored", row.line);
                    }
                    Some(record) => self.table.national_total = Some(record),
                    None => short_row(row, LedgerRecord::WIDTH),
                }
                self
            }
            LineRole::RegionTotal { region } => {
                match LedgerRecord::from_fields(&row.numbers) {
                    Some(_) if self.table.regions.iter().any(|r| r.name == *region) => {
                        debug!("line {}: repeated total for {region} ignored", row.line);
                    }
                    Some(ledger) => self.table.regions.push(RegionRecord { name: region.clone(), ledger }),
                    None => short_row(row, LedgerRecord::WIDTH),
                }
                Self { state: BuildState::InRegion(region.clone()), ..self }
            }
            LineRole::LeafCandidate { name, region: named, .. } => {
                let BuildState::InRegion(active) = &self.state else {
                    warn!("line {}: branch '{name}' appears before any region total, dropped", row.line);
                    return self;
                };
                let region = named.clone().unwrap_or_else(|| active.clone());

                // Field 0 is the row index.
                match row.numbers.get(1..).and_then(LedgerRecord::from_fields) {
                    Some(ledger) => {
                        let name = strip_region(name, &region);
                        self.table.branches.push(BranchRecord { region, name, ledger });
                    }
                    None => short_row(row, LedgerRecord::WIDTH + 1),
                }
                self
            }
            _ => self,
        }
    }
}

fn short_row(row: &LogicalRow, needed: usize) {
    debug!(
        "line {}: {:?} has {} of {needed} numbers, skipped",
        row.line,
        row.role,
        row.numbers.len()
    );
}

/// Build the nation → region → branch table from logical rows.
pub fn build_ledger(rows: &[LogicalRow]) -> LedgerTable {
    let walk = rows.iter().fold(Walk::default(), Walk::step);
    let mut table = walk.table;
    derive_missing_totals(&mut table);
    table
}

/// Fill in totals the document did not print.
///
/// Regions that have branches but no subtotal row get one aggregated from
/// their branches; a missing national total is aggregated from regions.
pub fn derive_missing_totals(table: &mut LedgerTable) {
    let mut missing: Vec<String> = Vec::new();
    for branch in &table.branches {
        let known = table.regions.iter().any(|r| r.name == branch.region);
        if !known && !missing.contains(&branch.region) {
            missing.push(branch.region.clone());
        }
    }
    for name in missing {
        let ledger = aggregate(
            table.branches.iter().filter(|b| b.region == name).map(|b| &b.ledger),
        );
        if let Some(ledger) = ledger {
            info!("region '{name}' has no subtotal row, derived from its branches");
            table.regions.push(RegionRecord { name, ledger });
        }
    }

    if table.national_total.is_none() {
        table.national_total = aggregate(table.regions.iter().map(|r| &r.ledger));
        if table.national_total.is_some() {
            info!("no national total row, derived from {} regions", table.regions.len());
        }
    }
}

/// Principal fields are summed; percentage fields are the arithmetic mean
/// across records, unweighted by volume. `None` for an empty input.
pub fn aggregate<'a, I>(records: I) -> Option<LedgerRecord>
where
    I: IntoIterator<Item = &'a LedgerRecord>,
{
    let mut count = 0usize;
    let mut sum = LedgerRecord::default();
    for rec in records {
        count += 1;
        add_period(&mut sum.current, &rec.current);
        add_period(&mut sum.prior, &rec.prior);
    }
    if count == 0 {
        return None;
    }
    let n = count as f64;
    mean_percents(&mut sum.current, n);
    mean_percents(&mut sum.prior, n);
    Some(sum)
}

fn add_period(acc: &mut PeriodFigures, p: &PeriodFigures) {
    acc.kumk += p.kumk;
    acc.kumk_percent += p.kumk_percent;
    acc.kur += p.kur;
    acc.kur_percent += p.kur_percent;
    acc.total += p.total;
    acc.total_percent += p.total_percent;
}

fn mean_percents(p: &mut PeriodFigures, n: f64) {
    p.kumk_percent /= n;
    p.kur_percent /= n;
    p.total_percent /= n;
}

/// Remove a region name left attached to either end of a branch name.
fn strip_region(name: &str, region: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let region_words: Vec<&str> = region.split_whitespace().collect();
    let eq = |a: &[&str], b: &[&str]| {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
    };

    let n = region_words.len();
    if words.len() > n {
        if eq(&words[..n], &region_words) {
            return words[n..].join(" ");
        }
        if eq(&words[words.len() - n..], &region_words) {
            return words[..words.len() - n].join(" ");
        }
    }
    words.join(" ")
}
