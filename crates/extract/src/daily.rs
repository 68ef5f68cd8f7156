//! Realisasi daily table builder.
//!
//! Day rows are read from the end: the current period is always the last
//! seven columns, however many prior-period columns precede it.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::classify::LineRole;
use crate::collect::LogicalRow;
use crate::config::DailyColumns;
use crate::model::{DailyRecord, DailyTable, MonthlyTotals};

/// Category columns per period; the last one is the period total.
pub const PERIOD_COLUMNS: usize = 7;

/// Month totals read from a `MonthTotal` row: the 7th, 14th and 21st values.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PeriodTotals {
    prior_prior: f64,
    prior: f64,
    current: f64,
}

impl PeriodTotals {
    fn from_numbers(numbers: &[f64]) -> Option<Self> {
        if numbers.len() < 3 * PERIOD_COLUMNS {
            return None;
        }
        Some(Self {
            prior_prior: numbers[PERIOD_COLUMNS - 1],
            prior: numbers[2 * PERIOD_COLUMNS - 1],
            current: numbers[3 * PERIOD_COLUMNS - 1],
        })
    }
}

/// Current-period record for `day` from the last seven numbers of a row.
pub fn day_record(day: u32, numbers: &[f64], columns: &DailyColumns) -> Option<DailyRecord> {
    let start = numbers.len().checked_sub(PERIOD_COLUMNS)?;
    let block = &numbers[start..];
    Some(DailyRecord {
        day,
        kur: block[columns.kur],
        kumk: block[columns.kumk],
        sme_swadana: block[columns.sme_swadana],
        total: block[PERIOD_COLUMNS - 1],
    })
}

/// Build the day → category table from logical rows.
pub fn build_daily(rows: &[LogicalRow], columns: &DailyColumns) -> DailyTable {
    let mut days: BTreeMap<u32, DailyRecord> = BTreeMap::new();
    let mut totals: Option<PeriodTotals> = None;

    for row in rows {
        match row.role {
            LineRole::MonthTotal => match PeriodTotals::from_numbers(&row.numbers) {
                Some(t) if totals.is_none() => totals = Some(t),
                Some(_) => debug!("line {}: repeated month total ignored", row.line),
                None => debug!(
                    "line {}: month total has {} of {} numbers, skipped",
                    row.line,
                    row.numbers.len(),
                    3 * PERIOD_COLUMNS
                ),
            },
            LineRole::DailyRow { day } => {
                let Some(record) = day_record(day, &row.numbers, columns) else {
                    debug!("line {}: day {day} has {} numbers, skipped", row.line, row.numbers.len());
                    continue;
                };
                if days.contains_key(&day) {
                    warn!("line {}: day {day} already recorded, duplicate ignored", row.line);
                    continue;
                }
                days.insert(day, record);
            }
            _ => {}
        }
    }

    let days: Vec<DailyRecord> = days.into_values().collect();
    let monthly_totals = match totals {
        Some(t) => MonthlyTotals { prior_prior: Some(t.prior_prior), prior: Some(t.prior), current: t.current },
        None => {
            let current = days.iter().map(|d| d.total).sum();
            info!("no month total row, current total summed from {} days", days.len());
            MonthlyTotals { prior_prior: None, prior: None, current }
        }
    };

    DailyTable { days, monthly_totals }
}
