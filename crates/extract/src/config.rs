use std::collections::HashSet;

use serde::Deserialize;

use crate::error::ExtractError;
use crate::number::GroupingPolicy;

/// Upper bound for `collector.max_lookahead`. A logical row in the reports
/// never spans more than six physical lines.
pub const MAX_LOOKAHEAD_LIMIT: usize = 32;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub regions: RegionsConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub numbers: NumberConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub daily: DailyColumns,
    #[serde(default)]
    pub sheet: SheetConfig,
}

/// The bank's regional offices (kanwil), as the exact literals the reports
/// print. Required: regions are matched, never inferred.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    pub names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Markers + Noise
// ---------------------------------------------------------------------------

/// Leading phrases that mark total rows. Matched word-by-word, case-insensitive.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_national_total")]
    pub national_total: Vec<String>,
    #[serde(default = "default_region_total")]
    pub region_total: Vec<String>,
    #[serde(default = "default_month_total")]
    pub month_total: Vec<String>,
}

fn default_national_total() -> Vec<String> {
    vec!["TOTAL NASIONAL".into(), "GRAND TOTAL".into(), "NASIONAL".into()]
}

fn default_region_total() -> Vec<String> {
    vec!["TOTAL KANWIL".into(), "KANWIL".into()]
}

fn default_month_total() -> Vec<String> {
    vec!["TOTAL".into(), "JUMLAH".into()]
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            national_total: default_national_total(),
            region_total: default_region_total(),
            month_total: default_month_total(),
        }
    }
}

/// Extra header fragments, appended to the built-in denylist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoiseConfig {
    /// Lines containing any of these are noise.
    #[serde(default)]
    pub contains: Vec<String>,
    /// Lines equal to any of these are noise.
    #[serde(default)]
    pub exact: Vec<String>,
}

// ---------------------------------------------------------------------------
// Numbers + Collector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NumberConfig {
    #[serde(default)]
    pub single_separator_three_digits: GroupingPolicy,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CollectorConfig {
    /// Physical lines the collector may absorb after a row's first line.
    #[serde(default = "default_max_lookahead")]
    pub max_lookahead: usize,
}

fn default_max_lookahead() -> usize {
    5
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self { max_lookahead: default_max_lookahead() }
    }
}

/// Positions inside the 7-column current-period block of a realisasi row.
/// The 7th column is always the day total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DailyColumns {
    #[serde(default)]
    pub kur: usize,
    #[serde(default = "one")]
    pub kumk: usize,
    #[serde(default = "two")]
    pub sme_swadana: usize,
}

fn one() -> usize {
    1
}

fn two() -> usize {
    2
}

impl Default for DailyColumns {
    fn default() -> Self {
        Self { kur: 0, kumk: 1, sme_swadana: 2 }
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub ledger: LedgerSheetLayout,
    #[serde(default)]
    pub daily: DailySheetLayout,
}

/// Fixed column offsets of an NPL/KOL2 worksheet (0-based).
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerSheetLayout {
    /// Worksheet name; first worksheet when absent.
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub index_col: usize,
    #[serde(default = "one")]
    pub label_col: usize,
    /// Column carrying the kanwil name on branch rows, if the sheet has one.
    #[serde(default)]
    pub region_col: Option<usize>,
    /// First of the 12 ledger columns.
    #[serde(default = "two")]
    pub data_col: usize,
}

impl Default for LedgerSheetLayout {
    fn default() -> Self {
        Self { sheet: None, index_col: 0, label_col: 1, region_col: None, data_col: 2 }
    }
}

/// Fixed column offsets of a realisasi worksheet (0-based).
#[derive(Debug, Clone, Deserialize)]
pub struct DailySheetLayout {
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub day_col: usize,
    #[serde(default = "one")]
    pub data_col: usize,
}

impl Default for DailySheetLayout {
    fn default() -> Self {
        Self { sheet: None, day_col: 0, data_col: 1 }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ExtractConfig {
    pub fn from_toml(input: &str) -> Result<Self, ExtractError> {
        let config: ExtractConfig =
            toml::from_str(input).map_err(|e| ExtractError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config with the given regions and every other setting at its default.
    pub fn with_regions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: RegionsConfig { names: names.into_iter().map(Into::into).collect() },
            markers: MarkerConfig::default(),
            noise: NoiseConfig::default(),
            numbers: NumberConfig::default(),
            collector: CollectorConfig::default(),
            daily: DailyColumns::default(),
            sheet: SheetConfig::default(),
        }
    }

    pub fn policy(&self) -> GroupingPolicy {
        self.numbers.single_separator_three_digits
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.regions.names.is_empty() {
            return Err(ExtractError::ConfigValidation(
                "regions.names must list at least one region".into(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.regions.names {
            let key = name.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
            if key.is_empty() {
                return Err(ExtractError::ConfigValidation("region names must not be blank".into()));
            }
            if !seen.insert(key) {
                return Err(ExtractError::ConfigValidation(format!(
                    "duplicate region name '{name}'"
                )));
            }
        }

        for (label, phrases) in [
            ("markers.national_total", &self.markers.national_total),
            ("markers.region_total", &self.markers.region_total),
            ("markers.month_total", &self.markers.month_total),
        ] {
            if phrases.is_empty() || phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(ExtractError::ConfigValidation(format!(
                    "{label} must contain at least one non-blank phrase"
                )));
            }
        }

        let cap = self.collector.max_lookahead;
        if cap == 0 || cap > MAX_LOOKAHEAD_LIMIT {
            return Err(ExtractError::ConfigValidation(format!(
                "collector.max_lookahead must be between 1 and {MAX_LOOKAHEAD_LIMIT}, got {cap}"
            )));
        }

        let d = self.daily;
        for (label, pos) in [("kur", d.kur), ("kumk", d.kumk), ("sme_swadana", d.sme_swadana)] {
            if pos >= 6 {
                return Err(ExtractError::ConfigValidation(format!(
                    "daily.{label} must be 0..=5 (column 6 is the day total), got {pos}"
                )));
            }
        }
        if d.kur == d.kumk || d.kur == d.sme_swadana || d.kumk == d.sme_swadana {
            return Err(ExtractError::ConfigValidation(
                "daily columns kur, kumk and sme_swadana must be distinct".into(),
            ));
        }

        let ledger = &self.sheet.ledger;
        let mut label_cols = vec![ledger.index_col, ledger.label_col];
        label_cols.extend(ledger.region_col);
        if label_cols.iter().any(|&c| c >= ledger.data_col) {
            return Err(ExtractError::SheetLayout {
                layout: "ledger",
                reason: format!(
                    "data_col ({}) must come after index, label and region columns",
                    ledger.data_col
                ),
            });
        }
        if ledger.index_col == ledger.label_col {
            return Err(ExtractError::SheetLayout {
                layout: "ledger",
                reason: "index_col and label_col must differ".into(),
            });
        }

        let daily = &self.sheet.daily;
        if daily.day_col >= daily.data_col {
            return Err(ExtractError::SheetLayout {
                layout: "daily",
                reason: format!(
                    "data_col ({}) must come after day_col ({})",
                    daily.data_col, daily.day_col
                ),
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
