//! Line classification.
//!
//! Every physical line of extracted text gets exactly one role. Rules are
//! evaluated top to bottom and the first match wins:
//!
//! 1. denylisted header/label fragment → `Noise`
//! 2. national-total phrase → `NationalTotal`
//! 3. region-total phrase + known region → `RegionTotal` (no region → `Noise`)
//! 4. index in `[1, 50]` + branch name → `LeafCandidate`
//! 5. mostly numeric while a row is open → `Continuation`
//! 6. anything else → `Noise`
//!
//! The realisasi report swaps rules 2–4 for month-total and day rows. A
//! day row must start at column 0 while a row is open: `pdftotext -layout`
//! indents wrapped lines, and a wrapped line can start with a figure in
//! `[1, 31]`.

use crate::config::ExtractConfig;
use crate::model::LedgerRecord;
use crate::number::{is_number, is_numeric_char, numbers_in, GroupingPolicy};

/// Branch row indices above this are stray figures, not row numbers.
pub const MAX_BRANCH_INDEX: u32 = 50;

/// Share of non-space characters that must be numeric for a line to count
/// as a wrapped continuation of the open row.
pub const CONTINUATION_NUMERIC_RATIO: f64 = 0.30;

/// Columns in a full realisasi row: three periods of seven categories.
pub const DAILY_ROW_WIDTH: usize = 21;

/// Header and label fragments. A line containing any of these is never data.
const NOISE_CONTAINS: &[&str] = &[
    "DALAM JUTAAN",
    "DALAM RIBUAN",
    "RP JUTA",
    "JUTAAN RUPIAH",
    "NAMA CABANG",
    "NAMA KANWIL",
    "KOLEKTIBILITAS",
    "NON PERFORMING",
    "LAPORAN",
    "PERSENTASE",
    "POSISI",
    "REALISASI KREDIT",
    "HALAMAN",
];

/// Standalone column-group labels and category words.
const NOISE_EXACT: &[&str] = &[
    "NO",
    "NPL",
    "KOL 2",
    "KOL2",
    "KUMK",
    "KUR",
    "SME",
    "SME SWADANA",
    "NOMINAL",
    "CABANG",
    "KANWIL",
    "TANGGAL",
    "TGL",
    "KUMK KUR TOTAL",
    "NOMINAL PERSENTASE",
];

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum LineRole {
    Noise,
    NationalTotal,
    RegionTotal { region: String },
    /// A numbered branch row. `region` is the kanwil named on the row
    /// itself, else the kanwil of the last region-total row; `None` when
    /// neither exists. The builder decides whether the row is kept.
    LeafCandidate { index: u32, name: String, region: Option<String> },
    /// Realisasi month-total row.
    MonthTotal,
    /// Realisasi row for one day of the month.
    DailyRow { day: u32 },
    Continuation,
}

impl LineRole {
    /// True for roles that open a new logical row.
    pub fn starts_row(&self) -> bool {
        matches!(
            self,
            Self::NationalTotal
                | Self::RegionTotal { .. }
                | Self::LeafCandidate { .. }
                | Self::MonthTotal
                | Self::DailyRow { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub role: LineRole,
    /// Figures on this line with labels stripped. A leaf row's index comes
    /// first, so a 12-field branch row carries 13 numbers.
    pub numbers: Vec<f64>,
    /// Words in front of the first figure on a `Continuation` line: the
    /// wrapped tail of a branch name.
    pub label: Option<String>,
}

impl ClassifiedLine {
    fn noise() -> Self {
        Self::of(LineRole::Noise, Vec::new())
    }

    fn of(role: LineRole, numbers: Vec<f64>) -> Self {
        Self { role, numbers, label: None }
    }
}

/// The kanwil of the most recent region-total row. Reset per build, never
/// persisted. Page headers and notes that merely name a kanwil do not move
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionContext {
    current: Option<String>,
}

impl RegionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Enter the region of a region-total line; other lines leave the
    /// context as it is.
    pub fn observe(&mut self, line: &ClassifiedLine) {
        if let LineRole::RegionTotal { region } = &line.role {
            self.current = Some(region.clone());
        }
    }
}

/// A line classifier for one report family.
pub trait Classify {
    /// Classify `line`. `in_row` is true while the collector is absorbing
    /// wrapped lines of an open row; only then can a line be `Continuation`.
    fn classify(&self, line: &str, ctx: &RegionContext, in_row: bool) -> ClassifiedLine;

    /// Numbers a row of this role needs before its fields can be assigned.
    fn row_width(&self, role: &LineRole) -> usize;
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

/// Word-level vocabulary shared by both classifiers: region names, total
/// markers and the noise denylist, pre-normalized for matching.
#[derive(Debug, Clone)]
pub(crate) struct Lexicon {
    /// (display name, normalized words), longest first.
    regions: Vec<(String, Vec<String>)>,
    pub(crate) national_total: Vec<Vec<String>>,
    pub(crate) region_total: Vec<Vec<String>>,
    pub(crate) month_total: Vec<Vec<String>>,
    noise_contains: Vec<String>,
    noise_exact: Vec<String>,
    policy: GroupingPolicy,
}

impl Lexicon {
    pub(crate) fn new(config: &ExtractConfig) -> Self {
        let mut regions: Vec<(String, Vec<String>)> = config
            .regions
            .names
            .iter()
            .map(|name| (name.trim().to_string(), key_words(name)))
            .filter(|(_, words)| !words.is_empty())
            .collect();
        regions.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let phrases = |list: &[String]| {
            let mut out: Vec<Vec<String>> =
                list.iter().map(|p| key_words(p)).filter(|w| !w.is_empty()).collect();
            out.sort_by(|a, b| b.len().cmp(&a.len()));
            out
        };

        let noise = |builtin: &[&str], extra: &[String]| -> Vec<String> {
            builtin
                .iter()
                .copied()
                .chain(extra.iter().map(String::as_str))
                .map(|s| key_words(s).join(" "))
                .filter(|s| !s.is_empty())
                .collect()
        };

        Self {
            regions,
            national_total: phrases(config.markers.national_total.as_slice()),
            region_total: phrases(config.markers.region_total.as_slice()),
            month_total: phrases(config.markers.month_total.as_slice()),
            noise_contains: noise(NOISE_CONTAINS, config.noise.contains.as_slice()),
            noise_exact: noise(NOISE_EXACT, config.noise.exact.as_slice()),
            policy: config.policy(),
        }
    }

    pub(crate) fn is_noise(&self, keys: &[String]) -> bool {
        let joined = keys.iter().filter(|k| !k.is_empty()).cloned().collect::<Vec<_>>().join(" ");
        // Padding makes containment respect word boundaries.
        let padded = format!(" {joined} ");
        self.noise_exact.iter().any(|e| *e == joined)
            || self.noise_contains.iter().any(|c| padded.contains(&format!(" {c} ")))
    }

    /// Length of the longest marker phrase `keys` starts with.
    pub(crate) fn leading_marker(markers: &[Vec<String>], keys: &[String]) -> Option<usize> {
        markers.iter().find(|m| starts_with_words(keys, m)).map(|m| m.len())
    }

    /// First region named at or after word `from`: (start, word count, name).
    pub(crate) fn find_region(&self, keys: &[String], from: usize) -> Option<(usize, usize, &str)> {
        (from..keys.len()).find_map(|at| self.region_at(keys, at).map(|(len, name)| (at, len, name)))
    }

    pub(crate) fn region_at(&self, keys: &[String], at: usize) -> Option<(usize, &str)> {
        self.regions
            .iter()
            .find(|(_, words)| starts_with_words(&keys[at..], words))
            .map(|(name, words)| (words.len(), name.as_str()))
    }

    pub(crate) fn policy(&self) -> GroupingPolicy {
        self.policy
    }

    pub(crate) fn numbers(&self, words: &[&str]) -> Vec<f64> {
        numbers_in(words.iter().copied(), self.policy)
    }

    /// Rules 5 and 6: continuation when a row is open and the line is
    /// mostly numeric, noise otherwise.
    fn trailing_rule(&self, line: &str, words: &[&str], in_row: bool) -> ClassifiedLine {
        if !in_row || numeric_ratio(line) <= CONTINUATION_NUMERIC_RATIO {
            return ClassifiedLine::noise();
        }
        let lead: Vec<&str> = words.iter().copied().take_while(|w| !is_number(w, self.policy)).collect();
        ClassifiedLine {
            role: LineRole::Continuation,
            numbers: self.numbers(words),
            label: (!lead.is_empty()).then(|| lead.join(" ")),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger classifier (NPL / KOL2)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LedgerClassifier {
    lexicon: Lexicon,
}

impl LedgerClassifier {
    pub fn new(config: &ExtractConfig) -> Self {
        Self { lexicon: Lexicon::new(config) }
    }

    pub(crate) fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rule 4. Returns the leaf role and the numbers (index first).
    fn leaf(&self, words: &[&str], keys: &[String], ctx: &RegionContext) -> Option<(LineRole, Vec<f64>)> {
        let index = parse_row_index(words.first()?)?;
        if !(1..=MAX_BRANCH_INDEX).contains(&index) {
            return None;
        }

        let mut name_words: Vec<&str> = Vec::new();
        let mut line_region: Option<String> = None;
        let mut data_start = words.len();
        let mut at = 1;
        while at < words.len() {
            if let Some((len, region)) = self.lexicon.region_at(keys, at) {
                line_region = Some(region.to_string());
                data_start = at + len;
                break;
            }
            if is_number(words[at], self.lexicon.policy) {
                data_start = at;
                break;
            }
            name_words.push(words[at]);
            at += 1;
        }

        if name_words.is_empty() {
            return None;
        }

        let mut numbers = vec![f64::from(index)];
        numbers.extend(self.lexicon.numbers(&words[data_start..]));

        let region = line_region.or_else(|| ctx.current().map(str::to_string));
        let role = LineRole::LeafCandidate { index, name: name_words.join(" "), region };
        Some((role, numbers))
    }
}

impl Classify for LedgerClassifier {
    fn row_width(&self, role: &LineRole) -> usize {
        match role {
            // Row index slot + 12 ledger fields.
            LineRole::LeafCandidate { .. } => LedgerRecord::WIDTH + 1,
            _ => LedgerRecord::WIDTH,
        }
    }

    fn classify(&self, line: &str, ctx: &RegionContext, in_row: bool) -> ClassifiedLine {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return ClassifiedLine::noise();
        }
        let keys: Vec<String> = words.iter().map(|w| key_word(w)).collect();

        if self.lexicon.is_noise(&keys) {
            return ClassifiedLine::noise();
        }

        if let Some(len) = Lexicon::leading_marker(&self.lexicon.national_total, &keys) {
            return ClassifiedLine::of(LineRole::NationalTotal, self.lexicon.numbers(&words[len..]));
        }

        if let Some(len) = Lexicon::leading_marker(&self.lexicon.region_total, &keys) {
            return match self.lexicon.find_region(&keys, len) {
                Some((at, region_len, region)) => ClassifiedLine::of(
                    LineRole::RegionTotal { region: region.to_string() },
                    self.lexicon.numbers(&words[at + region_len..]),
                ),
                // Malformed total row: drop rather than guess.
                None => ClassifiedLine::noise(),
            };
        }

        if let Some((role, numbers)) = self.leaf(&words, &keys, ctx) {
            return ClassifiedLine::of(role, numbers);
        }

        self.lexicon.trailing_rule(line, &words, in_row)
    }
}

// ---------------------------------------------------------------------------
// Daily classifier (Realisasi)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DailyClassifier {
    lexicon: Lexicon,
}

impl DailyClassifier {
    pub fn new(config: &ExtractConfig) -> Self {
        Self { lexicon: Lexicon::new(config) }
    }

    pub(crate) fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Classify for DailyClassifier {
    fn row_width(&self, _role: &LineRole) -> usize {
        DAILY_ROW_WIDTH
    }

    fn classify(&self, line: &str, _ctx: &RegionContext, in_row: bool) -> ClassifiedLine {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return ClassifiedLine::noise();
        }
        let keys: Vec<String> = words.iter().map(|w| key_word(w)).collect();

        if self.lexicon.is_noise(&keys) {
            return ClassifiedLine::noise();
        }

        if let Some(len) = Lexicon::leading_marker(&self.lexicon.month_total, &keys) {
            return ClassifiedLine::of(LineRole::MonthTotal, self.lexicon.numbers(&words[len..]));
        }

        let indented = line.starts_with(char::is_whitespace);
        if !(in_row && indented) {
            if let Some(day) = parse_day(words[0]) {
                return ClassifiedLine::of(LineRole::DailyRow { day }, self.lexicon.numbers(&words[1..]));
            }
        }

        self.lexicon.trailing_rule(line, &words, in_row)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Uppercased word with surrounding punctuation removed, for label matching.
pub(crate) fn key_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_uppercase()
}

pub(crate) fn key_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(key_word)
        .filter(|w| !w.is_empty())
        .collect()
}

fn starts_with_words(keys: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && keys.len() >= phrase.len() && keys.iter().zip(phrase).all(|(k, p)| k == p)
}

/// Row number token: `7`, `7.` or `7)`.
pub(crate) fn parse_row_index(token: &str) -> Option<u32> {
    let digits = token.strip_suffix(&['.', ')'][..]).unwrap_or(token);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Day-of-month token: `5`, `05.`, or a full date `05/01/2026`, `5-1-2026`.
pub(crate) fn parse_day(token: &str) -> Option<u32> {
    let day = match parse_row_index(token) {
        Some(day) => day,
        None => {
            let parts: Vec<&str> = token.split(&['/', '-', '.'][..]).collect();
            if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
                return None;
            }
            parts[0].parse().ok()?
        }
    };
    (1..=31).contains(&day).then_some(day)
}

fn numeric_ratio(line: &str) -> f64 {
    let mut total = 0usize;
    let mut numeric = 0usize;
    for c in line.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if is_numeric_char(c) {
            numeric += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        numeric as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGIONS: [&str; 4] = ["Jakarta I", "Jakarta II", "Sumatera 1", "Jateng DIY"];

    fn ledger() -> LedgerClassifier {
        LedgerClassifier::new(&ExtractConfig::with_regions(REGIONS))
    }

    fn daily() -> DailyClassifier {
        DailyClassifier::new(&ExtractConfig::with_regions(REGIONS))
    }

    fn in_region(name: &str) -> RegionContext {
        RegionContext { current: Some(name.to_string()) }
    }

    #[test]
    fn header_fragments_are_noise_even_with_numbers() {
        let c = ledger();
        let ctx = RegionContext::new();
        for line in [
            "LAPORAN NPL POSISI 31 DESEMBER 2025",
            "(dalam jutaan rupiah)",
            "No  Nama Cabang   KUMK  %  KUR  %  TOTAL  %",
            "KUR",
            "  kumk ",
            "Halaman 2 dari 5",
        ] {
            assert_eq!(c.classify(line, &ctx, true).role, LineRole::Noise, "{line}");
        }
    }

    #[test]
    fn denylist_beats_national_total() {
        let c = ledger();
        let got = c.classify("TOTAL NASIONAL (dalam jutaan rupiah)", &RegionContext::new(), false);
        assert_eq!(got.role, LineRole::Noise);
    }

    #[test]
    fn denylist_respects_word_boundaries() {
        // "KURNIA" must not trip the standalone "KUR" label, and containment
        // entries only match whole words.
        let c = ledger();
        let got = c.classify("3 Kurnia Posisiku 1 2", &in_region("Jakarta I"), false);
        assert!(matches!(got.role, LineRole::LeafCandidate { .. }));
    }

    #[test]
    fn national_total_strips_label() {
        let c = ledger();
        let got = c.classify("TOTAL NASIONAL 1.234 3,21 2.000 2,42 3.234 4,39", &RegionContext::new(), false);
        assert_eq!(got.role, LineRole::NationalTotal);
        assert_eq!(got.numbers, vec![1234.0, 3.21, 2000.0, 2.42, 3234.0, 4.39]);
    }

    #[test]
    fn region_total_excludes_digits_in_region_name() {
        let c = ledger();
        let got = c.classify("TOTAL KANWIL SUMATERA 1 500 2,5", &RegionContext::new(), false);
        assert_eq!(got.role, LineRole::RegionTotal { region: "Sumatera 1".into() });
        assert_eq!(got.numbers, vec![500.0, 2.5]);
    }

    #[test]
    fn region_total_prefers_longest_region() {
        let c = ledger();
        let got = c.classify("Kanwil Jakarta II 10", &RegionContext::new(), false);
        assert_eq!(got.role, LineRole::RegionTotal { region: "Jakarta II".into() });
    }

    #[test]
    fn region_total_without_known_region_is_noise() {
        let c = ledger();
        let got = c.classify("TOTAL KANWIL ATLANTIS 100 2,0", &RegionContext::new(), true);
        assert_eq!(got.role, LineRole::Noise);
    }

    #[test]
    fn national_beats_region_total() {
        let config = ExtractConfig {
            markers: crate::config::MarkerConfig {
                national_total: vec!["TOTAL".into()],
                region_total: vec!["TOTAL KANWIL".into()],
                month_total: vec!["JUMLAH".into()],
            },
            ..ExtractConfig::with_regions(REGIONS)
        };
        let c = LedgerClassifier::new(&config);
        let got = c.classify("TOTAL KANWIL JAKARTA I 1 2", &RegionContext::new(), false);
        assert_eq!(got.role, LineRole::NationalTotal);
    }

    #[test]
    fn leaf_takes_region_from_context() {
        let c = ledger();
        let got = c.classify("1 Kelapa Gading Square 18.512 10,40", &in_region("Jakarta I"), false);
        assert_eq!(
            got.role,
            LineRole::LeafCandidate {
                index: 1,
                name: "Kelapa Gading Square".into(),
                region: Some("Jakarta I".into()),
            }
        );
        assert_eq!(got.numbers, vec![1.0, 18512.0, 10.40]);
    }

    #[test]
    fn leaf_name_stops_at_region_on_line() {
        let c = ledger();
        let got = c.classify("4. Medan Sumatera 1 9.876 12,45", &in_region("Jakarta I"), false);
        assert_eq!(
            got.role,
            LineRole::LeafCandidate { index: 4, name: "Medan".into(), region: Some("Sumatera 1".into()) }
        );
        assert_eq!(got.numbers, vec![4.0, 9876.0, 12.45]);
    }

    #[test]
    fn leaf_without_context_has_no_region() {
        let c = ledger();
        let got = c.classify("2 Bogor 1 2 3", &RegionContext::new(), false);
        assert!(matches!(got.role, LineRole::LeafCandidate { region: None, .. }));
    }

    #[test]
    fn leaf_index_bounds() {
        let c = ledger();
        let ctx = in_region("Jakarta I");
        assert!(matches!(c.classify("50 Bogor 1", &ctx, false).role, LineRole::LeafCandidate { index: 50, .. }));
        assert_eq!(c.classify("51 Bogor 1", &ctx, false).role, LineRole::Noise);
        assert_eq!(c.classify("0 Bogor 1", &ctx, false).role, LineRole::Noise);
    }

    #[test]
    fn index_over_bound_in_open_row_is_continuation() {
        let c = ledger();
        let got = c.classify("51 2.345 6,7 8", &in_region("Jakarta I"), true);
        assert_eq!(got.role, LineRole::Continuation);
        assert_eq!(got.numbers, vec![51.0, 2345.0, 6.7, 8.0]);
    }

    #[test]
    fn index_followed_by_numbers_is_not_leaf() {
        let c = ledger();
        assert_eq!(c.classify("3 1.234 5,6", &in_region("Jakarta I"), false).role, LineRole::Noise);
        assert_eq!(c.classify("3 1.234 5,6", &in_region("Jakarta I"), true).role, LineRole::Continuation);
    }

    #[test]
    fn continuation_needs_open_row_and_numeric_majority() {
        let c = ledger();
        let ctx = in_region("Jakarta I");
        assert_eq!(c.classify("Square 18.512 10,40", &ctx, true).role, LineRole::Continuation);
        assert_eq!(c.classify("Square 18.512 10,40", &ctx, false).role, LineRole::Noise);
        assert_eq!(c.classify("Catatan: data sementara 1", &ctx, true).role, LineRole::Noise);
    }

    #[test]
    fn only_region_totals_move_the_context() {
        let c = ledger();
        let mut ctx = RegionContext::new();
        ctx.observe(&c.classify("Wilayah Jateng DIY", &ctx, false));
        assert_eq!(ctx.current(), None);

        ctx.observe(&c.classify("TOTAL KANWIL JAKARTA I 1 2", &ctx, false));
        ctx.observe(&c.classify("Catatan Jakarta II", &ctx, false));
        ctx.observe(&c.classify("4. Medan Sumatera 1 9.876 12,45", &ctx, false));
        assert_eq!(ctx.current(), Some("Jakarta I"));
    }

    #[test]
    fn continuation_keeps_leading_words() {
        let c = ledger();
        let ctx = in_region("Jakarta I");
        let got = c.classify("Square 18.512 10,40", &ctx, true);
        assert_eq!(got.label.as_deref(), Some("Square"));
        assert_eq!(got.numbers, vec![18512.0, 10.40]);
        assert_eq!(c.classify("   10,40 10.182", &ctx, true).label, None);
    }

    #[test]
    fn extra_noise_from_config() {
        let mut config = ExtractConfig::with_regions(REGIONS);
        config.noise.contains.push("Data Sementara".into());
        let c = LedgerClassifier::new(&config);
        assert_eq!(c.classify("1 Data Sementara 12", &in_region("Jakarta I"), false).role, LineRole::Noise);
    }

    #[test]
    fn daily_rows() {
        let c = daily();
        let ctx = RegionContext::new();
        let got = c.classify("5 5.021 6.000 4.700", &ctx, false);
        assert_eq!(got.role, LineRole::DailyRow { day: 5 });
        assert_eq!(got.numbers, vec![5021.0, 6000.0, 4700.0]);

        assert_eq!(c.classify("05/01/2026 1 2", &ctx, false).role, LineRole::DailyRow { day: 5 });
        assert_eq!(c.classify("31. 1", &ctx, false).role, LineRole::DailyRow { day: 31 });
        assert_eq!(c.classify("32 1 2", &ctx, false).role, LineRole::Noise);
    }

    #[test]
    fn indented_figure_in_open_row_is_not_a_day() {
        let c = daily();
        let ctx = RegionContext::new();
        let got = c.classify("    12 5 3 0 0 0 20", &ctx, true);
        assert_eq!(got.role, LineRole::Continuation);
        assert_eq!(got.numbers, vec![12.0, 5.0, 3.0, 0.0, 0.0, 0.0, 20.0]);

        assert_eq!(c.classify("12 5 3 0 0 0 20", &ctx, true).role, LineRole::DailyRow { day: 12 });
        assert_eq!(c.classify("    12 5 3 0 0 0 20", &ctx, false).role, LineRole::DailyRow { day: 12 });
    }

    #[test]
    fn daily_total_and_noise() {
        let c = daily();
        let ctx = RegionContext::new();
        let got = c.classify("TOTAL 152.742 1.052.306 115.769", &ctx, false);
        assert_eq!(got.role, LineRole::MonthTotal);
        assert_eq!(got.numbers, vec![152742.0, 1052306.0, 115769.0]);
        assert_eq!(c.classify("Tanggal", &ctx, false).role, LineRole::Noise);
        assert_eq!(c.classify("SME Swadana", &ctx, false).role, LineRole::Noise);
    }

    #[test]
    fn row_widths() {
        assert_eq!(ledger().row_width(&LineRole::NationalTotal), 12);
        assert_eq!(
            ledger().row_width(&LineRole::LeafCandidate { index: 1, name: "X".into(), region: None }),
            13
        );
        assert_eq!(daily().row_width(&LineRole::DailyRow { day: 3 }), 21);
    }

    #[test]
    fn starts_row_roles() {
        assert!(LineRole::NationalTotal.starts_row());
        assert!(LineRole::DailyRow { day: 1 }.starts_row());
        assert!(!LineRole::Continuation.starts_row());
        assert!(!LineRole::Noise.starts_row());
    }

    #[test]
    fn row_index_forms() {
        assert_eq!(parse_row_index("7"), Some(7));
        assert_eq!(parse_row_index("7."), Some(7));
        assert_eq!(parse_row_index("7)"), Some(7));
        assert_eq!(parse_row_index("7.5"), None);
        assert_eq!(parse_row_index("."), None);
    }
}
