//! Row number collection across wrapped lines.
//!
//! PDF text extraction reflows one logical table row over several physical
//! lines. The collector starts at a row's first line and keeps absorbing
//! `Continuation` lines until it has enough numbers, the next row starts,
//! a noise line appears, or the lookahead cap is reached.

use log::debug;

use crate::classify::{Classify, LineRole, RegionContext};

/// Numbers gathered for one logical row.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected {
    pub numbers: Vec<f64>,
    /// Physical lines consumed, including the first one.
    pub lines_consumed: usize,
    /// Rest of a branch name that wrapped onto the next line.
    pub name_tail: Option<String>,
}

/// A classified row with its collected numbers, ready for a table builder.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalRow {
    pub role: LineRole,
    pub numbers: Vec<f64>,
    /// 1-based line (or sheet row) the row started on.
    pub line: usize,
}

/// Collect numbers for the row starting at `lines[start]`.
///
/// Returns whatever was found, possibly fewer than `target`; callers check
/// the count before assigning fields by position. `max_lookahead` bounds how
/// many lines after `start` may be absorbed.
pub fn collect<C, S>(
    classifier: &C,
    lines: &[S],
    start: usize,
    target: usize,
    ctx: &RegionContext,
    max_lookahead: usize,
) -> Collected
where
    C: Classify + ?Sized,
    S: AsRef<str>,
{
    let Some(first) = lines.get(start) else {
        return Collected { numbers: Vec::new(), lines_consumed: 0, name_tail: None };
    };

    let head = classifier.classify(first.as_ref(), ctx, false);
    // A leaf line carrying only its index and name may continue the name.
    let name_open = matches!(head.role, LineRole::LeafCandidate { .. }) && head.numbers.len() == 1;
    let mut numbers = head.numbers;
    let mut consumed = 1;
    let mut name_tail = None;

    while numbers.len() < target && consumed <= max_lookahead {
        let Some(next) = lines.get(start + consumed) else { break };
        let line = classifier.classify(next.as_ref(), ctx, true);
        if line.role.starts_row() || line.role == LineRole::Noise {
            break;
        }
        if consumed == 1 && name_open {
            name_tail = line.label;
        }
        numbers.extend(line.numbers);
        consumed += 1;
    }

    Collected { numbers, lines_consumed: consumed, name_tail }
}

/// Walk `lines` and turn every row-starting line into a [`LogicalRow`].
///
/// The region context starts empty and follows region-total rows, so
/// branch rows carry the kanwil they appear under.
pub fn logical_rows<C, S>(classifier: &C, lines: &[S], max_lookahead: usize) -> Vec<LogicalRow>
where
    C: Classify + ?Sized,
    S: AsRef<str>,
{
    let mut ctx = RegionContext::new();
    let mut rows = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let mut line = classifier.classify(lines[i].as_ref(), &ctx, false);
        ctx.observe(&line);

        if !line.role.starts_row() {
            i += 1;
            continue;
        }

        let target = classifier.row_width(&line.role);
        let collected = collect(classifier, lines, i, target, &ctx, max_lookahead);
        if collected.lines_consumed > 1 {
            debug!(
                "line {}: {:?} merged {} lines for {} numbers",
                i + 1,
                line.role,
                collected.lines_consumed,
                collected.numbers.len()
            );
        }

        if let (LineRole::LeafCandidate { name, .. }, Some(tail)) = (&mut line.role, &collected.name_tail) {
            name.push(' ');
            name.push_str(tail);
        }
        rows.push(LogicalRow { role: line.role, numbers: collected.numbers, line: i + 1 });
        i += collected.lines_consumed.max(1);
    }

    rows
}
