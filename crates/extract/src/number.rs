//! Number token normalization.
//!
//! Report text mixes Indonesian (`1.234,56`) and plain (`1,234.56`) number
//! conventions, uses `(1.234)` for negatives and a lone dash for empty cells.
//! Every whitespace-delimited token is resolved by exactly one rule:
//!
//! | Token              | Rule            | Value      |
//! |--------------------|-----------------|------------|
//! | `-`, `–`, `—`      | `DashZero`      | `0`        |
//! | `(1.234)`          | `ParenNegative` | `-1234`    |
//! | anything else      | `Plain`         | parsed     |
//!
//! Unparseable tokens resolve to `None`, never to zero. Callers drop them so
//! a stray word cannot shift the positional columns of a ledger row.

use serde::Deserialize;

/// How a token with a single separator followed by exactly three digits
/// (`1.234`, `0,785`) is read. The reports are inconsistent about this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// `1.234` is one thousand two hundred thirty-four.
    #[default]
    Thousands,
    /// `1.234` is one point two three four.
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    Plain,
    DashZero,
    ParenNegative,
}

/// A single lexical unit from extracted text and its resolved value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericToken<'a> {
    pub raw: &'a str,
    pub value: Option<f64>,
    pub rule: TokenRule,
}

impl<'a> NumericToken<'a> {
    pub fn parse(raw: &'a str, policy: GroupingPolicy) -> Self {
        let t = raw.trim();

        if is_dash(t) {
            return Self { raw, value: Some(0.0), rule: TokenRule::DashZero };
        }

        if let Some(inner) = t.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            let value = parse_magnitude(inner.trim(), policy).map(|v| -v);
            return Self { raw, value, rule: TokenRule::ParenNegative };
        }

        let (negative, body) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t),
        };
        let value = parse_magnitude(body, policy).map(|v| if negative && v != 0.0 { -v } else { v });
        Self { raw, value, rule: TokenRule::Plain }
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_some_and(|v| v < 0.0)
    }
}

/// Resolve a single token to a number, or `None` when it is not one.
pub fn normalize(token: &str, policy: GroupingPolicy) -> Option<f64> {
    NumericToken::parse(token, policy).value
}

/// True when the token resolves to a number under `policy`.
pub fn is_number(token: &str, policy: GroupingPolicy) -> bool {
    normalize(token, policy).is_some()
}

/// All resolvable numbers among `tokens`, in order. Unparseable tokens are
/// dropped, not zeroed.
pub fn numbers_in<'a, I>(tokens: I, policy: GroupingPolicy) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter_map(|t| normalize(t, policy))
        .collect()
}

/// Characters that make up numeric cells: digits plus separators, sign
/// markers and the percent suffix.
pub fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '(' | ')' | '-' | '%' | '–' | '—')
}

fn is_dash(t: &str) -> bool {
    matches!(t, "-" | "–" | "—")
}

fn parse_magnitude(s: &str, policy: GroupingPolicy) -> Option<f64> {
    let s = s.strip_suffix('%').unwrap_or(s);
    if !s.chars().any(|c| c.is_ascii_digit())
        || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let canonical = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) => {
            // Rightmost separator is the decimal point, whichever char it is.
            let decimal_at = dot.max(comma);
            s.char_indices()
                .filter_map(|(i, c)| match c {
                    '.' | ',' if i == decimal_at => Some('.'),
                    '.' | ',' => None,
                    d => Some(d),
                })
                .collect()
        }
        (Some(_), None) => resolve_single_separator(s, '.', policy),
        (None, Some(_)) => resolve_single_separator(s, ',', policy),
        (None, None) => s.to_string(),
    };

    let value: f64 = canonical.parse().ok()?;
    value.is_finite().then_some(value)
}

fn resolve_single_separator(s: &str, sep: char, policy: GroupingPolicy) -> String {
    let grouped = if s.matches(sep).count() > 1 {
        true
    } else {
        let three_trailing = s.split_once(sep).is_some_and(|(_, frac)| frac.len() == 3);
        three_trailing && policy == GroupingPolicy::Thousands
    };

    if grouped {
        s.replace(sep, "")
    } else {
        s.replace(sep, ".")
    }
}
