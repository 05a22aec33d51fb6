//! Line classification: decide what shape a single extracted line has.
//!
//! Both the reflow and fencing passes need to know whether a line is a page
//! boundary, a bare amount, the start of a ledger entry or plain text. The
//! answers are pure functions over `&str` and work on raw and merged lines
//! alike.
//!
//! ## Priority
//!
//! ```text
//! PageMarker  >  MoneyOnly  >  AccountingEntryStart  >  Prose
//! ```
//!
//! The classifier is total: every string, including `""`, maps to exactly
//! one [`LineKind`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Shape of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Structural page boundary, e.g. `--- [第 3 页] ---`.
    PageMarker,
    /// Nothing but an amount, e.g. `100,000.00`.
    MoneyOnly,
    /// A debit/credit line, e.g. `借：银行存款`.
    AccountingEntryStart,
    /// Anything else.
    Prose,
}

/// Ledger keywords that open an entry: debit and credit.
const ENTRY_KEYWORDS: [char; 2] = ['借', '贷'];

/// Marks that end a sentence, ASCII and full-width.
const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

static RE_PAGE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--- \[第 ([0-9]+) 页\] ---$").unwrap());

/// Classify a line. See the module docs for the priority order.
pub fn classify(line: &str) -> LineKind {
    if is_page_marker(line) {
        LineKind::PageMarker
    } else if is_money_only(line) {
        LineKind::MoneyOnly
    } else if starts_accounting_entry(line) {
        LineKind::AccountingEntryStart
    } else {
        LineKind::Prose
    }
}

/// Render the page-boundary line for a 1-based page number.
///
/// Downstream tooling greps for this literal; do not change its shape.
pub fn page_marker(page_num: usize) -> String {
    format!("--- [第 {} 页] ---", page_num)
}

/// Parse the 1-based page number back out of a page-marker line.
pub fn page_marker_number(line: &str) -> Option<usize> {
    RE_PAGE_MARKER
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// `true` when `text` ends with a sentence terminator.
///
/// Applied to the merge buffer, not to individual lines.
pub fn is_sentence_terminated(text: &str) -> bool {
    text.ends_with(SENTENCE_TERMINATORS)
}

/// `true` when the line opens a ledger entry.
pub fn is_accounting_start(text: &str) -> bool {
    classify(text) == LineKind::AccountingEntryStart
}

fn is_page_marker(line: &str) -> bool {
    RE_PAGE_MARKER.is_match(line)
}

fn is_money_only(line: &str) -> bool {
    let mut digits = line
        .chars()
        .filter(|c| !matches!(c, ' ' | ',' | '.'))
        .peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

fn starts_accounting_entry(line: &str) -> bool {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(keyword), Some(sep)) => {
            ENTRY_KEYWORDS.contains(&keyword)
                && (sep == ':' || sep == '：' || sep.is_whitespace())
        }
        _ => false,
    }
}
