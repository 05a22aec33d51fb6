//! Merge pass: rebuild logical lines that the page layout split apart.
//!
//! PDF text comes out one *physical* line at a time. A sentence that wrapped
//! at the right margin arrives as two lines; an amount printed in a right-hand
//! column arrives on its own line below the entry it belongs to. This pass
//! folds those pieces back together with a single accumulator, scanning the
//! lines of a whole document in order.
//!
//! ## Rules (first match wins)
//!
//! 1. Page marker — flush the buffer, emit the marker on its own.
//! 2. Empty buffer (nothing held, or only empty text) — the line replaces it.
//! 3. Amount — appended to the buffer with `\t`, whatever the buffer holds.
//! 4. Buffer not sentence-terminated:
//!    - buffer is a ledger entry → flush it, the line starts a new buffer;
//!    - otherwise → appended with a single space.
//! 5. Buffer sentence-terminated — flush it, the line starts a new buffer.
//!
//! The leftover buffer is flushed at the end. A buffer holding empty text is
//! never emitted; it is carried until a real line replaces it, and trailing
//! empty lines produce nothing. The pass never fails and never reorders:
//! every other input line lands in exactly one [`MergedLine`].

use super::classify::{classify, is_accounting_start, is_sentence_terminated, LineKind};

/// Separator used when an amount joins the entry above it.
pub const MONEY_SEPARATOR: char = '\t';

/// Separator used when a wrapped line joins the previous one.
pub const WRAP_SEPARATOR: char = ' ';

/// One line of extracted text together with the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Whitespace-normalised text.
    pub text: String,
    /// 1-based page number.
    pub page: usize,
}

impl RawLine {
    pub fn new(text: impl Into<String>, page: usize) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }
}

/// A logical line produced by the merge pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLine {
    pub text: String,
    /// Set only for page-boundary lines, which are never merged.
    pub page_marker: bool,
    /// Number of raw lines folded into this one.
    pub parts: usize,
}

impl MergedLine {
    fn marker(text: String) -> Self {
        Self {
            text,
            page_marker: true,
            parts: 1,
        }
    }

    /// Shape of the merged text, for the fencing pass.
    pub fn kind(&self) -> LineKind {
        if self.page_marker {
            LineKind::PageMarker
        } else {
            classify(&self.text)
        }
    }
}

/// State of the merge pass between two lines.
#[derive(Debug, Default)]
pub struct ReflowEngine {
    buffer: Option<MergedLine>,
}

impl ReflowEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, pushing any completed lines onto `out`.
    pub fn step(&mut self, line: &str, out: &mut Vec<MergedLine>) {
        if classify(line) == LineKind::PageMarker {
            self.flush(out);
            out.push(MergedLine::marker(line.to_string()));
            return;
        }

        let Some(buffer) = self.buffer.as_mut().filter(|b| !b.text.is_empty()) else {
            self.start(line);
            return;
        };

        if classify(line) == LineKind::MoneyOnly {
            append(buffer, MONEY_SEPARATOR, line);
        } else if !is_sentence_terminated(&buffer.text) {
            if is_accounting_start(&buffer.text) {
                self.flush(out);
                self.start(line);
            } else {
                append(buffer, WRAP_SEPARATOR, line);
            }
        } else {
            self.flush(out);
            self.start(line);
        }
    }

    /// Flush whatever is left in the buffer.
    pub fn finish(mut self, out: &mut Vec<MergedLine>) {
        self.flush(out);
    }

    /// Replace the buffer with `line`, keeping the count of any empty lines
    /// it was holding.
    fn start(&mut self, line: &str) {
        let carried = self.buffer.take().map_or(0, |b| b.parts);
        self.buffer = Some(MergedLine {
            text: line.to_string(),
            page_marker: false,
            parts: carried + 1,
        });
    }

    /// Emit the buffer unless its text is empty.
    fn flush(&mut self, out: &mut Vec<MergedLine>) {
        if self.buffer.as_ref().is_some_and(|b| !b.text.is_empty()) {
            out.extend(self.buffer.take());
        }
    }
}

fn append(buffer: &mut MergedLine, sep: char, line: &str) {
    buffer.text.push(sep);
    buffer.text.push_str(line);
    buffer.parts += 1;
}

/// Run the merge pass over a whole document.
pub fn reflow<S: AsRef<str>>(lines: &[S]) -> Vec<MergedLine> {
    let mut out = Vec::with_capacity(lines.len());
    let mut engine = ReflowEngine::new();
    for line in lines {
        engine.step(line.as_ref(), &mut out);
    }
    engine.finish(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(merged: &[MergedLine]) -> Vec<&str> {
        merged.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_money_merges_into_entry() {
        let out = reflow(&["贷：应收账款", "50,000.00"]);
        assert_eq!(texts(&out), vec!["贷：应收账款\t50,000.00"]);
        assert_eq!(out[0].parts, 2);
    }

    #[test]
    fn test_money_merges_after_terminated_sentence() {
        // Amounts attach greedily, even to a finished sentence.
        let out = reflow(&["本月收到货款。", "3,000"]);
        assert_eq!(texts(&out), vec!["本月收到货款。\t3,000"]);
    }

    #[test]
    fn test_sentence_split() {
        let out = reflow(&["这是一句话。", "这是下一句话。"]);
        assert_eq!(texts(&out), vec!["这是一句话。", "这是下一句话。"]);
    }

    #[test]
    fn test_wrapped_line_joined_with_space() {
        let out = reflow(&["企业应当按照规定", "设置会计账簿。", "下一段"]);
        assert_eq!(texts(&out), vec!["企业应当按照规定 设置会计账簿。", "下一段"]);
    }

    #[test]
    fn test_entry_does_not_absorb_prose() {
        let out = reflow(&["借：银行存款", "100,000.00", "贷：实收资本", "100,000.00"]);
        assert_eq!(
            texts(&out),
            vec!["借：银行存款\t100,000.00", "贷：实收资本\t100,000.00"]
        );
    }

    #[test]
    fn test_page_marker_isolated() {
        let out = reflow(&["第一页内容", "--- [第 2 页] ---", "第二页内容"]);
        assert_eq!(
            texts(&out),
            vec!["第一页内容", "--- [第 2 页] ---", "第二页内容"]
        );
        assert!(!out[0].page_marker);
        assert!(out[1].page_marker);
        assert_eq!(out[1].kind(), LineKind::PageMarker);
        assert!(!out[2].page_marker);
    }

    #[test]
    fn test_money_after_marker_starts_new_buffer() {
        let out = reflow(&["借：银行存款", "--- [第 2 页] ---", "100.00"]);
        assert_eq!(
            texts(&out),
            vec!["借：银行存款", "--- [第 2 页] ---", "100.00"]
        );
    }

    #[test]
    fn test_line_conservation() {
        let input = [
            "--- [第 1 页] ---",
            "借：银行存款",
            "100,000.00",
            "以上为示例",
            "分录说明。",
            "--- [第 2 页] ---",
            "",
            "尾部说明。",
            "1.00",
        ];
        let out = reflow(&input);
        let consumed: usize = out.iter().map(|m| m.parts).sum();
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn test_leading_empty_line_does_not_hide_entry() {
        let out = reflow(&["", "借：银行存款", "100.00"]);
        assert_eq!(texts(&out), vec!["借：银行存款\t100.00"]);
        assert_eq!(out[0].kind(), LineKind::AccountingEntryStart);
        assert_eq!(out[0].parts, 3);
    }

    #[test]
    fn test_empty_line_after_sentence() {
        let out = reflow(&["说明。", "", "", "借：银行存款"]);
        assert_eq!(texts(&out), vec!["说明。", "借：银行存款"]);
        assert_eq!(out[1].parts, 3);
    }

    #[test]
    fn test_empty_buffer_not_flushed() {
        let out = reflow(&["结束。", "", "--- [第 2 页] ---", "", "正文"]);
        assert_eq!(texts(&out), vec!["结束。", "--- [第 2 页] ---", "正文"]);
        assert_eq!(out[2].parts, 3);

        let trailing = reflow(&["正文。", ""]);
        assert_eq!(texts(&trailing), vec!["正文。"]);
        assert!(reflow(&["", ""]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let out = reflow::<&str>(&[]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_step_by_step() {
        let mut engine = ReflowEngine::new();
        let mut out = Vec::new();
        engine.step("借：库存现金", &mut out);
        assert!(out.is_empty());
        engine.step("500", &mut out);
        assert!(out.is_empty());
        engine.step("--- [第 4 页] ---", &mut out);
        assert_eq!(texts(&out), vec!["借：库存现金\t500", "--- [第 4 页] ---"]);
        engine.finish(&mut out);
        assert_eq!(out.len(), 2);
    }
}
