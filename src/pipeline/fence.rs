//! Annotation pass: fence runs of ledger entries and frame page markers.
//!
//! Walks the merged lines once, tracking only whether it is currently inside
//! an accounting block. An entry line opens a block; a page marker always
//! closes one; a prose line inside a block either stays (short lines and
//! lines with a continuation marker) or closes it. There is no lookahead.
//!
//! The continuation test is a fixed heuristic on the merged line's length in
//! characters and two marker strings. A short unrelated line will stay inside
//! a block; that is accepted behaviour.

use super::classify::LineKind;
use super::reflow::MergedLine;

/// Opening fence line.
pub const FENCE_OPEN: &str = "```text";

/// Closing fence line.
pub const FENCE_CLOSE: &str = "```";

/// Prose shorter than this (in chars) continues an open block.
pub const SHORT_LINE_CHARS: usize = 10;

/// Substrings that keep a prose line inside an open block.
pub const CONTINUATION_MARKERS: [&str; 2] = ["——", "科目"];

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Merged text, emitted as-is.
    Line(String),
    /// Page-boundary line.
    PageMarker(String),
    /// Empty separator line.
    Blank,
    FenceOpen,
    FenceClose,
}

impl Fragment {
    pub fn as_str(&self) -> &str {
        match self {
            Fragment::Line(s) | Fragment::PageMarker(s) => s,
            Fragment::Blank => "",
            Fragment::FenceOpen => FENCE_OPEN,
            Fragment::FenceClose => FENCE_CLOSE,
        }
    }
}

/// State of the fencing pass.
#[derive(Debug, Default)]
pub struct BlockFencer {
    inside_block: bool,
}

impl BlockFencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inside_block(&self) -> bool {
        self.inside_block
    }

    /// Feed one merged line, pushing its fragments onto `out`.
    pub fn step(&mut self, line: &MergedLine, out: &mut Vec<Fragment>) {
        match line.kind() {
            LineKind::PageMarker => {
                self.close(out);
                out.push(Fragment::Blank);
                out.push(Fragment::PageMarker(line.text.clone()));
                out.push(Fragment::Blank);
            }
            LineKind::AccountingEntryStart => {
                if !self.inside_block {
                    out.push(Fragment::Blank);
                    out.push(Fragment::FenceOpen);
                    self.inside_block = true;
                }
                out.push(Fragment::Line(line.text.clone()));
            }
            _ => {
                if self.inside_block && !continues_block(&line.text) {
                    self.close(out);
                }
                out.push(Fragment::Line(line.text.clone()));
            }
        }
    }

    /// Close a block left open at the end of input.
    pub fn finish(mut self, out: &mut Vec<Fragment>) {
        self.close(out);
    }

    fn close(&mut self, out: &mut Vec<Fragment>) {
        if self.inside_block {
            out.push(Fragment::FenceClose);
            self.inside_block = false;
        }
    }
}

fn continues_block(text: &str) -> bool {
    text.chars().count() < SHORT_LINE_CHARS
        || CONTINUATION_MARKERS.iter().any(|m| text.contains(m))
}

/// Run the fencing pass over a whole document.
pub fn fence(lines: &[MergedLine]) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(lines.len() + lines.len() / 2);
    let mut fencer = BlockFencer::new();
    for line in lines {
        fencer.step(line, &mut out);
    }
    fencer.finish(&mut out);
    out
}

/// Join fragments into the final document text.
pub fn render(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(Fragment::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::reflow::reflow;

    fn fenced(lines: &[&str]) -> Vec<Fragment> {
        fence(&reflow(lines))
    }

    fn line(s: &str) -> Fragment {
        Fragment::Line(s.to_string())
    }

    fn balance(fragments: &[Fragment]) -> (usize, usize) {
        let opens = fragments.iter().filter(|f| **f == Fragment::FenceOpen).count();
        let closes = fragments.iter().filter(|f| **f == Fragment::FenceClose).count();
        (opens, closes)
    }

    #[test]
    fn test_entry_opens_block_and_end_closes_it() {
        let out = fenced(&["借：银行存款", "100.00"]);
        assert_eq!(
            out,
            vec![
                Fragment::Blank,
                Fragment::FenceOpen,
                line("借：银行存款\t100.00"),
                Fragment::FenceClose,
            ]
        );
    }

    #[test]
    fn test_entry_after_empty_line_is_fenced() {
        let out = fenced(&["说明。", "", "借：银行存款", "100.00"]);
        assert_eq!(
            out,
            vec![
                line("说明。"),
                Fragment::Blank,
                Fragment::FenceOpen,
                line("借：银行存款\t100.00"),
                Fragment::FenceClose,
            ]
        );
    }

    #[test]
    fn test_consecutive_entries_share_block() {
        let out = fenced(&["借：银行存款", "100.00", "贷：实收资本", "100.00"]);
        assert_eq!(balance(&out), (1, 1));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_short_prose_stays_inside() {
        let out = fenced(&["借：银行存款", "100.00", "附件2张"]);
        assert_eq!(
            out,
            vec![
                Fragment::Blank,
                Fragment::FenceOpen,
                line("借：银行存款\t100.00"),
                line("附件2张"),
                Fragment::FenceClose,
            ]
        );
    }

    #[test]
    fn test_continuation_markers_stay_inside() {
        let out = fenced(&[
            "借：应收账款",
            "应收账款——甲公司往来款项明细",
            "涉及的会计科目包括以下几个主要项目",
        ]);
        assert_eq!(out.last(), Some(&Fragment::FenceClose));
        assert_eq!(balance(&out), (1, 1));
    }

    #[test]
    fn test_long_prose_closes_block() {
        let out = fenced(&["借：银行存款", "100,000.00", "以上为示例分录说明文字内容。"]);
        assert_eq!(
            out,
            vec![
                Fragment::Blank,
                Fragment::FenceOpen,
                line("借：银行存款\t100,000.00"),
                Fragment::FenceClose,
                line("以上为示例分录说明文字内容。"),
            ]
        );
    }

    #[test]
    fn test_page_marker_closes_block() {
        let out = fenced(&["借：银行存款", "--- [第 2 页] ---", "贷：实收资本"]);
        assert_eq!(
            out,
            vec![
                Fragment::Blank,
                Fragment::FenceOpen,
                line("借：银行存款"),
                Fragment::FenceClose,
                Fragment::Blank,
                Fragment::PageMarker("--- [第 2 页] ---".into()),
                Fragment::Blank,
                Fragment::Blank,
                Fragment::FenceOpen,
                line("贷：实收资本"),
                Fragment::FenceClose,
            ]
        );
    }

    #[test]
    fn test_prose_outside_block_untouched() {
        let out = fenced(&["普通说明文字。", "短句。"]);
        assert_eq!(out, vec![line("普通说明文字。"), line("短句。")]);
    }

    #[test]
    fn test_fence_balance_on_mixed_input() {
        let inputs: [&[&str]; 4] = [
            &[],
            &["借：a", "--- [第 2 页] ---"],
            &["借：a", "1", "这是一段很长的说明文字，用来结束分录块。", "贷：b"],
            &["--- [第 1 页] ---", "贷 b", "2", "短", "--- [第 2 页] ---", "借:c"],
        ];
        for input in inputs {
            let (opens, closes) = balance(&fenced(input));
            assert_eq!(opens, closes, "unbalanced for {input:?}");
        }
    }

    #[test]
    fn test_render_joins_with_newlines() {
        let text = render(&[
            Fragment::Blank,
            Fragment::PageMarker("--- [第 1 页] ---".into()),
            Fragment::Blank,
            Fragment::FenceOpen,
            line("借：现金"),
            Fragment::FenceClose,
        ]);
        assert_eq!(text, "\n--- [第 1 页] ---\n\n```text\n借：现金\n```");
    }

    #[test]
    fn test_empty_input_renders_empty() {
        assert_eq!(render(&fence(&[])), "");
    }
}
