// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout — split text into logical lines, hard-wrap them at a fixed
// character width and fill fixed-height pages top to bottom.
//
// Wrapping counts Unicode scalar values, not bytes, and never looks for word
// boundaries: source code is rendered monospaced and an arbitrary break is
// acceptable there.

use pagewright_core::types::{LayoutConfig, Page};
use tracing::{debug, instrument};

/// Lays raw text out onto pages according to a [`LayoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct PageLayoutEngine {
    config: LayoutConfig,
}

impl PageLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay `text` out onto pages.
    ///
    /// Always returns at least one page; empty input yields a single page
    /// with no lines. Blank logical lines are kept as empty lines.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn layout(&self, text: &str) -> Vec<Page> {
        let max_lines = self.config.max_lines_per_page.max(1);
        let width = self.config.wrap_width.max(1);
        let indent = self.config.leading_indent.as_deref().unwrap_or("");

        let mut pages = vec![Page::new(0)];
        let mut logical_lines = 0usize;
        let mut wrapped_lines = 0usize;

        for line in text.lines() {
            logical_lines += 1;
            for chunk in hard_wrap(line, width) {
                let full = pages.last().is_some_and(|page| page.lines.len() >= max_lines);
                if full {
                    pages.push(Page::new(pages.len()));
                }
                if let Some(page) = pages.last_mut() {
                    let mut rendered = String::with_capacity(indent.len() + chunk.len());
                    rendered.push_str(indent);
                    rendered.push_str(chunk);
                    page.lines.push(rendered);
                }
                wrapped_lines += 1;
            }
        }

        debug!(
            logical_lines,
            wrapped_lines,
            pages = pages.len(),
            "Text layout complete"
        );
        pages
    }
}

/// Split `line` into consecutive chunks of at most `width` characters.
///
/// An empty line yields one empty chunk so that it still occupies a slot.
pub fn hard_wrap(line: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in line.char_indices() {
        if count == width {
            chunks.push(&line[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&line[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(max_lines: usize, width: usize, indent: Option<&str>) -> PageLayoutEngine {
        PageLayoutEngine::new(LayoutConfig {
            max_lines_per_page: max_lines,
            wrap_width: width,
            leading_indent: indent.map(str::to_string),
        })
    }

    fn all_lines(pages: &[Page]) -> Vec<&str> {
        pages
            .iter()
            .flat_map(|page| page.lines.iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn empty_input_yields_one_empty_page() {
        let pages = engine(10, 80, None).layout("");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 0);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn long_line_wraps_into_fixed_chunks() {
        let line: String = (0..500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let pages = engine(100, 80, None).layout(&line);
        let lines = all_lines(&pages);

        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|l| l.chars().count() <= 80));
        assert_eq!(lines[6].chars().count(), 20);
        assert_eq!(lines.concat(), line);
    }

    #[test]
    fn line_of_exactly_wrap_width_is_not_split() {
        let line = "x".repeat(80);
        let pages = engine(10, 80, None).layout(&line);
        assert_eq!(all_lines(&pages), vec![line.as_str()]);
    }

    #[test]
    fn wrapping_counts_characters_not_bytes() {
        let line = "é".repeat(10);
        let chunks = hard_wrap(&line, 4);
        assert_eq!(chunks, vec!["éééé", "éééé", "éé"]);
    }

    #[test]
    fn blank_lines_keep_their_slot() {
        let pages = engine(10, 80, None).layout("first\n\n\nlast\n");
        assert_eq!(all_lines(&pages), vec!["first", "", "", "last"]);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let pages = engine(10, 80, None).layout("one\r\ntwo\r\n");
        assert_eq!(all_lines(&pages), vec!["one", "two"]);
    }

    #[test]
    fn pages_break_at_max_lines() {
        let text: Vec<String> = (0..25).map(|i| format!("line {i}")).collect();
        let pages = engine(10, 80, None).layout(&text.join("\n"));

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines.len(), 10);
        assert_eq!(pages[1].lines.len(), 10);
        assert_eq!(pages[2].lines.len(), 5);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
        }
        assert_eq!(pages[1].lines[0], "line 10");
    }

    #[test]
    fn exact_fill_does_not_open_a_trailing_page() {
        let text = vec!["x"; 20].join("\n");
        let pages = engine(10, 80, None).layout(&text);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn wrapped_chunks_continue_on_the_next_page() {
        let pages = engine(2, 3, None).layout("abcdefgh");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["abc", "def"]);
        assert_eq!(pages[1].lines, vec!["gh"]);
    }

    #[test]
    fn indent_prefixes_every_line() {
        let pages = engine(10, 4, Some("   ")).layout("abcdef\n\nxy");
        let lines = all_lines(&pages);
        assert_eq!(lines, vec!["   abcd", "   ef", "   ", "   xy"]);

        let rebuilt: String = lines.iter().map(|l| &l[3..]).collect();
        assert_eq!(rebuilt, "abcdefxy");
    }

    #[test]
    fn characters_survive_in_order() {
        let text = "fn main() {\n\tprintln!(\"héllo, wörld\");\n}\n\u{0}\u{7f} ctrl";
        let pages = engine(3, 7, None).layout(text);
        let rebuilt: String = all_lines(&pages).concat();
        let expected: String = text.lines().collect();
        assert_eq!(rebuilt, expected);
    }
}
