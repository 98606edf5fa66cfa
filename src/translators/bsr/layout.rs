//! Line and page layout for the braille score
//!
//! Items are placed on lines of at most `cells_per_line` cells, separated
//! by one blank cell. An item wider than a line gets a line of its own.
//! Lines are grouped into pages of `lines_per_page`, the first line of
//! each page holding the page number when page numbers are on.

use super::cells::{self, BLANK};
use super::kinds::BsrKind;
use crate::settings::BrailleSettings;
use crate::tree::Element;

type BsrElement = Element<BsrKind>;

#[derive(Debug)]
pub struct BrailleLayout {
    cells_per_line: usize,
    lines_per_page: usize,
    page_numbers: bool,
    lines: Vec<BsrElement>,
    current: Vec<BsrElement>,
    current_cells: usize,
}

impl BrailleLayout {
    pub fn new(settings: &BrailleSettings) -> Self {
        BrailleLayout {
            cells_per_line: settings.cells_per_line,
            lines_per_page: settings.lines_per_page,
            page_numbers: settings.page_numbers,
            lines: Vec::new(),
            current: Vec::new(),
            current_cells: 0,
        }
    }

    pub fn cells_per_line(&self) -> usize {
        self.cells_per_line
    }

    pub fn is_line_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Whether an item of `cells` cells still fits on the current line
    pub fn fits(&self, cells: usize) -> bool {
        if self.current.is_empty() {
            return true;
        }
        self.current_cells + 1 + cells <= self.cells_per_line
    }

    /// Append an item to the current line, without any fit check
    pub fn push(&mut self, item: BsrElement, cells: usize) {
        if cells > self.cells_per_line {
            log::warn!(
                "{} cells do not fit on a line of {}, line overflows",
                cells,
                self.cells_per_line
            );
        }
        if !self.current.is_empty() {
            self.current_cells += 1;
        }
        self.current_cells += cells;
        self.current.push(item);
    }

    /// Close the current line, if it holds anything
    pub fn break_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut line = Element::new(BsrKind::Line);
        for item in self.current.drain(..) {
            line.push(item);
        }
        self.lines.push(line);
        self.current_cells = 0;
    }

    /// Lay out braille text on lines of its own, wrapping at blank cells
    pub fn push_text_lines(&mut self, kind: BsrKind, text: &str) {
        self.break_line();
        for line_text in wrap(text, self.cells_per_line) {
            let cells = cells::cell_count(&line_text);
            self.push(Element::leaf(kind, line_text), cells);
            self.break_line();
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len() + usize::from(!self.current.is_empty())
    }

    /// Close the last line and group the lines into pages
    pub fn finish(mut self) -> Vec<BsrElement> {
        self.break_line();
        let per_page = if self.page_numbers {
            self.lines_per_page.saturating_sub(1)
        } else {
            self.lines_per_page
        }
        .max(1);

        let mut pages = Vec::new();
        let mut lines = self.lines.into_iter().peekable();
        let mut number = 1u32;
        while lines.peek().is_some() {
            let mut page = Element::new(BsrKind::Page).with_attribute("number", number);
            if self.page_numbers {
                page.push_leaf(BsrKind::PageNumber, cells::upper_number(number));
            }
            for line in lines.by_ref().take(per_page) {
                page.push(line);
            }
            pages.push(page);
            number += 1;
        }
        pages
    }
}

/// Split braille text at blank cells into chunks of at most `width` cells
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_cells = 0;
    for word in text.split(BLANK).filter(|word| !word.is_empty()) {
        let cells = cells::cell_count(word);
        if current_cells > 0 && current_cells + 1 + cells > width {
            lines.push(std::mem::take(&mut current));
            current_cells = 0;
        }
        if current_cells > 0 {
            current.push(BLANK);
            current_cells += 1;
        }
        current.push_str(word);
        current_cells += cells;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(cells_per_line: usize, lines_per_page: usize, page_numbers: bool) -> BrailleSettings {
        BrailleSettings {
            cells_per_line,
            lines_per_page,
            page_numbers,
            ..Default::default()
        }
    }

    fn item(cells: usize) -> BsrElement {
        Element::leaf(BsrKind::Measure, "⠿".repeat(cells))
    }

    #[test]
    fn test_items_break_at_line_width() {
        let mut layout = BrailleLayout::new(&settings(10, 25, false));
        for _ in 0..3 {
            if !layout.fits(4) {
                layout.break_line();
            }
            layout.push(item(4), 4);
        }
        // 4 + 1 + 4 fits in 10, the third item does not
        let pages = layout.finish();
        assert_eq!(pages.len(), 1);
        let lines: Vec<&BsrElement> = pages[0].children_of(BsrKind::Line).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].children().len(), 2);
    }

    #[test]
    fn test_pages_reserve_a_number_line() {
        let mut layout = BrailleLayout::new(&settings(10, 3, true));
        for _ in 0..5 {
            layout.push(item(8), 8);
            layout.break_line();
        }
        let pages = layout.finish();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].children()[0].kind(), BsrKind::PageNumber);
        assert_eq!(pages[0].children_of(BsrKind::Line).count(), 2);
        assert_eq!(pages[2].children_of(BsrKind::Line).count(), 1);
        assert_eq!(pages[2].attribute("number"), Some("3"));
    }

    #[test]
    fn test_text_wraps_at_blank_cells() {
        let text = "⠁⠁⠁⠀⠃⠃⠃⠀⠉⠉⠉";
        assert_eq!(wrap(text, 7), vec!["⠁⠁⠁⠀⠃⠃⠃".to_string(), "⠉⠉⠉".to_string()]);

        let mut layout = BrailleLayout::new(&settings(10, 25, false));
        layout.push_text_lines(BsrKind::Heading, text);
        assert_eq!(layout.line_count(), 2);
    }
}
