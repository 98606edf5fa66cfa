//! Braille text rendering of a BSR tree
//!
//! One text line per braille line, items separated by a blank cell, pages
//! separated by a form feed. Page numbers are right-aligned on the first
//! line of their page and headings are centered.

use std::path::Path;

use crate::errors::RenderError;
use crate::settings::{BrailleOutput, BrailleSettings};
use crate::translators::bsr::cells::{self, BLANK};
use crate::translators::bsr::BsrKind;
use crate::tree::Element;

type BsrElement = Element<BsrKind>;

const PAGE_SEPARATOR: char = '\x0c';

/// Concatenated leaf values of an item, in document order
fn item_text(item: &BsrElement) -> String {
    item.descendants()
        .into_iter()
        .filter(|node| !node.is_comment())
        .filter_map(|node| node.text())
        .collect()
}

fn pad_to(text: String, leading: usize) -> String {
    let mut padded: String = std::iter::repeat(BLANK).take(leading).collect();
    padded.push_str(&text);
    padded
}

fn render_line(line: &BsrElement, width: usize) -> String {
    let items: Vec<String> = line.children().iter().map(item_text).collect();
    let text = items.join(&BLANK.to_string());
    let centered = line.children().iter().all(|item| item.kind().is_centered()) && line.has_children();
    if centered {
        let cells = cells::cell_count(&text);
        return pad_to(text, width.saturating_sub(cells) / 2);
    }
    text
}

fn render_page(page: &BsrElement, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for child in page.children() {
        match child.kind() {
            BsrKind::PageNumber => {
                let number = child.text().unwrap_or_default();
                let cells = cells::cell_count(&number);
                lines.push(pad_to(number, width.saturating_sub(cells)));
            }
            BsrKind::Line => lines.push(render_line(child, width)),
            BsrKind::Comment => {}
            other => log::warn!("unexpected <{:?}> directly in a braille page", other),
        }
    }
    lines
}

/// Render a BSR tree to braille text
pub fn render_braille(root: &BsrElement, settings: &BrailleSettings) -> String {
    let pages: Vec<String> = root
        .children_of(BsrKind::Page)
        .map(|page| {
            render_page(page, settings.cells_per_line)
                .into_iter()
                .map(|line| line + "\n")
                .collect::<String>()
        })
        .collect();
    let text = pages.join(&PAGE_SEPARATOR.to_string());
    match settings.output {
        BrailleOutput::Unicode => text,
        BrailleOutput::Ascii => cells::to_ascii(&text),
    }
}

pub fn write_braille_file(
    path: impl AsRef<Path>,
    root: &BsrElement,
    settings: &BrailleSettings,
) -> Result<(), RenderError> {
    std::fs::write(path.as_ref(), render_braille(root, settings))?;
    log::info!("wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, lines: Vec<Vec<BsrElement>>) -> BsrElement {
        let mut page = Element::new(BsrKind::Page).with_attribute("number", number);
        page.push_leaf(BsrKind::PageNumber, cells::upper_number(number));
        for items in lines {
            let mut line = Element::new(BsrKind::Line);
            for item in items {
                line.push(item);
            }
            page.push(line);
        }
        page
    }

    fn measure(notes: &[&str]) -> BsrElement {
        let mut measure = Element::new(BsrKind::Measure);
        for note in notes {
            measure.push_leaf(BsrKind::Note, *note);
        }
        measure
    }

    fn settings(width: usize) -> BrailleSettings {
        BrailleSettings {
            cells_per_line: width,
            ..BrailleSettings::default()
        }
    }

    #[test]
    fn test_lines_and_page_number() {
        let mut root = Element::new(BsrKind::Score);
        root.push(page(1, vec![vec![measure(&["⠹", "⠱"]), measure(&["⠝"])]]));
        let text = render_braille(&root, &settings(10));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "⠀⠀⠀⠀⠀⠀⠀⠀⠼⠁");
        assert_eq!(lines[1], "⠹⠱⠀⠝");
    }

    #[test]
    fn test_heading_centered() {
        let mut root = Element::new(BsrKind::Score);
        root.push(page(1, vec![vec![Element::leaf(BsrKind::Heading, "⠁⠃")]]));
        let text = render_braille(&root, &settings(10));
        assert_eq!(text.lines().nth(1), Some("⠀⠀⠀⠀⠁⠃"));
    }

    #[test]
    fn test_pages_separated_by_form_feed() {
        let mut root = Element::new(BsrKind::Score);
        root.push(page(1, vec![vec![measure(&["⠹"])]]));
        root.push(page(2, vec![vec![measure(&["⠱"])]]));
        let text = render_braille(&root, &settings(10));
        assert_eq!(text.matches(PAGE_SEPARATOR).count(), 1);
        assert!(text.ends_with("⠱\n"));
    }

    #[test]
    fn test_ascii_output() {
        let mut root = Element::new(BsrKind::Score);
        root.push(page(1, vec![vec![measure(&["⠹", "⠱"])]]));
        let mut settings = settings(10);
        settings.output = BrailleOutput::Ascii;
        let text = render_braille(&root, &settings);
        assert!(text.is_ascii());
        assert!(text.ends_with("?:\n"));
    }
}
