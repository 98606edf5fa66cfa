//! Renderers turning finished trees into text, and XML text back into trees

pub mod braille;
pub mod xml;

pub use braille::{render_braille, write_braille_file};
pub use xml::{parse_xml_tree, render_xml, write_xml_file, XmlProlog};
