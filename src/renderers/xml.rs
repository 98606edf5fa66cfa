//! XML text rendering and read-back
//!
//! Trees are written with quick-xml's indenting writer. Leaf values stay on
//! the line of their element; comments are padded with one space on each
//! side. Reading back goes through roxmltree, ignoring whitespace-only
//! text between elements, so render, parse and render again gives the
//! same text.

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::RenderError;
use crate::tree::{Element, ElementKind, ElementValue};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// What precedes the root element
#[derive(Debug, Clone, Default)]
pub struct XmlProlog {
    /// DOCTYPE contents, without `<!DOCTYPE` and `>`
    pub doctype: Option<String>,
}

impl XmlProlog {
    pub fn with_doctype(doctype: impl Into<String>) -> Self {
        XmlProlog {
            doctype: Some(doctype.into()),
        }
    }
}

/// Render a tree to indented XML text with a declaration
pub fn render_xml<K: ElementKind>(root: &Element<K>, prolog: &XmlProlog) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    if let Some(doctype) = &prolog.doctype {
        writer.write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))?;
    }
    write_element(&mut writer, root)?;

    let mut text = String::from_utf8(writer.into_inner().into_inner())?;
    text.push('\n');
    Ok(text)
}

fn write_element<K: ElementKind>(writer: &mut Writer<Cursor<Vec<u8>>>, element: &Element<K>) -> Result<(), RenderError> {
    if element.is_comment() {
        let text = element.text().unwrap_or_default();
        writer.write_event(Event::Comment(BytesText::from_escaped(format!(" {} ", text))))?;
        return Ok(());
    }

    let name = element.kind().tag_name();
    let mut start = BytesStart::new(name);
    for (attribute, value) in element.attributes() {
        start.push_attribute((attribute.as_str(), value.as_str()));
    }

    let text = element.text().filter(|text| !text.is_empty());
    match text {
        Some(text) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        None if element.has_children() => {
            writer.write_event(Event::Start(start))?;
            for child in element.children() {
                write_element(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        None => writer.write_event(Event::Empty(start))?,
    }
    Ok(())
}

/// Read XML text back into a tree of kind `K`.
///
/// Leaf values come back as text. Namespace declarations and `xml:`
/// attributes are restored as plain attributes.
pub fn parse_xml_tree<K: ElementKind>(text: &str) -> Result<Element<K>, RenderError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    read_node(document.root_element())
}

fn read_node<K: ElementKind>(node: roxmltree::Node<'_, '_>) -> Result<Element<K>, RenderError> {
    let name = node.tag_name().name();
    let kind = K::from_tag_name(name).ok_or_else(|| RenderError::UnknownElement(name.to_string()))?;
    let mut element = Element::new(kind);

    // declarations made on this element, not inherited
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for namespace in node.namespaces() {
        if namespace.uri() == XML_NAMESPACE || inherited.contains(&(namespace.name(), namespace.uri())) {
            continue;
        }
        match namespace.name() {
            Some(prefix) => element.add_attribute(format!("xmlns:{}", prefix), namespace.uri()),
            None => element.add_attribute("xmlns", namespace.uri()),
        }
    }

    for attribute in node.attributes() {
        let qualified = match attribute.namespace() {
            Some(XML_NAMESPACE) => format!("xml:{}", attribute.name()),
            Some(uri) => match node.lookup_prefix(uri) {
                Some(prefix) => format!("{}:{}", prefix, attribute.name()),
                None => attribute.name().to_string(),
            },
            None => attribute.name().to_string(),
        };
        element.add_attribute(qualified, attribute.value());
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            element.push(read_node(child)?);
        } else if child.is_comment() {
            let comment = child.text().unwrap_or_default();
            let comment = comment.strip_prefix(' ').unwrap_or(comment);
            let comment = comment.strip_suffix(' ').unwrap_or(comment);
            element.push(Element::comment(comment));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }
    if !element.has_children() && !text.is_empty() {
        element.set_value(ElementValue::Text(text));
    } else if !text.trim().is_empty() {
        log::warn!("dropping mixed text content of <{}>", name);
    }
    Ok(element)
}

/// Render a tree and write it to `path`
pub fn write_xml_file<K: ElementKind>(
    path: impl AsRef<Path>,
    root: &Element<K>,
    prolog: &XmlProlog,
) -> Result<(), RenderError> {
    let text = render_xml(root, prolog)?;
    std::fs::write(path.as_ref(), text)?;
    log::info!("wrote {}", path.as_ref().display());
    Ok(())
}
