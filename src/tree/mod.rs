//! Attributed element tree
//!
//! The single tree structure every translator builds: a node carries a kind
//! tag from a closed, format-specific enumeration, an optional scalar value,
//! ordered name/value attributes and ordered children.
//!
//! # Ownership
//!
//! Children are owned by their parent. A node under construction is owned by
//! whoever built it (usually a translator's pending state) and is moved into
//! its parent by [`Element::push`], so a node can never be attached twice.
//! There is no insert or remove: translators compute the final order before
//! pushing.

pub mod kinds;

pub use kinds::ElementKind;

use std::fmt;

/// Scalar payload of a leaf element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for ElementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementValue::Text(text) => write!(f, "{}", text),
            ElementValue::Int(value) => write!(f, "{}", value),
            ElementValue::Float(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{}", value)
                }
            }
        }
    }
}

impl From<&str> for ElementValue {
    fn from(value: &str) -> Self {
        ElementValue::Text(value.to_string())
    }
}

impl From<String> for ElementValue {
    fn from(value: String) -> Self {
        ElementValue::Text(value)
    }
}

impl From<i64> for ElementValue {
    fn from(value: i64) -> Self {
        ElementValue::Int(value)
    }
}

impl From<i32> for ElementValue {
    fn from(value: i32) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<u32> for ElementValue {
    fn from(value: u32) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<u8> for ElementValue {
    fn from(value: u8) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<i8> for ElementValue {
    fn from(value: i8) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<usize> for ElementValue {
    fn from(value: usize) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<f32> for ElementValue {
    fn from(value: f32) -> Self {
        ElementValue::Float(value as f64)
    }
}

impl From<f64> for ElementValue {
    fn from(value: f64) -> Self {
        ElementValue::Float(value)
    }
}

/// A node of an attributed element tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element<K: ElementKind> {
    kind: K,
    value: Option<ElementValue>,
    attributes: Vec<(String, String)>,
    children: Vec<Element<K>>,
}

impl<K: ElementKind> Element<K> {
    /// Create an empty node of the given kind
    pub fn new(kind: K) -> Self {
        Element {
            kind,
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf node carrying a value
    pub fn leaf(kind: K, value: impl Into<ElementValue>) -> Self {
        let mut element = Element::new(kind);
        element.value = Some(value.into());
        element
    }

    /// Create a comment node
    pub fn comment(text: impl Into<String>) -> Self {
        Element::leaf(K::comment(), ElementValue::Text(text.into()))
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    pub fn value(&self) -> Option<&ElementValue> {
        self.value.as_ref()
    }

    /// Value rendered as text, if any
    pub fn text(&self) -> Option<String> {
        self.value.as_ref().map(|value| value.to_string())
    }

    /// Set the scalar payload. Container nodes should not carry a value.
    pub fn set_value(&mut self, value: impl Into<ElementValue>) {
        if !self.children.is_empty() {
            log::warn!(
                "setting a value on <{}> which already has {} children",
                self.kind.tag_name(),
                self.children.len()
            );
        }
        self.value = Some(value.into());
    }

    /// Append a child; order of calls is the order of the children
    pub fn push(&mut self, child: Element<K>) {
        if self.value.is_some() && !self.is_comment() {
            log::warn!(
                "pushing <{}> into <{}> which already carries a value",
                child.kind.tag_name(),
                self.kind.tag_name()
            );
        }
        self.children.push(child);
    }

    /// Append a leaf child built from a kind and a value
    pub fn push_leaf(&mut self, kind: K, value: impl Into<ElementValue>) {
        self.push(Element::leaf(kind, value));
    }

    /// Append an empty child of the given kind
    pub fn push_empty(&mut self, kind: K) {
        self.push(Element::new(kind));
    }

    /// Append a name/value attribute
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl ToString) {
        self.attributes.push((name.into(), value.to_string()));
    }

    /// Builder-style variant of [`Element::add_attribute`]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.add_attribute(name, value);
        self
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attribute_name, _)| attribute_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element<K>] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// First direct child of the given kind
    pub fn child(&self, kind: K) -> Option<&Element<K>> {
        self.children.iter().find(|child| child.kind == kind)
    }

    /// All direct children of the given kind, in order
    pub fn children_of(&self, kind: K) -> impl Iterator<Item = &Element<K>> {
        self.children.iter().filter(move |child| child.kind == kind)
    }

    /// Text of the first direct child of the given kind
    pub fn child_text(&self, kind: K) -> Option<String> {
        self.child(kind).and_then(|child| child.text())
    }

    /// Pre-order traversal of this node and all its descendants
    pub fn descendants(&self) -> Vec<&Element<K>> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            result.push(element);
            for child in element.children.iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|child| child.node_count()).sum::<usize>()
    }

    /// Number of non-comment nodes in this subtree
    pub fn node_count_excluding_comments(&self) -> usize {
        if self.is_comment() {
            return 0;
        }
        1 + self
            .children
            .iter()
            .map(|child| child.node_count_excluding_comments())
            .sum::<usize>()
    }

    /// Diagnostic one-liner, for logs only
    pub fn as_string(&self) -> String {
        format!(
            "Element <{}> (type {}), {} attribute(s), {} child(ren){}",
            self.kind.tag_name(),
            self.kind.type_tag(),
            self.attributes.len(),
            self.children.len(),
            match &self.value {
                Some(value) => format!(", value '{}'", value),
                None => String::new(),
            }
        )
    }
}
