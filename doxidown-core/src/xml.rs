//! Typed access layer over the raw XML parse result
//!
//! Doxygen's output grammar mixes free text and child elements in document
//! order, types scalars through attributes, and uses `"yes"`/`"no"` strings
//! for booleans. This module wraps [`roxmltree`] nodes with accessors that
//! encode those conventions once, so tree builders can state their cardinality
//! expectations instead of re-deriving them element by element.
//!
//! All accessors are pure; the failing ones return [`ConvertError::Schema`],
//! which aborts the whole conversion run (see `error.rs` for the rationale).

use crate::error::ConvertError;
use roxmltree::{Node, NodeType};

/// Reserved name addressing an element's own text payload instead of a child.
pub const TEXT_KEY: &str = "#text";

/// One entry of an element's mixed content, in document order.
#[derive(Debug, Clone)]
pub enum XmlChild<'a, 'input> {
    /// A run of character data between elements
    Text(&'a str),
    Element(XmlElement<'a, 'input>),
}

/// A single element of the parsed XML tree.
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> XmlElement<'a, 'input> {
    pub fn new(node: Node<'a, 'input>) -> Self {
        debug_assert!(node.is_element());
        Self { node }
    }

    /// The element name, which doubles as the node kind tag in the model.
    pub fn name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    pub fn has_attributes(&self) -> bool {
        self.node.attributes().next().is_some()
    }

    pub fn attribute_names(&self) -> Vec<&'a str> {
        self.node.attributes().map(|a| a.name()).collect()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.attribute(name).is_some()
    }

    /// Mandatory string attribute. Absence is a schema violation.
    pub fn attribute_str(&self, name: &str) -> Result<&'a str, ConvertError> {
        self.node.attribute(name).ok_or_else(|| {
            ConvertError::schema(self.name(), format!("missing attribute '{name}'"))
        })
    }

    /// Optional string attribute.
    pub fn attribute_opt(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Mandatory numeric attribute.
    pub fn attribute_number(&self, name: &str) -> Result<f64, ConvertError> {
        let raw = self.attribute_str(name)?;
        raw.parse::<f64>().map_err(|_| {
            ConvertError::schema(
                self.name(),
                format!("attribute '{name}' is not numeric: '{raw}'"),
            )
        })
    }

    /// Mandatory boolean attribute, following the Doxygen convention:
    /// `"yes"` (case-insensitive) is true, anything else is false.
    pub fn attribute_bool(&self, name: &str) -> Result<bool, ConvertError> {
        Ok(yes_to_bool(self.attribute_str(name)?))
    }

    /// Optional boolean attribute; absent means false.
    pub fn attribute_flag(&self, name: &str) -> bool {
        self.node.attribute(name).map(yes_to_bool).unwrap_or(false)
    }

    /// Whether the element has at least one child element named `name`,
    /// or (for [`TEXT_KEY`]) a non-empty text payload.
    pub fn has_inner_element(&self, name: &str) -> bool {
        if name == TEXT_KEY {
            return !self.text().is_empty();
        }
        self.element_children().any(|e| e.name() == name)
    }

    /// Whether exactly one child named `name` exists and is either empty
    /// (renders as the empty string) or holds only text. Several same-named
    /// children are ambiguous, not text.
    pub fn is_inner_element_text(&self, name: &str) -> bool {
        let mut count = 0usize;
        for child in self.element_children() {
            if child.name() != name {
                continue;
            }
            count += 1;
            if count > 1 || child.element_children().next().is_some() {
                return false;
            }
        }
        count == 1
    }

    /// The ordered list of child elements named `name`. The primary iteration
    /// primitive of the tree builders; absence is a schema violation.
    pub fn inner_elements(&self, name: &str) -> Result<Vec<XmlElement<'a, 'input>>, ConvertError> {
        let found: Vec<_> = self.element_children().filter(|e| e.name() == name).collect();
        if found.is_empty() {
            return Err(ConvertError::schema(
                self.name(),
                format!("missing inner element '{name}'"),
            ));
        }
        Ok(found)
    }

    /// Text of the single child named `name`. Zero children yield the empty
    /// string; more than one is ambiguous and fatal.
    pub fn inner_element_text(&self, name: &str) -> Result<String, ConvertError> {
        match self.single_inner(name)? {
            Some(child) => Ok(child.text()),
            None => Ok(String::new()),
        }
    }

    /// Numeric variant of [`Self::inner_element_text`]; zero children yield NaN.
    pub fn inner_element_number(&self, name: &str) -> Result<f64, ConvertError> {
        match self.single_inner(name)? {
            Some(child) => {
                let raw = child.text();
                raw.trim().parse::<f64>().map_err(|_| {
                    ConvertError::schema(
                        self.name(),
                        format!("inner element '{name}' is not numeric: '{raw}'"),
                    )
                })
            }
            None => Ok(f64::NAN),
        }
    }

    /// Boolean variant of [`Self::inner_element_text`]; zero children yield false.
    pub fn inner_element_bool(&self, name: &str) -> Result<bool, ConvertError> {
        match self.single_inner(name)? {
            Some(child) => Ok(yes_to_bool(child.text().trim())),
            None => Ok(false),
        }
    }

    /// First child element named `name`, if any.
    pub fn find(&self, name: &str) -> Option<XmlElement<'a, 'input>> {
        self.element_children().find(|e| e.name() == name)
    }

    /// Child elements only, in document order. Used by structural builders
    /// where inter-element whitespace carries no meaning.
    pub fn element_children(&self) -> impl Iterator<Item = XmlElement<'a, 'input>> + 'a {
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(XmlElement::new)
    }

    /// Full mixed content in document order: interleaved text runs and
    /// elements, exactly as encountered. Empty text runs are dropped; all
    /// other text (including whitespace between inline elements) is kept
    /// verbatim because it drives rendering order and spacing.
    pub fn ordered_children(&self) -> Vec<XmlChild<'a, 'input>> {
        let mut out = Vec::new();
        for child in self.node.children() {
            match child.node_type() {
                NodeType::Text => {
                    let text = child.text().unwrap_or("");
                    if !text.is_empty() {
                        out.push(XmlChild::Text(text));
                    }
                }
                NodeType::Element => out.push(XmlChild::Element(XmlElement::new(child))),
                _ => {}
            }
        }
        out
    }

    /// Concatenated direct text content of this element.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in self.node.children() {
            if child.node_type() == NodeType::Text {
                out.push_str(child.text().unwrap_or(""));
            }
        }
        out
    }

    fn single_inner(&self, name: &str) -> Result<Option<XmlElement<'a, 'input>>, ConvertError> {
        let mut iter = self.element_children().filter(|e| e.name() == name);
        let first = iter.next();
        if iter.next().is_some() {
            return Err(ConvertError::schema(
                self.name(),
                format!("expected at most one inner element '{name}'"),
            ));
        }
        Ok(first)
    }
}

/// The Doxygen boolean convention, not a general boolean parse.
pub fn yes_to_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("yes")
}
