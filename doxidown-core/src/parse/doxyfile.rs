//! Parsing for `Doxyfile.xml`, the configuration snapshot emitted next to
//! the generated XML. Only a handful of options matter for page metadata.

use crate::error::ConvertError;
use crate::parse::ParseSession;
use crate::xml::XmlElement;
use std::collections::BTreeMap;

/// Options captured from `Doxyfile.xml`, keyed by option id.
///
/// Multi-valued options keep their values in listing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doxyfile {
    options: BTreeMap<String, Vec<String>>,
}

impl Doxyfile {
    /// First value of an option, if present and non-empty.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.options
            .get(id)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn get_all(&self, id: &str) -> &[String] {
        self.options.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn project_name(&self) -> Option<&str> {
        self.get("PROJECT_NAME")
    }

    pub fn project_brief(&self) -> Option<&str> {
        self.get("PROJECT_BRIEF")
    }
}

/// Parse a `Doxyfile.xml` document.
pub fn parse_doxyfile(xml: &str, sess: &mut ParseSession) -> Result<Doxyfile, ConvertError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| ConvertError::Xml(e.to_string()))?;
    let root = XmlElement::new(doc.root_element());
    if root.name() != "doxyfile" {
        return Err(ConvertError::schema(
            root.name(),
            "expected <doxyfile> document root",
        ));
    }

    let mut file = Doxyfile::default();
    for child in root.element_children() {
        if child.name() != "option" {
            sess.warn("doxyfile", format!("unhandled element <{}>, dropped", child.name()));
            continue;
        }
        let id = child.attribute_str("id")?.to_string();
        let mut values = Vec::new();
        for value in child.element_children() {
            if value.name() != "value" {
                sess.warn("option", format!("unhandled element <{}>, dropped", value.name()));
                continue;
            }
            values.push(value.text());
        }
        if file.options.insert(id.clone(), values).is_some() {
            sess.warn("doxyfile", format!("duplicate option '{id}', last value wins"));
        }
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOXYFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doxyfile version="1.9.8" xml:lang="en-US">
  <option default="no" id="PROJECT_NAME" type="string"><value>Geometry Kit</value></option>
  <option default="yes" id="PROJECT_BRIEF" type="string"><value></value></option>
  <option default="no" id="INPUT" type="stringlist">
    <value>src</value>
    <value>include</value>
  </option>
</doxyfile>"#;

    #[test]
    fn reads_options_by_id() {
        let mut sess = ParseSession::new();
        let file = parse_doxyfile(DOXYFILE_XML, &mut sess).unwrap();
        assert_eq!(file.project_name(), Some("Geometry Kit"));
        // Present but empty counts as unset.
        assert_eq!(file.project_brief(), None);
        assert_eq!(file.get_all("INPUT"), ["src", "include"]);
        assert!(sess.diagnostics().is_empty());
    }

    #[test]
    fn wrong_root_is_fatal() {
        let mut sess = ParseSession::new();
        assert!(parse_doxyfile("<settings/>", &mut sess).is_err());
    }
}
