//! `index.xml` parsing plus the two corpus-wide passes that run after every
//! compound file has been parsed: member-kind back-fill and hierarchy
//! linking.

use crate::error::ConvertError;
use crate::model::index::{DoxygenIndex, IndexCompound, IndexMember};
use crate::parse::{check_attributes, ParseSession};
use crate::xml::XmlElement;
use std::collections::BTreeMap;

/// Parse `index.xml` and register it with the session.
pub fn parse_index(xml: &str, sess: &mut ParseSession) -> Result<(), ConvertError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| ConvertError::Xml(e.to_string()))?;
    let root = XmlElement::new(doc.root_element());
    if root.name() != "doxygenindex" {
        return Err(ConvertError::schema(
            root.name(),
            "expected <doxygenindex> document root",
        ));
    }
    check_attributes(&root, &["version", "xml:lang"], sess);

    let mut index = DoxygenIndex {
        version: root.attribute_opt("version").unwrap_or_default().to_string(),
        compounds: vec![],
    };
    for child in root.element_children() {
        if child.name() != "compound" {
            sess.warn("doxygenindex", format!("unhandled element <{}>, dropped", child.name()));
            continue;
        }
        index.compounds.push(parse_index_compound(&child, sess)?);
    }
    sess.set_index(index);
    Ok(())
}

fn parse_index_compound(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<IndexCompound, ConvertError> {
    check_attributes(el, &["refid", "kind"], sess);
    let mut compound = IndexCompound {
        refid: el.attribute_str("refid")?.to_string(),
        kind: crate::model::compound::CompoundKind::parse(el.attribute_str("kind")?),
        name: String::new(),
        members: vec![],
    };
    for child in el.element_children() {
        match child.name() {
            "name" => compound.name = child.text(),
            "member" => {
                check_attributes(&child, &["refid", "kind"], sess);
                compound.members.push(IndexMember {
                    refid: child.attribute_str("refid")?.to_string(),
                    // Provisional until the back-fill pass copies the
                    // authoritative kind from the memberdef.
                    kind: child.attribute_opt("kind").unwrap_or_default().to_string(),
                    name: child.inner_element_text("name")?,
                });
            }
            other => sess.warn("compound", format!("unhandled element <{other}>, dropped")),
        }
    }
    if compound.name.is_empty() {
        return Err(ConvertError::schema(
            "compound",
            format!("missing mandatory name for '{}'", compound.refid),
        ));
    }
    Ok(compound)
}

/// Overwrite every index member's provisional kind with the kind recorded on
/// the memberdef sharing the same refid.
///
/// Must run exactly once per session, after all compound files are parsed.
/// Where the same member refid appears on several memberdefs (friend
/// declarations do this) the first parsed definition wins, matching the
/// first-definition-wins rule for compounds.
pub fn backfill_member_kinds(sess: &mut ParseSession) -> Result<(), ConvertError> {
    sess.mark_backfilled()?;

    let mut kinds: BTreeMap<String, String> = BTreeMap::new();
    for compound in sess.compounds() {
        for section in &compound.sections {
            for member in &section.members {
                kinds
                    .entry(member.id.clone())
                    .or_insert_with(|| member.kind.as_str().to_string());
            }
        }
    }

    let mut missing = Vec::new();
    if let Some(index) = sess.index_mut() {
        for compound in &mut index.compounds {
            for member in &mut compound.members {
                match kinds.get(&member.refid) {
                    Some(kind) => member.kind = kind.clone(),
                    None => missing.push(member.refid.clone()),
                }
            }
        }
    }
    for refid in missing {
        sess.warn(
            "doxygenindex",
            format!("index member '{refid}' has no memberdef, kind left provisional"),
        );
    }
    Ok(())
}

/// Record, for every compound, which compound lists it as an inner compound.
/// First listing wins; a second claimant is reported and ignored.
pub fn link_hierarchy(sess: &mut ParseSession) {
    let mut links: Vec<(String, String)> = Vec::new();
    let mut conflicts: Vec<(String, String)> = Vec::new();
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for compound in sess.compounds() {
        for inner in compound.inner_refs() {
            if let Some(prev) = seen.get(inner.refid.as_str()) {
                conflicts.push((inner.refid.clone(), prev.to_string()));
                continue;
            }
            seen.insert(&inner.refid, &compound.id);
            links.push((inner.refid.clone(), compound.id.clone()));
        }
    }
    for (child, parent) in links {
        sess.set_parent(child, parent);
    }
    for (child, kept) in conflicts {
        sess.warn(
            "compounddef",
            format!("compound '{child}' listed as inner by several parents, keeping '{kept}'"),
        );
    }
}
