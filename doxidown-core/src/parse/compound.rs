//! Builders for the structural grammar: `compounddef`, `sectiondef`,
//! `memberdef` and their satellite productions.
//!
//! Every attribute and child element present in the schema fragment gets an
//! explicit branch; unrecognized ones are reported through the session so the
//! tree stays demonstrably faithful to the source XML.

use crate::error::ConvertError;
use crate::model::compound::*;
use crate::parse::doc::{parse_description, parse_program_listing, parse_ref_text};
use crate::parse::{check_attributes, ParseSession};
use crate::xml::{XmlChild, XmlElement};

/// Parse one `<refid>.xml` compound file and register every `compounddef`
/// it contains with the session. Returns the registered refids in order.
pub fn parse_compound_file(
    xml: &str,
    sess: &mut ParseSession,
) -> Result<Vec<String>, ConvertError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| ConvertError::Xml(e.to_string()))?;
    let root = XmlElement::new(doc.root_element());
    if root.name() != "doxygen" {
        return Err(ConvertError::schema(
            root.name(),
            "expected <doxygen> document root",
        ));
    }
    let mut refids = Vec::new();
    for child in root.element_children() {
        if child.name() != "compounddef" {
            sess.warn("doxygen", format!("unhandled element <{}>, dropped", child.name()));
            continue;
        }
        let compound = parse_compounddef(&child, sess)?;
        refids.push(compound.id.clone());
        sess.add_compound(compound);
    }
    sess.note_file_parsed();
    Ok(refids)
}

fn parse_protection(el: &XmlElement, raw: &str, sess: &mut ParseSession) -> Protection {
    Protection::parse(raw).unwrap_or_else(|| {
        sess.warn(el.name(), format!("unrecognized protection '{raw}'"));
        Protection::Public
    })
}

fn parse_virtualness(el: &XmlElement, raw: &str, sess: &mut ParseSession) -> Virtualness {
    Virtualness::parse(raw).unwrap_or_else(|| {
        sess.warn(el.name(), format!("unrecognized virtualness '{raw}'"));
        Virtualness::NonVirtual
    })
}

pub fn parse_compounddef(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<CompoundDef, ConvertError> {
    check_attributes(
        el,
        &["id", "kind", "language", "prot", "final", "inline", "sealed", "abstract"],
        sess,
    );
    let mut compound = CompoundDef {
        id: el.attribute_str("id")?.to_string(),
        kind: CompoundKind::parse(el.attribute_str("kind")?),
        language: el.attribute_opt("language").map(str::to_string),
        prot: match el.attribute_opt("prot") {
            Some(raw) => Some(parse_protection(el, raw, sess)),
            None => None,
        },
        name: String::new(),
        title: None,
        base_refs: vec![],
        derived_refs: vec![],
        includes: vec![],
        included_by: vec![],
        inner_dirs: vec![],
        inner_files: vec![],
        inner_classes: vec![],
        inner_concepts: vec![],
        inner_namespaces: vec![],
        inner_pages: vec![],
        inner_groups: vec![],
        template_params: None,
        sections: vec![],
        briefdescription: None,
        detaileddescription: None,
        listing: None,
        location: None,
    };

    for child in el.element_children() {
        match child.name() {
            "compoundname" => compound.name = child.text(),
            "title" => compound.title = Some(child.text()),
            "basecompoundref" => compound.base_refs.push(parse_compound_ref(&child, sess)?),
            "derivedcompoundref" => compound.derived_refs.push(parse_compound_ref(&child, sess)?),
            "includes" => compound.includes.push(parse_include(&child, sess)?),
            "includedby" => compound.included_by.push(parse_include(&child, sess)?),
            "innerdir" => compound.inner_dirs.push(parse_inner_ref(&child, sess)?),
            "innerfile" => compound.inner_files.push(parse_inner_ref(&child, sess)?),
            "innerclass" => compound.inner_classes.push(parse_inner_ref(&child, sess)?),
            "innerconcept" => compound.inner_concepts.push(parse_inner_ref(&child, sess)?),
            "innernamespace" => compound.inner_namespaces.push(parse_inner_ref(&child, sess)?),
            "innerpage" => compound.inner_pages.push(parse_inner_ref(&child, sess)?),
            "innergroup" => compound.inner_groups.push(parse_inner_ref(&child, sess)?),
            "templateparamlist" => {
                compound.template_params = Some(parse_template_param_list(&child, sess)?)
            }
            "sectiondef" => compound.sections.push(parse_sectiondef(&child, sess)?),
            "briefdescription" => {
                compound.briefdescription = Some(parse_description(&child, sess)?)
            }
            "detaileddescription" => {
                compound.detaileddescription = Some(parse_description(&child, sess)?)
            }
            "programlisting" => compound.listing = Some(parse_program_listing(&child, sess)?),
            "location" => compound.location = Some(parse_location(&child, sess)?),
            // Known productions this converter does not materialize.
            "listofallmembers" | "tableofcontents" | "incdepgraph" | "invincdepgraph"
            | "inheritancegraph" | "collaborationgraph" | "requiresclause" | "initializer"
            | "exports" => {
                log::debug!("skipping <{}> in compounddef", child.name());
            }
            other => sess.warn("compounddef", format!("unhandled element <{other}>, dropped")),
        }
    }

    if compound.name.is_empty() {
        return Err(ConvertError::schema(
            "compounddef",
            format!("missing mandatory compoundname for '{}'", compound.id),
        ));
    }
    Ok(compound)
}

fn parse_compound_ref(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<CompoundRef, ConvertError> {
    check_attributes(el, &["refid", "prot", "virt"], sess);
    let prot = match el.attribute_opt("prot") {
        Some(raw) => parse_protection(el, raw, sess),
        None => Protection::Public,
    };
    let virt = match el.attribute_opt("virt") {
        Some(raw) => parse_virtualness(el, raw, sess),
        None => Virtualness::NonVirtual,
    };
    let text = el.text();
    if text.is_empty() {
        return Err(ConvertError::schema(el.name(), "empty compound reference label"));
    }
    Ok(CompoundRef {
        refid: el.attribute_opt("refid").map(str::to_string),
        prot,
        virt,
        text,
    })
}

fn parse_inner_ref(el: &XmlElement, sess: &mut ParseSession) -> Result<InnerRef, ConvertError> {
    check_attributes(el, &["refid", "prot", "inline"], sess);
    let name = el.text();
    if name.is_empty() {
        return Err(ConvertError::schema(el.name(), "empty inner-compound name"));
    }
    Ok(InnerRef {
        refid: el.attribute_str("refid")?.to_string(),
        prot: el
            .attribute_opt("prot")
            .map(|raw| parse_protection(el, raw, sess)),
        name,
    })
}

fn parse_include(el: &XmlElement, sess: &mut ParseSession) -> Result<Include, ConvertError> {
    check_attributes(el, &["refid", "local"], sess);
    Ok(Include {
        refid: el.attribute_opt("refid").map(str::to_string),
        local: el.attribute_flag("local"),
        text: el.text(),
    })
}

pub fn parse_sectiondef(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<SectionDef, ConvertError> {
    check_attributes(el, &["kind"], sess);
    let mut section = SectionDef {
        kind: el.attribute_str("kind")?.to_string(),
        header: None,
        description: None,
        members: vec![],
    };
    for child in el.element_children() {
        match child.name() {
            "header" => section.header = Some(child.text()),
            "description" => section.description = Some(parse_description(&child, sess)?),
            "memberdef" => section.members.push(parse_memberdef(&child, sess)?),
            // Group files list plain member references alongside memberdefs.
            "member" => log::debug!("skipping <member> reference in sectiondef"),
            other => sess.warn("sectiondef", format!("unhandled element <{other}>, dropped")),
        }
    }
    Ok(section)
}

/// Attributes of `memberdef` that the schema defines for specific languages
/// or member kinds and that carry no weight in the output model.
const MEMBERDEF_PASSTHROUGH_ATTRS: &[&str] = &[
    "refqual", "final", "noexcept", "noexceptexpression", "constexpr", "consteval",
    "constinit", "volatile", "strong", "new", "writable", "readable", "gettable",
    "settable", "privategettable", "privatesettable", "protectedgettable",
    "protectedsettable", "initonly", "attribute", "property", "removable", "raise",
    "optional", "required", "accessor", "bound", "constrained", "transient",
    "maybevoid", "maybedefault", "maybeambiguous", "add", "remove", "sealed",
    "extern", "nodiscard",
];

pub fn parse_memberdef(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<MemberDef, ConvertError> {
    let mut known = vec![
        "kind", "id", "prot", "static", "const", "explicit", "inline", "mutable", "virt",
    ];
    known.extend_from_slice(MEMBERDEF_PASSTHROUGH_ATTRS);
    check_attributes(el, &known, sess);

    let mut member = MemberDef {
        kind: MemberKind::parse(el.attribute_str("kind")?),
        id: el.attribute_str("id")?.to_string(),
        name: String::new(),
        qualified_name: None,
        prot: parse_protection(el, el.attribute_str("prot")?, sess),
        is_static: el.attribute_flag("static"),
        is_const: el.attribute_flag("const"),
        is_explicit: el.attribute_flag("explicit"),
        is_inline: el.attribute_flag("inline"),
        is_mutable: el.attribute_flag("mutable"),
        virt: match el.attribute_opt("virt") {
            Some(raw) => parse_virtualness(el, raw, sess),
            None => Virtualness::NonVirtual,
        },
        ty: None,
        definition: None,
        argsstring: None,
        template_params: None,
        params: vec![],
        enum_values: vec![],
        initializer: None,
        reimplements: vec![],
        reimplemented_by: vec![],
        briefdescription: None,
        detaileddescription: None,
        inbodydescription: None,
        location: Location::default(),
        references: vec![],
        referenced_by: vec![],
    };

    let mut have_location = false;
    for child in el.element_children() {
        match child.name() {
            "name" => member.name = child.text(),
            "qualifiedname" => member.qualified_name = Some(child.text()),
            "type" => member.ty = Some(parse_linked_text(&child, sess)?),
            "definition" => member.definition = Some(child.text()),
            "argsstring" => member.argsstring = Some(child.text()),
            "templateparamlist" => {
                member.template_params = Some(parse_template_param_list(&child, sess)?)
            }
            "param" => member.params.push(parse_param(&child, sess)?),
            "enumvalue" => member.enum_values.push(parse_enumvalue(&child, sess)?),
            "initializer" => member.initializer = Some(parse_linked_text(&child, sess)?),
            "reimplements" => member.reimplements.push(parse_reimplement(&child, sess)?),
            "reimplementedby" => member.reimplemented_by.push(parse_reimplement(&child, sess)?),
            "briefdescription" => member.briefdescription = Some(parse_description(&child, sess)?),
            "detaileddescription" => {
                member.detaileddescription = Some(parse_description(&child, sess)?)
            }
            "inbodydescription" => member.inbodydescription = Some(parse_description(&child, sess)?),
            "location" => {
                member.location = parse_location(&child, sess)?;
                have_location = true;
            }
            "references" => member.references.push(parse_referenced_item(&child, sess)?),
            "referencedby" => member.referenced_by.push(parse_referenced_item(&child, sess)?),
            "exceptions" | "read" | "write" | "bitfield" | "requiresclause" | "qualifier" => {
                log::debug!("skipping <{}> in memberdef", child.name());
            }
            other => sess.warn("memberdef", format!("unhandled element <{other}>, dropped")),
        }
    }

    if member.name.is_empty() {
        return Err(ConvertError::schema(
            "memberdef",
            format!("missing mandatory name for '{}'", member.id),
        ));
    }
    if !have_location {
        return Err(ConvertError::schema(
            "memberdef",
            format!("missing mandatory location for '{}'", member.id),
        ));
    }
    Ok(member)
}

/// Parse a linked-text production: plain text interleaved with `ref`
/// elements, in document order.
pub fn parse_linked_text(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<LinkedText, ConvertError> {
    let mut children = Vec::new();
    for child in el.ordered_children() {
        match child {
            XmlChild::Text(text) => children.push(LinkedTextChild::Text(text.to_string())),
            XmlChild::Element(inner) => {
                if inner.name() == "ref" {
                    children.push(LinkedTextChild::Ref(parse_ref_text(&inner, sess)?));
                } else {
                    sess.warn(el.name(), format!("unhandled element <{}>, dropped", inner.name()));
                }
            }
        }
    }
    Ok(LinkedText { children })
}

fn parse_template_param_list(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<TemplateParamList, ConvertError> {
    let mut params = Vec::new();
    for child in el.element_children() {
        if child.name() != "param" {
            sess.warn("templateparamlist", format!("unhandled element <{}>, dropped", child.name()));
            continue;
        }
        params.push(parse_param(&child, sess)?);
    }
    Ok(TemplateParamList { params })
}

pub fn parse_param(el: &XmlElement, sess: &mut ParseSession) -> Result<Param, ConvertError> {
    let mut param = Param::default();
    for child in el.element_children() {
        match child.name() {
            "attributes" => param.attributes = Some(child.text()),
            "type" => param.ty = Some(parse_linked_text(&child, sess)?),
            "declname" => param.declname = Some(child.text()),
            "defname" => param.defname = Some(child.text()),
            "array" => param.array = Some(child.text()),
            "defval" => param.defval = Some(parse_linked_text(&child, sess)?),
            "typeconstraint" => param.typeconstraint = Some(parse_linked_text(&child, sess)?),
            "briefdescription" => param.briefdescription = Some(parse_description(&child, sess)?),
            other => sess.warn("param", format!("unhandled element <{other}>, dropped")),
        }
    }
    Ok(param)
}

fn parse_enumvalue(el: &XmlElement, sess: &mut ParseSession) -> Result<EnumValue, ConvertError> {
    check_attributes(el, &["id", "prot"], sess);
    let mut value = EnumValue {
        id: el.attribute_str("id")?.to_string(),
        name: String::new(),
        prot: match el.attribute_opt("prot") {
            Some(raw) => parse_protection(el, raw, sess),
            None => Protection::Public,
        },
        initializer: None,
        briefdescription: None,
        detaileddescription: None,
    };
    for child in el.element_children() {
        match child.name() {
            "name" => value.name = child.text(),
            "initializer" => value.initializer = Some(parse_linked_text(&child, sess)?),
            "briefdescription" => value.briefdescription = Some(parse_description(&child, sess)?),
            "detaileddescription" => {
                value.detaileddescription = Some(parse_description(&child, sess)?)
            }
            other => sess.warn("enumvalue", format!("unhandled element <{other}>, dropped")),
        }
    }
    if value.name.is_empty() {
        return Err(ConvertError::schema(
            "enumvalue",
            format!("missing mandatory name for '{}'", value.id),
        ));
    }
    Ok(value)
}

pub fn parse_location(el: &XmlElement, sess: &mut ParseSession) -> Result<Location, ConvertError> {
    check_attributes(
        el,
        &["file", "line", "column", "bodyfile", "bodystart", "bodyend", "declfile", "declline", "declcolumn"],
        sess,
    );
    let num = |name: &str| -> Option<u32> {
        el.attribute_opt(name).and_then(|raw| raw.parse::<u32>().ok())
    };
    Ok(Location {
        file: el.attribute_str("file")?.to_string(),
        line: num("line"),
        column: num("column"),
        bodyfile: el.attribute_opt("bodyfile").map(str::to_string),
        bodystart: num("bodystart"),
        bodyend: num("bodyend"),
    })
}

fn parse_referenced_item(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<ReferencedItem, ConvertError> {
    check_attributes(el, &["refid", "compoundref", "startline", "endline"], sess);
    let num = |name: &str| -> Option<u32> {
        el.attribute_opt(name).and_then(|raw| raw.parse::<u32>().ok())
    };
    let text = el.text();
    if text.is_empty() {
        return Err(ConvertError::schema(el.name(), "empty reference label"));
    }
    Ok(ReferencedItem {
        refid: el.attribute_str("refid")?.to_string(),
        compoundref: el.attribute_opt("compoundref").map(str::to_string),
        startline: num("startline"),
        endline: num("endline"),
        text,
    })
}

fn parse_reimplement(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<Reimplement, ConvertError> {
    check_attributes(el, &["refid"], sess);
    Ok(Reimplement {
        refid: el.attribute_str("refid")?.to_string(),
        text: el.text(),
    })
}
