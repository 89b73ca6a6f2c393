//! Builders for the description grammar: paragraphs, markup spans, lists,
//! tables and the rest of Doxygen's mixed-content vocabulary.
//!
//! The crux here is order-preserving mixed-content walking: a paragraph
//! interleaves free text and typed elements, and that interleaving must
//! survive verbatim into [`DocChild`] order because it drives rendering.
//! Text and element nodes are therefore never separated into buckets.

use crate::error::ConvertError;
use crate::model::compound::Description;
use crate::model::doc::*;
use crate::parse::{check_attributes, ParseSession};
use crate::xml::{XmlChild, XmlElement};

/// Character-entity elements that collapse into literal text.
fn entity_text(name: &str) -> Option<&'static str> {
    match name {
        "nonbreakablespace" => Some("\u{00a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "hellip" => Some("\u{2026}"),
        "copy" => Some("\u{00a9}"),
        "trade" => Some("\u{2122}"),
        "reg" => Some("\u{00ae}"),
        "zwj" | "zwnj" => Some(""),
        _ => None,
    }
}

/// Output-specific passthrough blocks this converter does not target.
fn is_foreign_only(name: &str) -> bool {
    matches!(
        name,
        "htmlonly" | "latexonly" | "manonly" | "rtfonly" | "docbookonly" | "xmlonly"
    )
}

/// Parse a `briefdescription`/`detaileddescription`/`inbodydescription`
/// block (or any other `descriptionType` production).
pub fn parse_description(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<Description, ConvertError> {
    check_attributes(el, &[], sess);
    let mut desc = Description::default();
    for child in el.ordered_children() {
        match child {
            XmlChild::Text(text) => {
                if !text.trim().is_empty() {
                    sess.warn(el.name(), format!("unexpected text content '{}'", text.trim()));
                }
            }
            XmlChild::Element(child) => match child.name() {
                "title" => desc.title = child.text(),
                "sect1" => desc.children.extend(parse_sect(&child, 1, sess)?),
                other if entity_text(other).is_some() => {
                    // Entities are only meaningful inside mixed content.
                    sess.warn(el.name(), format!("stray entity element <{other}>"));
                }
                _ => {
                    if let Some(node) = parse_doc_element(&child, sess)? {
                        desc.children.push(node);
                    }
                }
            },
        }
    }
    Ok(desc)
}

/// Numbered sections flatten into a heading followed by their content.
/// The section id is a cross-reference target and survives as an anchor.
fn parse_sect(
    el: &XmlElement,
    level: u8,
    sess: &mut ParseSession,
) -> Result<Vec<DocNode>, ConvertError> {
    check_attributes(el, &["id"], sess);
    let mut nodes = Vec::new();
    if let Some(id) = el.attribute_opt("id") {
        nodes.push(DocNode::Anchor(Anchor { id: id.to_string() }));
    }
    for child in el.element_children() {
        match child.name() {
            "title" => {
                let markup = parse_markup(&child, sess)?;
                nodes.push(DocNode::Heading(HeadingNode {
                    level,
                    children: markup.children,
                }));
            }
            "sect1" | "sect2" | "sect3" | "sect4" => {
                nodes.extend(parse_sect(&child, (level + 1).min(6), sess)?);
            }
            _ => {
                if let Some(node) = parse_doc_element(&child, sess)? {
                    nodes.push(node);
                }
            }
        }
    }
    Ok(nodes)
}

/// Walk an element's mixed content into an ordered [`Markup`] span.
pub fn parse_markup(el: &XmlElement, sess: &mut ParseSession) -> Result<Markup, ConvertError> {
    let mut children = Vec::new();
    for child in el.ordered_children() {
        match child {
            XmlChild::Text(text) => children.push(DocChild::Text(text.to_string())),
            XmlChild::Element(inner) => {
                if let Some(text) = entity_text(inner.name()) {
                    children.push(DocChild::Text(text.to_string()));
                } else if let Some(node) = parse_doc_element(&inner, sess)? {
                    children.push(DocChild::Node(node));
                }
            }
        }
    }
    Ok(Markup { children })
}

/// Walk element children only, for containers whose content model is a
/// sequence of block constructs (list items, table cells, descriptions).
pub fn parse_block_children(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<Vec<DocNode>, ConvertError> {
    let mut nodes = Vec::new();
    for child in el.ordered_children() {
        match child {
            XmlChild::Text(text) => {
                if !text.trim().is_empty() {
                    sess.warn(el.name(), format!("unexpected text content '{}'", text.trim()));
                }
            }
            XmlChild::Element(inner) => {
                if let Some(node) = parse_doc_element(&inner, sess)? {
                    nodes.push(node);
                }
            }
        }
    }
    Ok(nodes)
}

/// The docbook-style command-group cascade: one branch per known element
/// alternative, in fixed priority order, with an explicit logged fallback.
///
/// `Ok(None)` means the element was recognized but produces no node (foreign
/// output blocks) or was unrecognized and dropped — degraded, never fatal.
/// Cardinality violations *inside* a recognized element stay fatal.
pub fn parse_doc_element(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<Option<DocNode>, ConvertError> {
    // Attribute pass for the attribute-free vocabulary; branches below that
    // consume attributes check their own known sets.
    match el.name() {
        "para" | "title" | "bold" | "b" | "emphasis" | "em" | "underline" | "ins" | "strike"
        | "s" | "del" | "subscript" | "superscript" | "computeroutput" | "center" | "small"
        | "preformatted" | "linebreak" | "hruler" | "variablelist" | "verbatim" | "blockquote"
        | "internal" => check_attributes(el, &[], sess),
        "itemizedlist" | "orderedlist" => check_attributes(el, &["type", "start"], sess),
        _ => {}
    }
    let node = match el.name() {
        "para" => DocNode::Para(parse_markup(el, sess)?),
        "title" => DocNode::Title(parse_markup(el, sess)?),
        "bold" | "b" => DocNode::Bold(parse_markup(el, sess)?),
        "emphasis" | "em" => DocNode::Emphasis(parse_markup(el, sess)?),
        "underline" | "ins" => DocNode::Underline(parse_markup(el, sess)?),
        "strike" | "s" | "del" => DocNode::Strike(parse_markup(el, sess)?),
        "subscript" => DocNode::Subscript(parse_markup(el, sess)?),
        "superscript" => DocNode::Superscript(parse_markup(el, sess)?),
        "computeroutput" => DocNode::ComputerOutput(parse_markup(el, sess)?),
        "center" => DocNode::Center(parse_markup(el, sess)?),
        "small" => DocNode::Small(parse_markup(el, sess)?),
        "preformatted" => DocNode::Preformatted(parse_markup(el, sess)?),
        "heading" => {
            check_attributes(el, &["level"], sess);
            let level = el.attribute_number("level")? as u8;
            let markup = parse_markup(el, sess)?;
            DocNode::Heading(HeadingNode {
                level: level.clamp(1, 6),
                children: markup.children,
            })
        }
        "linebreak" => {
            if !el.text().trim().is_empty() {
                sess.warn("linebreak", "unexpected inner text on self-closing element");
            }
            DocNode::LineBreak
        }
        "hruler" => DocNode::HorizontalRuler,
        "anchor" => {
            check_attributes(el, &["id"], sess);
            let id = el.attribute_str("id")?.to_string();
            if !el.text().trim().is_empty() {
                sess.warn("anchor", format!("unexpected inner text on anchor '{id}'"));
            }
            DocNode::Anchor(Anchor { id })
        }
        "formula" => {
            check_attributes(el, &["id"], sess);
            DocNode::Formula(Formula {
                id: el.attribute_opt("id").unwrap_or_default().to_string(),
                source: el.text(),
            })
        }
        "image" => {
            check_attributes(el, &["type", "name", "width", "height", "alt", "inline", "caption"], sess);
            let markup = parse_markup(el, sess)?;
            DocNode::Image(ImageNode {
                kind: el.attribute_opt("type").unwrap_or_default().to_string(),
                name: el.attribute_opt("name").unwrap_or_default().to_string(),
                caption: markup.children,
            })
        }
        "ulink" => {
            check_attributes(el, &["url"], sess);
            let markup = parse_markup(el, sess)?;
            DocNode::ULink(ULink {
                url: el.attribute_str("url")?.to_string(),
                children: markup.children,
            })
        }
        "ref" => DocNode::Ref(parse_ref_text(el, sess)?),
        "simplesect" => parse_simplesect(el, sess)?,
        "itemizedlist" => DocNode::ItemizedList(parse_list(el, sess)?),
        "orderedlist" => DocNode::OrderedList(parse_list(el, sess)?),
        "variablelist" => DocNode::VariableList(parse_variable_list(el, sess)?),
        "parameterlist" => DocNode::ParameterList(parse_parameter_list(el, sess)?),
        "xrefsect" => parse_xrefsect(el, sess)?,
        "table" => DocNode::Table(parse_table(el, sess)?),
        "programlisting" => DocNode::ProgramListing(parse_program_listing(el, sess)?),
        "verbatim" => DocNode::Verbatim(el.text()),
        "blockquote" => DocNode::BlockQuote(parse_block_children(el, sess)?),
        "internal" => {
            log::debug!("skipping <internal> content");
            return Ok(None);
        }
        other if is_foreign_only(other) => {
            log::debug!("skipping foreign-output block <{other}>");
            return Ok(None);
        }
        other => {
            // Doxygen's vocabulary outgrows any consumer; tolerance here is
            // the forward-compatibility contract.
            sess.warn(el.name(), format!("unhandled element <{other}>, dropped"));
            return Ok(None);
        }
    };
    Ok(Some(node))
}

/// Parse a `ref` element. References carry a mandatory identifier, a kind
/// discriminator and a non-empty display label; anything less is fatal.
pub fn parse_ref_text(el: &XmlElement, sess: &mut ParseSession) -> Result<RefText, ConvertError> {
    check_attributes(el, &["refid", "kindref", "external"], sess);
    let refid = el.attribute_str("refid")?.to_string();
    let kindref = el.attribute_str("kindref")?.to_string();
    let text = el.text();
    if text.is_empty() {
        return Err(ConvertError::schema(
            "ref",
            format!("empty display label for refid '{refid}'"),
        ));
    }
    Ok(RefText {
        refid,
        kindref,
        external: el.attribute_opt("external").map(str::to_string),
        text,
    })
}

fn parse_simplesect(el: &XmlElement, sess: &mut ParseSession) -> Result<DocNode, ConvertError> {
    check_attributes(el, &["kind"], sess);
    let kind = el.attribute_str("kind")?.to_string();
    let mut title = None;
    let mut children = Vec::new();
    for child in el.element_children() {
        if child.name() == "title" {
            title = Some(parse_markup(&child, sess)?);
        } else if let Some(node) = parse_doc_element(&child, sess)? {
            children.push(node);
        }
    }
    if children.is_empty() && title.is_none() {
        return Err(ConvertError::schema(
            "simplesect",
            format!("empty section of kind '{kind}'"),
        ));
    }
    Ok(DocNode::SimpleSect(SimpleSect { kind, title, children }))
}

fn parse_list(el: &XmlElement, sess: &mut ParseSession) -> Result<ListNode, ConvertError> {
    // The grammar mandates at least one item.
    let item_elements = el.inner_elements("listitem")?;
    let mut items = Vec::with_capacity(item_elements.len());
    for item in item_elements {
        items.push(ListItemNode {
            children: parse_block_children(&item, sess)?,
        });
    }
    Ok(ListNode { items })
}

/// Variable lists are a flat alternation of `varlistentry` and `listitem`
/// with no pairing wrapper; the builder reconstructs the pairs. A `listitem`
/// without a pending entry, or a trailing unmatched entry, breaks the
/// grammar contract and aborts the run.
fn parse_variable_list(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<VariableList, ConvertError> {
    let mut pairs = Vec::new();
    let mut pending: Option<Markup> = None;
    for child in el.element_children() {
        match child.name() {
            "varlistentry" => {
                if pending.is_some() {
                    return Err(ConvertError::schema(
                        "variablelist",
                        "varlistentry not followed by a listitem",
                    ));
                }
                let terms = child.inner_elements("term")?;
                if terms.len() > 1 {
                    return Err(ConvertError::schema(
                        "varlistentry",
                        "expected exactly one term",
                    ));
                }
                pending = Some(parse_markup(&terms[0], sess)?);
            }
            "listitem" => {
                let term = pending.take().ok_or_else(|| {
                    ConvertError::schema("variablelist", "listitem without preceding varlistentry")
                })?;
                pairs.push(VariableListPair {
                    term,
                    children: parse_block_children(&child, sess)?,
                });
            }
            other => sess.warn("variablelist", format!("unhandled element <{other}>, dropped")),
        }
    }
    if pending.is_some() {
        return Err(ConvertError::schema(
            "variablelist",
            "trailing varlistentry without listitem",
        ));
    }
    Ok(VariableList { pairs })
}

fn parse_parameter_list(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<ParameterListNode, ConvertError> {
    check_attributes(el, &["kind"], sess);
    let kind = el.attribute_str("kind")?.to_string();
    let mut items = Vec::new();
    for item in el.element_children() {
        if item.name() != "parameteritem" {
            sess.warn("parameterlist", format!("unhandled element <{}>, dropped", item.name()));
            continue;
        }
        let mut names = Vec::new();
        for namelist in item.element_children().filter(|e| e.name() == "parameternamelist") {
            for name in namelist.element_children() {
                if name.name() != "parametername" {
                    sess.warn("parameternamelist", format!("unhandled element <{}>, dropped", name.name()));
                    continue;
                }
                check_attributes(&name, &["direction"], sess);
                names.push(ParameterName {
                    direction: name.attribute_opt("direction").map(str::to_string),
                    content: parse_markup(&name, sess)?,
                });
            }
        }
        let description = item.find("parameterdescription").ok_or_else(|| {
            ConvertError::schema("parameteritem", "missing mandatory parameterdescription")
        })?;
        items.push(ParameterItem {
            names,
            description: parse_block_children(&description, sess)?,
        });
    }
    Ok(ParameterListNode { kind, items })
}

fn parse_xrefsect(el: &XmlElement, sess: &mut ParseSession) -> Result<DocNode, ConvertError> {
    check_attributes(el, &["id"], sess);
    let id = el.attribute_str("id")?.to_string();
    let title = el.inner_element_text("xreftitle")?;
    let description = el.find("xrefdescription").ok_or_else(|| {
        ConvertError::schema("xrefsect", "missing mandatory xrefdescription")
    })?;
    Ok(DocNode::XrefSect(XrefSect {
        id,
        title,
        children: parse_block_children(&description, sess)?,
    }))
}

fn parse_table(el: &XmlElement, sess: &mut ParseSession) -> Result<TableNode, ConvertError> {
    check_attributes(el, &["rows", "cols", "width"], sess);
    let rows = el.attribute_number("rows")? as usize;
    let cols = el.attribute_number("cols")? as usize;
    let mut caption = None;
    let mut body = Vec::new();
    for child in el.element_children() {
        match child.name() {
            "caption" => caption = Some(parse_markup(&child, sess)?),
            "row" => {
                let mut cells = Vec::new();
                for entry in child.element_children() {
                    if entry.name() != "entry" {
                        sess.warn("row", format!("unhandled element <{}>, dropped", entry.name()));
                        continue;
                    }
                    check_attributes(
                        &entry,
                        &["thead", "colspan", "rowspan", "align", "valign", "width", "class"],
                        sess,
                    );
                    cells.push(TableEntry {
                        thead: entry.attribute_flag("thead"),
                        children: parse_block_children(&entry, sess)?,
                    });
                }
                body.push(TableRow { cells });
            }
            other => sess.warn("table", format!("unhandled element <{other}>, dropped")),
        }
    }
    Ok(TableNode { rows, cols, caption, body })
}

pub fn parse_program_listing(
    el: &XmlElement,
    sess: &mut ParseSession,
) -> Result<ProgramListing, ConvertError> {
    check_attributes(el, &["filename"], sess);
    let mut lines = Vec::new();
    for line in el.element_children() {
        if line.name() != "codeline" {
            sess.warn("programlisting", format!("unhandled element <{}>, dropped", line.name()));
            continue;
        }
        check_attributes(&line, &["lineno", "refid", "refkind", "external"], sess);
        let lineno = line
            .attribute_opt("lineno")
            .and_then(|raw| raw.parse::<u32>().ok());
        let mut highlights = Vec::new();
        for hl in line.element_children() {
            if hl.name() != "highlight" {
                sess.warn("codeline", format!("unhandled element <{}>, dropped", hl.name()));
                continue;
            }
            check_attributes(&hl, &["class"], sess);
            let mut children = Vec::new();
            for piece in hl.ordered_children() {
                match piece {
                    XmlChild::Text(text) => children.push(DocChild::Text(text.to_string())),
                    XmlChild::Element(inner) => match inner.name() {
                        "sp" => children.push(DocChild::Text(" ".to_string())),
                        "ref" => children.push(DocChild::Node(DocNode::Ref(parse_ref_text(&inner, sess)?))),
                        other => sess.warn("highlight", format!("unhandled element <{other}>, dropped")),
                    },
                }
            }
            highlights.push(Highlight {
                class: hl.attribute_str("class")?.to_string(),
                children,
            });
        }
        lines.push(CodeLine {
            lineno,
            refid: line.attribute_opt("refid").map(str::to_string),
            highlights,
        });
    }
    Ok(ProgramListing {
        filename: el.attribute_opt("filename").map(str::to_string),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(xml: &str, sess: &mut ParseSession) -> Option<DocNode> {
        let doc = roxmltree::Document::parse(xml).expect("test xml parses");
        parse_doc_element(&XmlElement::new(doc.root_element()), sess).expect("no schema violation")
    }

    fn parse_one_err(xml: &str) -> ConvertError {
        let mut sess = ParseSession::new();
        let doc = roxmltree::Document::parse(xml).expect("test xml parses");
        parse_doc_element(&XmlElement::new(doc.root_element()), &mut sess).unwrap_err()
    }

    #[test]
    fn para_preserves_mixed_content_order() {
        let mut sess = ParseSession::new();
        let node = parse_one("<para>outer <bold>inner</bold> text</para>", &mut sess).unwrap();
        let DocNode::Para(markup) = node else { panic!("expected para") };
        assert_eq!(markup.children.len(), 3);
        assert_eq!(markup.children[0], DocChild::Text("outer ".to_string()));
        assert!(matches!(&markup.children[1], DocChild::Node(DocNode::Bold(_))));
        assert_eq!(markup.children[2], DocChild::Text(" text".to_string()));
    }

    #[test]
    fn entities_collapse_into_text() {
        let mut sess = ParseSession::new();
        let node = parse_one("<para>a<ndash/>b</para>", &mut sess).unwrap();
        let DocNode::Para(markup) = node else { panic!("expected para") };
        assert_eq!(
            markup.children,
            vec![
                DocChild::Text("a".to_string()),
                DocChild::Text("\u{2013}".to_string()),
                DocChild::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_element_is_dropped_with_diagnostic() {
        let mut sess = ParseSession::new();
        let node = parse_one("<para>keep <frobnicate>x</frobnicate>me</para>", &mut sess).unwrap();
        let DocNode::Para(markup) = node else { panic!("expected para") };
        // The unknown element produces no node; surrounding text survives.
        assert_eq!(markup.children.len(), 2);
        assert_eq!(sess.diagnostics().len(), 1);
        assert!(sess.diagnostics()[0].message.contains("frobnicate"));
    }

    #[test]
    fn variable_list_pairs_entries_in_order() {
        let mut sess = ParseSession::new();
        let xml = "<variablelist>\
            <varlistentry><term>A</term></varlistentry>\
            <listitem><para>1</para></listitem>\
            <varlistentry><term>B</term></varlistentry>\
            <listitem><para>2</para></listitem>\
            </variablelist>";
        let node = parse_one(xml, &mut sess).unwrap();
        let DocNode::VariableList(list) = node else { panic!("expected variablelist") };
        assert_eq!(list.pairs.len(), 2);
        assert_eq!(list.pairs[0].term.children, vec![DocChild::Text("A".to_string())]);
        assert_eq!(list.pairs[1].term.children, vec![DocChild::Text("B".to_string())]);
    }

    #[test]
    fn trailing_varlistentry_is_fatal() {
        let err = parse_one_err(
            "<variablelist><varlistentry><term>A</term></varlistentry></variablelist>",
        );
        assert!(matches!(err, ConvertError::Schema { .. }));
    }

    #[test]
    fn listitem_without_entry_is_fatal() {
        let err = parse_one_err("<variablelist><listitem><para>1</para></listitem></variablelist>");
        assert!(matches!(err, ConvertError::Schema { .. }));
    }

    #[test]
    fn parameteritem_requires_description() {
        let err = parse_one_err(
            "<parameterlist kind=\"param\"><parameteritem>\
             <parameternamelist><parametername>x</parametername></parameternamelist>\
             </parameteritem></parameterlist>",
        );
        assert!(matches!(err, ConvertError::Schema { element, .. } if element == "parameteritem"));
    }

    #[test]
    fn parameter_list_collects_names_and_directions() {
        let mut sess = ParseSession::new();
        let xml = "<parameterlist kind=\"param\"><parameteritem>\
            <parameternamelist>\
            <parametername direction=\"in\">x</parametername>\
            <parametername>y</parametername>\
            </parameternamelist>\
            <parameterdescription><para>coords</para></parameterdescription>\
            </parameteritem></parameterlist>";
        let node = parse_one(xml, &mut sess).unwrap();
        let DocNode::ParameterList(list) = node else { panic!("expected parameterlist") };
        assert_eq!(list.kind, "param");
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].names.len(), 2);
        assert_eq!(list.items[0].names[0].direction.as_deref(), Some("in"));
        assert_eq!(list.items[0].names[1].direction, None);
    }

    #[test]
    fn anchor_with_unexpected_text_still_constructs() {
        let mut sess = ParseSession::new();
        let node = parse_one("<anchor id=\"x\">spurious</anchor>", &mut sess).unwrap();
        assert_eq!(node, DocNode::Anchor(Anchor { id: "x".to_string() }));
        assert_eq!(sess.diagnostics().len(), 1);
    }

    #[test]
    fn ref_requires_nonempty_label() {
        let err = parse_one_err("<ref refid=\"abc\" kindref=\"compound\"/>");
        assert!(matches!(err, ConvertError::Schema { element, .. } if element == "ref"));
    }

    #[test]
    fn empty_simplesect_is_fatal() {
        let err = parse_one_err("<simplesect kind=\"note\"/>");
        assert!(matches!(err, ConvertError::Schema { element, .. } if element == "simplesect"));
    }

    #[test]
    fn table_captures_geometry_and_header_flags() {
        let mut sess = ParseSession::new();
        let xml = "<table rows=\"2\" cols=\"2\">\
            <row><entry thead=\"yes\"><para>H1</para></entry><entry thead=\"yes\"><para>H2</para></entry></row>\
            <row><entry thead=\"no\"><para>a</para></entry><entry thead=\"no\"><para>b</para></entry></row>\
            </table>";
        let node = parse_one(xml, &mut sess).unwrap();
        let DocNode::Table(table) = node else { panic!("expected table") };
        assert_eq!((table.rows, table.cols), (2, 2));
        assert!(table.body[0].cells.iter().all(|c| c.thead));
        assert!(table.body[1].cells.iter().all(|c| !c.thead));
    }

    #[test]
    fn program_listing_expands_sp_to_spaces() {
        let mut sess = ParseSession::new();
        let xml = "<programlisting filename=\"a.cpp\"><codeline lineno=\"1\">\
            <highlight class=\"keyword\">int<sp/>x;</highlight>\
            </codeline></programlisting>";
        let node = parse_one(xml, &mut sess).unwrap();
        let DocNode::ProgramListing(listing) = node else { panic!("expected programlisting") };
        assert_eq!(listing.filename.as_deref(), Some("a.cpp"));
        let hl = &listing.lines[0].highlights[0];
        assert_eq!(
            hl.children,
            vec![
                DocChild::Text("int".to_string()),
                DocChild::Text(" ".to_string()),
                DocChild::Text("x;".to_string()),
            ]
        );
    }

    fn parse_desc(xml: &str, sess: &mut ParseSession) -> Description {
        let doc = roxmltree::Document::parse(xml).expect("test xml parses");
        parse_description(&XmlElement::new(doc.root_element()), sess).expect("no schema violation")
    }

    #[test]
    fn unknown_attribute_on_para_is_reported() {
        let mut sess = ParseSession::new();
        let node = parse_one("<para future=\"yes\">text</para>", &mut sess).unwrap();
        assert!(matches!(node, DocNode::Para(_)));
        assert_eq!(sess.diagnostics().len(), 1);
        assert!(sess.diagnostics()[0].message.contains("future"));
    }

    #[test]
    fn sect_id_survives_as_anchor() {
        let mut sess = ParseSession::new();
        let desc = parse_desc(
            "<detaileddescription><sect1 id=\"usage\">\
             <title>Usage</title><para>body</para></sect1></detaileddescription>",
            &mut sess,
        );
        assert_eq!(
            desc.children[0],
            DocNode::Anchor(Anchor { id: "usage".to_string() })
        );
        assert!(matches!(&desc.children[1], DocNode::Heading(h) if h.level == 1));
        assert!(sess.diagnostics().is_empty());
    }

    #[test]
    fn stray_text_in_description_is_reported() {
        let mut sess = ParseSession::new();
        let desc = parse_desc(
            "<briefdescription>loose<para>kept</para></briefdescription>",
            &mut sess,
        );
        assert_eq!(desc.children.len(), 1);
        assert_eq!(sess.diagnostics().len(), 1);
        assert!(sess.diagnostics()[0].message.contains("loose"));
    }

    #[test]
    fn simplesect_par_keeps_user_title() {
        let mut sess = ParseSession::new();
        let node = parse_one(
            "<simplesect kind=\"par\"><title>Custom</title><para>body</para></simplesect>",
            &mut sess,
        )
        .unwrap();
        let DocNode::SimpleSect(sect) = node else { panic!("expected simplesect") };
        assert_eq!(sect.kind, "par");
        assert!(sect.title.is_some());
    }
}
