//! Markdown-flavor pipeline tests.
//!
//! Structural assertions go through the Comrak AST of the generated page, so
//! they survive cosmetic formatting changes; full-page shape is pinned with
//! snapshots.

use comrak::nodes::NodeValue;
use comrak::{parse_document, Arena, ComrakOptions};
use doxidown_core::render::{NullLookup, NullResolver};
use doxidown_core::{
    render_compound_page, OutputMode, RenderContext, RenderOptions,
};
use insta::assert_snapshot;

use super::fixtures::{link_tables, parsed_corpus};

fn strip_front_matter(page: &str) -> &str {
    let rest = page.strip_prefix("---\n").expect("front matter opens");
    let end = rest.find("\n---\n").expect("front matter closes");
    &rest[end + 5..]
}

fn collect_node_types<'a>(
    node: &'a comrak::nodes::AstNode<'a>,
    types: &mut std::collections::HashSet<String>,
) {
    let type_name = match &node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Table(_) => "Table",
        NodeValue::ThematicBreak => "ThematicBreak",
        _ => "Other",
    };
    types.insert(type_name.to_string());
    for child in node.children() {
        collect_node_types(child, types);
    }
}

#[test]
fn class_page_parses_back_as_structured_markdown() {
    let sess = parsed_corpus();
    let (resolver, lookup) = link_tables(&sess);
    let ctx = RenderContext::new(
        OutputMode::Markdown,
        &resolver,
        &lookup,
        RenderOptions::default(),
    );
    let page = render_compound_page(sess.compound("classgeo_1_1Circle").unwrap(), &ctx);

    let arena = Arena::new();
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    let root = parse_document(&arena, strip_front_matter(&page), &options);

    let mut types = std::collections::HashSet::new();
    collect_node_types(root, &mut types);
    for expected in ["Heading", "CodeBlock", "List", "Item", "Link", "Table"] {
        assert!(types.contains(expected), "page should contain a {expected}");
    }

    // Cross-reference resolved through the member anchor table.
    assert!(page.contains("[distance](/api/namespacegeo#namespacegeo_1af1)"));
    // Reclassified sections surface as their own headings.
    assert!(page.contains("## Constructors"));
    assert!(page.contains("## Operators"));
    assert!(page.contains("## Enumerations"));
    // Enum values render as a table with their initializers.
    assert!(page.contains("| `Dashed = 2` |"));
}

#[test]
fn back_fill_leaves_no_empty_member_kind() {
    let sess = parsed_corpus();
    let index = sess.index().expect("index is set");
    for compound in &index.compounds {
        for member in &compound.members {
            assert!(
                !member.kind.is_empty(),
                "member '{}' kept an empty kind",
                member.refid
            );
        }
    }
}

#[test]
fn hierarchy_pass_links_the_class_to_its_namespace() {
    let sess = parsed_corpus();
    assert_eq!(sess.parent_of("classgeo_1_1Circle"), Some("namespacegeo"));
}

#[test]
fn namespace_page_snapshot() {
    let sess = parsed_corpus();
    let (resolver, lookup) = link_tables(&sess);
    let ctx = RenderContext::new(
        OutputMode::Markdown,
        &resolver,
        &lookup,
        RenderOptions::default(),
    );
    let page = render_compound_page(sess.compound("namespacegeo").unwrap(), &ctx);
    assert_snapshot!(page, @r###"
    ---
    title: "namespace geo"
    slug: "namespacegeo"
    description: "Planar geometry primitives."
    ---

    # namespace geo

    Planar geometry primitives.

    ## Contents

    - [geo::Circle](/api/classgeo_1_1Circle)

    ## Functions

    ### distance {#namespacegeo_1af1}

    ```cpp
    double geo::distance(const Circle &a, const Circle &b)
    ```

    Center distance between two circles.

    **Parameters:**

    - **a** first circle
    - **b** second circle

    **Returns:**

    Euclidean distance.

    ---

    Generated from geo/geo.hpp
    "###);
}

#[test]
fn unresolved_references_still_produce_a_page() {
    let sess = parsed_corpus();
    let resolver = NullResolver;
    let lookup = NullLookup;
    let ctx = RenderContext::new(
        OutputMode::Markdown,
        &resolver,
        &lookup,
        RenderOptions::default(),
    );
    let page = render_compound_page(sess.compound("classgeo_1_1Circle").unwrap(), &ctx);
    // Degraded: the label survives, the hyperlink does not.
    assert!(page.contains("distance"));
    assert!(!page.contains("[distance]("));
}
