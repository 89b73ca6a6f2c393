//! HTML-flavor pipeline tests.

use doxidown_core::{render_compound_page, OutputMode, RenderContext, RenderOptions};

use super::fixtures::{link_tables, parsed_corpus};

#[test]
fn class_page_uses_html_structure() {
    let sess = parsed_corpus();
    let (resolver, lookup) = link_tables(&sess);
    let ctx = RenderContext::new(
        OutputMode::Html,
        &resolver,
        &lookup,
        RenderOptions::default(),
    );
    let page = render_compound_page(sess.compound("classgeo_1_1Circle").unwrap(), &ctx);

    assert!(page.contains("<h1>class geo::Circle</h1>"));
    assert!(page.contains("<h3 id=\"classgeo_1_1Circle_1a02\">area</h3>"));
    assert!(page.contains("<div class=\"admonition note\">"));
    assert!(page.contains(
        "<a href=\"/api/namespacegeo#namespacegeo_1af1\">distance</a>"
    ));
    // Signatures stay in pre/code blocks, not fenced markdown.
    assert!(page.contains("<pre><code>"));
    assert!(!page.contains("```"));
    // Listing tokens keep their category as a span class.
    assert!(page.contains("<pre><code class=\"language-cpp\">"));
    assert!(page.contains("<span class=\"tok-plain\">Circle c(1.0);</span>"));
}

#[test]
fn html_escapes_at_the_leaf() {
    let sess = parsed_corpus();
    let (resolver, lookup) = link_tables(&sess);
    let ctx = RenderContext::new(
        OutputMode::Html,
        &resolver,
        &lookup,
        RenderOptions::default(),
    );
    let page = render_compound_page(sess.compound("namespacegeo").unwrap(), &ctx);
    // The argsstring's ampersands arrive escaped exactly once.
    assert!(page.contains("const Circle &amp;a"));
    assert!(!page.contains("&amp;amp;"));
}
