//! Inline renderers: every kind that produces a single string with no
//! embedded newlines (line breaks excepted, the grammar allows those).

use crate::model::doc::{DocChild, DocNode};
use crate::render::context::RenderContext;
use crate::render::escape::escape_for;
use crate::render::OutputMode;

/// Render a mixed-content child sequence in document order.
pub fn render_children(children: &[DocChild], ctx: &RenderContext) -> String {
    let mut out = String::new();
    for child in children {
        match child {
            DocChild::Text(text) => out.push_str(&escape_for(ctx.mode, text)),
            DocChild::Node(node) => out.push_str(&render_inline(node, ctx)),
        }
    }
    out
}

fn tagged(tag: &str, children: &[DocChild], ctx: &RenderContext) -> String {
    let inner = render_children(children, ctx);
    match ctx.mode {
        OutputMode::Plain => inner,
        OutputMode::Markdown | OutputMode::Html => format!("<{tag}>{inner}</{tag}>"),
    }
}

/// Render one node as inline text.
///
/// Block kinds reaching this point (a list nested mid-sentence, say) are
/// flattened: their lines join with single spaces so the inline contract of
/// "no embedded newlines" holds.
pub fn render_inline(node: &DocNode, ctx: &RenderContext) -> String {
    match node {
        DocNode::Bold(m) => tagged("b", &m.children, ctx),
        DocNode::Emphasis(m) => tagged("em", &m.children, ctx),
        DocNode::Underline(m) => tagged("u", &m.children, ctx),
        DocNode::Strike(m) => tagged("s", &m.children, ctx),
        DocNode::Subscript(m) => tagged("sub", &m.children, ctx),
        DocNode::Superscript(m) => tagged("sup", &m.children, ctx),
        DocNode::ComputerOutput(m) => tagged("code", &m.children, ctx),
        DocNode::Small(m) => tagged("small", &m.children, ctx),
        DocNode::Center(m) => tagged("center", &m.children, ctx),
        DocNode::Para(m) | DocNode::Title(m) => render_children(&m.children, ctx),
        DocNode::LineBreak => match ctx.mode {
            OutputMode::Plain => "\n".to_string(),
            OutputMode::Markdown | OutputMode::Html => "<br/>".to_string(),
        },
        DocNode::Anchor(anchor) => match ctx.mode {
            OutputMode::Plain => String::new(),
            OutputMode::Markdown | OutputMode::Html => {
                format!("<a id=\"{}\"></a>", anchor.id)
            }
        },
        // Formula source is raw LaTeX; escaping would corrupt it.
        DocNode::Formula(formula) => formula.source.trim().to_string(),
        DocNode::Image(image) => {
            let caption = render_children(&image.caption, ctx);
            match ctx.mode {
                OutputMode::Plain => caption,
                OutputMode::Markdown => format!("![{caption}]({})", image.name),
                OutputMode::Html => {
                    format!("<img src=\"{}\" alt=\"{caption}\"/>", image.name)
                }
            }
        }
        DocNode::ULink(link) => {
            let label = render_children(&link.children, ctx);
            match ctx.mode {
                OutputMode::Plain => label,
                OutputMode::Markdown => format!("[{label}]({})", link.url),
                OutputMode::Html => format!("<a href=\"{}\">{label}</a>", link.url),
            }
        }
        DocNode::Ref(r) => {
            let label = escape_for(ctx.mode, &r.text);
            if ctx.mode == OutputMode::Plain {
                return label;
            }
            match ctx.resolver.resolve(&r.refid, &r.kindref) {
                Some(url) => match ctx.mode {
                    OutputMode::Markdown => format!("[{label}]({url})"),
                    _ => format!("<a href=\"{url}\">{label}</a>"),
                },
                None => {
                    log::warn!("unresolved reference '{}', emitting plain text", r.refid);
                    label
                }
            }
        }
        // Block kinds, flattened for inline positions.
        other => crate::render::block::render_block(other, ctx).join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::doc::{Markup, RefText, ULink};
    use crate::render::context::{
        MapResolver, NullLookup, NullResolver, RenderOptions,
    };

    fn markup(children: Vec<DocChild>) -> Markup {
        Markup { children }
    }

    fn md_ctx<'a>(
        resolver: &'a dyn crate::render::PermalinkResolver,
        lookup: &'a NullLookup,
    ) -> RenderContext<'a> {
        RenderContext::new(OutputMode::Markdown, resolver, lookup, RenderOptions::default())
    }

    #[test]
    fn mixed_order_survives_rendering() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let ctx = md_ctx(&resolver, &lookup);
        let children = vec![
            DocChild::Text("outer ".to_string()),
            DocChild::Node(DocNode::Bold(markup(vec![DocChild::Text(
                "inner".to_string(),
            )]))),
            DocChild::Text(" text".to_string()),
        ];
        assert_eq!(render_children(&children, &ctx), "outer <b>inner</b> text");
    }

    #[test]
    fn resolved_ref_becomes_a_link() {
        let mut resolver = MapResolver::new();
        resolver.insert("classPoint", "/api/point");
        let lookup = NullLookup;
        let ctx = md_ctx(&resolver, &lookup);
        let node = DocNode::Ref(RefText {
            refid: "classPoint".to_string(),
            kindref: "compound".to_string(),
            external: None,
            text: "Point".to_string(),
        });
        assert_eq!(render_inline(&node, &ctx), "[Point](/api/point)");
    }

    #[test]
    fn unresolved_ref_degrades_to_plain_text() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let ctx = md_ctx(&resolver, &lookup);
        let node = DocNode::Ref(RefText {
            refid: "classGone".to_string(),
            kindref: "compound".to_string(),
            external: None,
            text: "Gone_Type".to_string(),
        });
        // No hyperlink wrapper, but leaf escaping still applies.
        assert_eq!(render_inline(&node, &ctx), r"Gone\_Type");
    }

    #[test]
    fn plain_mode_strips_markup() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let ctx = RenderContext::new(
            OutputMode::Plain,
            &resolver,
            &lookup,
            RenderOptions::default(),
        );
        let node = DocNode::Bold(markup(vec![DocChild::Text("a *b*".to_string())]));
        assert_eq!(render_inline(&node, &ctx), "a *b*");
    }

    #[test]
    fn escaping_happens_exactly_once_per_leaf() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let ctx = md_ctx(&resolver, &lookup);
        let children = vec![DocChild::Node(DocNode::Bold(markup(vec![
            DocChild::Text("a & b".to_string()),
        ])))];
        // "&" becomes "&amp;", and the amp of "&amp;" is not re-escaped.
        assert_eq!(render_children(&children, &ctx), "<b>a &amp; b</b>");
    }

    #[test]
    fn ulink_renders_per_mode() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let node = DocNode::ULink(ULink {
            url: "https://example.org".to_string(),
            children: vec![DocChild::Text("site".to_string())],
        });
        let md = md_ctx(&resolver, &lookup);
        assert_eq!(render_inline(&node, &md), "[site](https://example.org)");
        let html = RenderContext::new(
            OutputMode::Html,
            &resolver,
            &lookup,
            RenderOptions::default(),
        );
        assert_eq!(
            render_inline(&node, &html),
            "<a href=\"https://example.org\">site</a>"
        );
    }
}
