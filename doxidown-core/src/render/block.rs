//! Block renderers: every kind that produces an ordered list of lines.

use crate::model::compound::Description;
use crate::model::doc::{
    DocChild, DocNode, ProgramListing, SimpleSect, TableNode, VariableList,
};
use crate::render::context::RenderContext;
use crate::render::escape::{escape_for, escape_html};
use crate::render::inline::{render_children, render_inline};
use crate::render::OutputMode;

/// Fixed vocabulary of `simplesect` kinds that carry a display title.
/// Unlisted kinds are either admonitions or unknown.
const SIMPLESECT_TITLES: &[(&str, &str)] = &[
    ("see", "See Also"),
    ("return", "Returns"),
    ("author", "Author"),
    ("authors", "Authors"),
    ("version", "Version"),
    ("since", "Since"),
    ("date", "Date"),
    ("pre", "Precondition"),
    ("post", "Postcondition"),
    ("copyright", "Copyright"),
    ("invariant", "Invariant"),
    ("rcs", "RCS"),
];

/// `simplesect` kinds rendered as admonition blocks.
const ADMONITION_KINDS: &[&str] = &["note", "warning", "attention", "important", "remark"];

/// Fixed vocabulary of `parameterlist` kinds.
const PARAMETERLIST_TITLES: &[(&str, &str)] = &[
    ("param", "Parameters"),
    ("retval", "Return values"),
    ("exception", "Exceptions"),
    ("templateparam", "Template parameters"),
];

/// Doxygen highlight classes to token css classes, for the HTML flavor.
const HIGHLIGHT_CLASSES: &[(&str, &str)] = &[
    ("normal", "tok-plain"),
    ("keyword", "tok-keyword"),
    ("keywordtype", "tok-type"),
    ("keywordflow", "tok-flow"),
    ("comment", "tok-comment"),
    ("preprocessor", "tok-preprocessor"),
    ("stringliteral", "tok-string"),
    ("charliteral", "tok-char"),
    ("vhdlkeyword", "tok-keyword"),
];

/// Source-file extensions to fenced-code-block language tags.
const LISTING_LANGUAGES: &[(&str, &str)] = &[
    ("c", "c"),
    ("h", "cpp"),
    ("cc", "cpp"),
    ("cpp", "cpp"),
    ("cxx", "cpp"),
    ("hh", "cpp"),
    ("hpp", "cpp"),
    ("hxx", "cpp"),
    ("cs", "csharp"),
    ("java", "java"),
    ("js", "js"),
    ("py", "python"),
    ("rs", "rust"),
];

/// Render a full description block: optional title, then its nodes.
pub fn render_description(desc: &Description, ctx: &RenderContext) -> Vec<String> {
    let mut lines = Vec::new();
    if !desc.title.is_empty() {
        lines.push(heading_line(2, &escape_for(ctx.mode, &desc.title), ctx.mode));
        lines.push(String::new());
    }
    lines.extend(render_blocks(&desc.children, ctx));
    lines
}

/// Render a node sequence with blank-line separation between blocks.
pub fn render_blocks(nodes: &[DocNode], ctx: &RenderContext) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for node in nodes {
        let block = render_block(node, ctx);
        if block.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    lines
}

fn is_block(node: &DocNode) -> bool {
    matches!(
        node,
        DocNode::Para(_)
            | DocNode::Heading(_)
            | DocNode::Preformatted(_)
            | DocNode::HorizontalRuler
            | DocNode::SimpleSect(_)
            | DocNode::ItemizedList(_)
            | DocNode::OrderedList(_)
            | DocNode::VariableList(_)
            | DocNode::ParameterList(_)
            | DocNode::XrefSect(_)
            | DocNode::Table(_)
            | DocNode::ProgramListing(_)
            | DocNode::Verbatim(_)
            | DocNode::BlockQuote(_)
    )
}

fn heading_line(level: u8, text: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Html => format!("<h{level}>{text}</h{level}>"),
        _ => format!("{} {text}", "#".repeat(level.clamp(1, 6) as usize)),
    }
}

/// Render one block-level node to lines.
pub fn render_block(node: &DocNode, ctx: &RenderContext) -> Vec<String> {
    match node {
        // Paragraphs can carry nested block content (Doxygen puts lists and
        // listings inside <para>); inline runs flush before each block.
        DocNode::Para(m) => {
            let mut lines = Vec::new();
            let mut run = String::new();
            for child in &m.children {
                match child {
                    DocChild::Node(inner) if is_block(inner) => {
                        if !run.trim().is_empty() {
                            lines.push(std::mem::take(&mut run).trim().to_string());
                            lines.push(String::new());
                        } else {
                            run.clear();
                        }
                        lines.extend(render_block(inner, ctx));
                        lines.push(String::new());
                    }
                    DocChild::Node(inner) => run.push_str(&render_inline(inner, ctx)),
                    DocChild::Text(text) => run.push_str(&escape_for(ctx.mode, text)),
                }
            }
            if !run.trim().is_empty() {
                lines.push(run.trim().to_string());
            }
            while lines.last().is_some_and(String::is_empty) {
                lines.pop();
            }
            lines
        }
        DocNode::Heading(h) => {
            vec![heading_line(h.level, &render_children(&h.children, ctx), ctx.mode)]
        }
        DocNode::HorizontalRuler => match ctx.mode {
            OutputMode::Html => vec!["<hr/>".to_string()],
            _ => vec!["---".to_string()],
        },
        DocNode::Preformatted(m) => {
            let plain = ctx.with_mode(OutputMode::Plain);
            let body = render_children(&m.children, &plain);
            fenced(None, body.lines(), ctx.mode)
        }
        DocNode::Verbatim(text) => fenced(None, text.trim_end().lines(), ctx.mode),
        DocNode::SimpleSect(sect) => render_simplesect(sect, ctx),
        DocNode::ItemizedList(list) => render_list(&list.items, ctx, |_| "- ".to_string()),
        DocNode::OrderedList(list) => {
            render_list(&list.items, ctx, |i| format!("{}. ", i + 1))
        }
        DocNode::VariableList(list) => render_variable_list(list, ctx),
        DocNode::ParameterList(list) => {
            let title = PARAMETERLIST_TITLES
                .iter()
                .find(|(kind, _)| *kind == list.kind)
                .map(|(_, title)| *title)
                .unwrap_or_else(|| {
                    log::warn!("unrecognized parameterlist kind '{}'", list.kind);
                    "Parameters"
                });
            let mut lines = vec![strong_line(title, ctx.mode), String::new()];
            for item in &list.items {
                let names: Vec<String> = item
                    .names
                    .iter()
                    .map(|n| {
                        let text = render_children(&n.content.children, ctx);
                        match &n.direction {
                            Some(dir) => format!("{text} [{dir}]"),
                            None => text,
                        }
                    })
                    .collect();
                let body = render_blocks(&item.description, ctx).join(" ");
                lines.push(match ctx.mode {
                    OutputMode::Html => {
                        format!("<li><b>{}</b> {body}</li>", names.join(", "))
                    }
                    _ => format!("- **{}** {body}", names.join(", ")),
                });
            }
            if ctx.mode == OutputMode::Html {
                lines.insert(2, "<ul>".to_string());
                lines.push("</ul>".to_string());
            }
            lines
        }
        DocNode::XrefSect(sect) => {
            let mut lines = vec![
                strong_line(&escape_for(ctx.mode, &sect.title), ctx.mode),
                String::new(),
            ];
            lines.extend(render_blocks(&sect.children, ctx));
            lines
        }
        DocNode::Table(table) => render_table(table, ctx),
        DocNode::ProgramListing(listing) => render_program_listing(listing, ctx),
        DocNode::BlockQuote(children) => render_blocks(children, ctx)
            .into_iter()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect(),
        // Inline kinds at block positions render as a one-line block.
        other => {
            let line = render_inline(other, ctx);
            if line.is_empty() {
                vec![]
            } else {
                vec![line]
            }
        }
    }
}

fn strong_line(text: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Html => format!("<p><b>{text}:</b></p>"),
        _ => format!("**{text}:**"),
    }
}

fn fenced<'a>(
    language: Option<&str>,
    body: impl Iterator<Item = &'a str>,
    mode: OutputMode,
) -> Vec<String> {
    match mode {
        OutputMode::Html => {
            let mut lines = vec![match language {
                Some(lang) => format!("<pre><code class=\"language-{lang}\">"),
                None => "<pre><code>".to_string(),
            }];
            lines.extend(body.map(escape_html));
            lines.push("</code></pre>".to_string());
            lines
        }
        _ => {
            let mut lines = vec![format!("```{}", language.unwrap_or(""))];
            // Code passes through raw; fenced blocks are literal.
            lines.extend(body.map(str::to_string));
            lines.push("```".to_string());
            lines
        }
    }
}

fn render_simplesect(sect: &SimpleSect, ctx: &RenderContext) -> Vec<String> {
    let body = render_blocks(&sect.children, ctx);
    if ADMONITION_KINDS.contains(&sect.kind.as_str()) {
        return match ctx.mode {
            OutputMode::Html => {
                let mut lines = vec![format!("<div class=\"admonition {}\">", sect.kind)];
                lines.extend(body);
                lines.push("</div>".to_string());
                lines
            }
            _ => {
                let mut lines = vec![format!(":::{}", sect.kind), String::new()];
                lines.extend(body);
                lines.push(String::new());
                lines.push(":::".to_string());
                lines
            }
        };
    }

    let title = if sect.kind == "par" {
        sect.title
            .as_ref()
            .map(|t| render_children(&t.children, ctx))
            .unwrap_or_default()
    } else {
        match SIMPLESECT_TITLES.iter().find(|(kind, _)| *kind == sect.kind) {
            Some((_, title)) => (*title).to_string(),
            None => {
                log::warn!("unrecognized simplesect kind '{}'", sect.kind);
                String::new()
            }
        }
    };

    let mut lines = Vec::new();
    if !title.is_empty() {
        lines.push(strong_line(&title, ctx.mode));
        lines.push(String::new());
    }
    lines.extend(body);
    lines
}

fn render_list(
    items: &[crate::model::doc::ListItemNode],
    ctx: &RenderContext,
    prefix: impl Fn(usize) -> String,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let prefix = prefix(i);
        let indent = " ".repeat(prefix.len());
        let mut first = true;
        for line in render_blocks(&item.children, ctx) {
            if first {
                lines.push(format!("{prefix}{line}"));
                first = false;
            } else if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
        if first {
            lines.push(prefix);
        }
    }
    lines
}

fn render_variable_list(list: &VariableList, ctx: &RenderContext) -> Vec<String> {
    let mut lines = Vec::new();
    for pair in &list.pairs {
        let term = render_children(&pair.term.children, ctx);
        if !lines.is_empty() {
            lines.push(String::new());
        }
        match ctx.mode {
            OutputMode::Html => {
                lines.push(format!("<dt><b>{term}</b></dt>"));
                lines.push("<dd>".to_string());
                lines.extend(render_blocks(&pair.children, ctx));
                lines.push("</dd>".to_string());
            }
            _ => {
                lines.push(format!("**{term}**"));
                lines.push(String::new());
                lines.extend(render_blocks(&pair.children, ctx));
            }
        }
    }
    if ctx.mode == OutputMode::Html && !lines.is_empty() {
        lines.insert(0, "<dl>".to_string());
        lines.push("</dl>".to_string());
    }
    lines
}

fn table_cell(cell: &crate::model::doc::TableEntry, ctx: &RenderContext) -> String {
    // Cells are single-line in pipe tables; inner blocks join with spaces
    // and the cell delimiter is neutralized.
    render_blocks(&cell.children, ctx)
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn render_table(table: &TableNode, ctx: &RenderContext) -> Vec<String> {
    if ctx.mode == OutputMode::Html {
        let mut lines = vec!["<table>".to_string()];
        if let Some(caption) = &table.caption {
            lines.push(format!(
                "<caption>{}</caption>",
                render_children(&caption.children, ctx)
            ));
        }
        for row in &table.body {
            let mut line = String::from("<tr>");
            for cell in &row.cells {
                let tag = if cell.thead { "th" } else { "td" };
                let body = render_blocks(&cell.children, ctx).join(" ");
                line.push_str(&format!("<{tag}>{body}</{tag}>"));
            }
            line.push_str("</tr>");
            lines.push(line);
        }
        lines.push("</table>".to_string());
        return lines;
    }

    let mut lines = Vec::new();
    let mut rows = table.body.iter();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.cells.iter().map(|c| table_cell(c, ctx)).collect(),
        None => return lines,
    };
    let width = header.len().max(table.cols);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in rows {
        let cells: Vec<String> = row.cells.iter().map(|c| table_cell(c, ctx)).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    if let Some(caption) = &table.caption {
        lines.push(String::new());
        lines.push(format!("*{}*", render_children(&caption.children, ctx)));
    }
    lines
}

fn listing_language(listing: &ProgramListing) -> Option<&'static str> {
    let filename = listing.filename.as_deref()?;
    let ext = filename.rsplit('.').next()?;
    LISTING_LANGUAGES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, lang)| *lang)
}

fn highlight_css_class(class: &str) -> Option<&'static str> {
    match HIGHLIGHT_CLASSES.iter().find(|(known, _)| *known == class) {
        Some((_, css)) => Some(css),
        None => {
            log::warn!("unrecognized highlight class '{class}'");
            None
        }
    }
}

fn render_program_listing(listing: &ProgramListing, ctx: &RenderContext) -> Vec<String> {
    let plain = ctx.with_mode(OutputMode::Plain);
    if ctx.mode == OutputMode::Html {
        // Token runs keep their category as a span class.
        let mut lines = vec![match listing_language(listing) {
            Some(lang) => format!("<pre><code class=\"language-{lang}\">"),
            None => "<pre><code>".to_string(),
        }];
        for line in &listing.lines {
            let mut out = String::new();
            for hl in &line.highlights {
                let text = escape_html(&render_children(&hl.children, &plain));
                match highlight_css_class(&hl.class) {
                    Some(css) => out.push_str(&format!("<span class=\"{css}\">{text}</span>")),
                    None => out.push_str(&text),
                }
            }
            lines.push(out);
        }
        lines.push("</code></pre>".to_string());
        return lines;
    }

    // Token runs flatten to raw text; fenced blocks do their own styling.
    let body: Vec<String> = listing
        .lines
        .iter()
        .map(|line| {
            line.highlights
                .iter()
                .map(|h| render_children(&h.children, &plain))
                .collect::<Vec<_>>()
                .concat()
        })
        .collect();
    fenced(
        listing_language(listing),
        body.iter().map(String::as_str),
        ctx.mode,
    )
}
