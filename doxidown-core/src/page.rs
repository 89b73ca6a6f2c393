//! Assembly of one output page per compound: front matter, descriptions,
//! inner-compound index, member sections and the source-file footer.

use crate::model::compound::{CompoundDef, EnumValue, MemberDef};
use crate::render::{
    render_blocks, render_description, CompoundLookup, OutputMode,
    RenderContext,
};
use crate::sections::categorize_sections;

/// Extract a description's text with all markup stripped, single-line.
fn plain_text_of(desc: &crate::model::compound::Description, ctx: &RenderContext) -> String {
    let plain = ctx.with_mode(OutputMode::Plain);
    render_blocks(&desc.children, &plain)
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn page_title(compound: &CompoundDef) -> String {
    match &compound.title {
        Some(title) if !title.is_empty() => title.clone(),
        _ => format!("{} {}", compound.kind.as_str(), compound.name),
    }
}

fn front_matter(compound: &CompoundDef, ctx: &RenderContext) -> Vec<String> {
    let mut lines = vec!["---".to_string()];
    lines.push(format!("title: \"{}\"", page_title(compound).replace('"', "\\\"")));
    lines.push(format!("slug: \"{}\"", compound.id));
    if let Some(brief) = &compound.briefdescription {
        let text = plain_text_of(brief, ctx);
        if !text.is_empty() {
            lines.push(format!("description: \"{}\"", text.replace('"', "\\\"")));
        }
    }
    lines.push("---".to_string());
    lines
}

fn member_signature(member: &MemberDef) -> String {
    if let Some(definition) = &member.definition {
        let mut sig = definition.clone();
        if let Some(args) = &member.argsstring {
            sig.push_str(args);
        }
        return sig;
    }
    let mut sig = String::new();
    if let Some(ty) = &member.ty {
        let ty = ty.as_plain_text();
        if !ty.is_empty() {
            sig.push_str(&ty);
            sig.push(' ');
        }
    }
    sig.push_str(&member.name);
    if let Some(args) = &member.argsstring {
        sig.push_str(args);
    }
    sig
}

fn signature_block(signature: &str, language: Option<&str>, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Html => vec![format!(
            "<pre><code>{}</code></pre>",
            crate::render::escape::escape_html(signature)
        )],
        _ => {
            let tag = match language {
                Some("C++") => "cpp",
                Some("C") => "c",
                Some("C#") => "csharp",
                Some("Java") => "java",
                Some("Python") => "python",
                _ => "",
            };
            vec![format!("```{tag}"), signature.to_string(), "```".to_string()]
        }
    }
}

fn missing_description_placeholder(ctx: &RenderContext) -> Vec<String> {
    if ctx.options.suggest_todos {
        vec!["TODO: document this.".to_string()]
    } else {
        vec![]
    }
}

fn enum_values_table(values: &[EnumValue], ctx: &RenderContext) -> Vec<String> {
    let mut lines = vec![
        "| Enumerator | Description |".to_string(),
        "| --- | --- |".to_string(),
    ];
    for value in values {
        let mut name = value.name.clone();
        if let Some(init) = &value.initializer {
            name.push(' ');
            name.push_str(&init.as_plain_text());
        }
        let brief = value
            .briefdescription
            .as_ref()
            .map(|d| plain_text_of(d, ctx))
            .unwrap_or_default();
        lines.push(format!("| `{}` | {} |", name.replace('|', "\\|"), brief));
    }
    lines
}

fn push_block(lines: &mut Vec<String>, block: Vec<String>) {
    if block.is_empty() {
        return;
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(block);
}

fn render_member(member: &MemberDef, language: Option<&str>, ctx: &RenderContext) -> Vec<String> {
    let mut lines = Vec::new();
    ctx.note_file(&member.location.file);

    let heading = match ctx.mode {
        OutputMode::Html => format!("<h3 id=\"{}\">{}</h3>", member.id, member.name),
        _ => format!("### {} {{#{}}}", crate::render::escape::escape_markdown(&member.name), member.id),
    };
    lines.push(heading);
    push_block(
        &mut lines,
        signature_block(&member_signature(member), language, ctx.mode),
    );

    let mut described = false;
    if let Some(brief) = &member.briefdescription {
        let block = render_description(brief, ctx);
        described = described || !block.is_empty();
        push_block(&mut lines, block);
    }
    if let Some(detailed) = &member.detaileddescription {
        let block = render_description(detailed, ctx);
        described = described || !block.is_empty();
        push_block(&mut lines, block);
    }
    if let Some(inbody) = &member.inbodydescription {
        let block = render_description(inbody, ctx);
        described = described || !block.is_empty();
        push_block(&mut lines, block);
    }
    if !described {
        push_block(&mut lines, missing_description_placeholder(ctx));
    }
    if !member.enum_values.is_empty() {
        push_block(&mut lines, enum_values_table(&member.enum_values, ctx));
    }
    lines
}

fn inner_index(compound: &CompoundDef, ctx: &RenderContext) -> Vec<String> {
    let mut entries = Vec::new();
    for inner in compound.inner_refs() {
        if crate::sections::is_anonymous_refid(&inner.refid)
            || crate::sections::is_anonymous_name(&inner.name)
        {
            continue;
        }
        let label = crate::render::escape::escape_for(ctx.mode, &inner.name);
        let brief = ctx
            .lookup
            .lookup(&inner.refid)
            .and_then(|summary| summary.brief.clone())
            .unwrap_or_default();
        let link = match ctx.resolver.resolve(&inner.refid, "compound") {
            Some(url) => match ctx.mode {
                OutputMode::Html => format!("<a href=\"{url}\">{label}</a>"),
                _ => format!("[{label}]({url})"),
            },
            None => label,
        };
        entries.push(if brief.is_empty() {
            format!("- {link}")
        } else {
            format!("- {link} — {brief}")
        });
    }
    if entries.is_empty() {
        return vec![];
    }
    let mut lines = vec![heading(2, "Contents", ctx.mode), String::new()];
    lines.extend(entries);
    lines
}

fn heading(level: u8, text: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Html => format!("<h{level}>{text}</h{level}>"),
        _ => format!("{} {text}", "#".repeat(level as usize)),
    }
}

fn generated_from_footer(ctx: &RenderContext) -> Vec<String> {
    let files = ctx.touched_files();
    if files.is_empty() {
        return vec![];
    }
    let mut links = Vec::new();
    for path in files {
        match ctx.lookup.lookup_by_path(&path) {
            Some(summary) => match ctx.resolver.resolve(&summary.refid, "compound") {
                Some(url) => links.push(match ctx.mode {
                    OutputMode::Html => format!("<a href=\"{url}\">{path}</a>"),
                    _ => format!("[{path}]({url})"),
                }),
                None => links.push(path),
            },
            None => links.push(path),
        }
    }
    vec![
        "---".to_string(),
        String::new(),
        format!("Generated from {}", links.join(", ")),
    ]
}

/// Render a complete page for one compound.
pub fn render_compound_page(compound: &CompoundDef, ctx: &RenderContext) -> String {
    let mut lines = front_matter(compound, ctx);
    lines.push(String::new());
    lines.push(heading(
        1,
        &crate::render::escape::escape_for(ctx.mode, &page_title(compound)),
        ctx.mode,
    ));

    if let Some(location) = &compound.location {
        ctx.note_file(&location.file);
    }

    let mut described = false;
    if let Some(brief) = &compound.briefdescription {
        let block = render_description(brief, ctx);
        described = described || !block.is_empty();
        push_block(&mut lines, block);
    }
    if let Some(detailed) = &compound.detaileddescription {
        let block = render_description(detailed, ctx);
        described = described || !block.is_empty();
        push_block(&mut lines, block);
    }
    if !described {
        push_block(&mut lines, missing_description_placeholder(ctx));
    }

    push_block(&mut lines, inner_index(compound, ctx));

    for section in categorize_sections(compound) {
        push_block(
            &mut lines,
            vec![heading(2, section.category.heading(), ctx.mode)],
        );
        for member in section.members {
            push_block(
                &mut lines,
                render_member(member, compound.language.as_deref(), ctx),
            );
        }
    }

    if let Some(listing) = &compound.listing {
        push_block(&mut lines, vec![heading(2, "Source", ctx.mode)]);
        push_block(
            &mut lines,
            crate::render::render_block(
                &crate::model::doc::DocNode::ProgramListing(listing.clone()),
                ctx,
            ),
        );
    }

    push_block(&mut lines, generated_from_footer(ctx));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
