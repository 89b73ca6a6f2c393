//! Mode-specific escaping, applied at the literal-text leaf level only.
//!
//! Renderers must never escape already-rendered output; double escaping is a
//! bug the tests below guard against.

use crate::render::OutputMode;

/// Escape for HTML output. Braces are included because the MDX pipeline
/// treats them as expression delimiters even inside HTML fragments.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for Markdown/MDX output: HTML-significant characters become
/// entities and Markdown-significant ones get a backslash.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '*' | '_' | '~' | '[' | ']' | '`' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape a literal text run for the given mode. Plain mode preserves the
/// text verbatim.
pub fn escape_for(mode: OutputMode, text: &str) -> String {
    match mode {
        OutputMode::Plain => text.to_string(),
        OutputMode::Markdown => escape_markdown(text),
        OutputMode::Html => escape_html(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn html_escapes_markup_and_braces() {
        assert_eq!(
            escape_html(r#"a < b & {c} "d""#),
            "a &lt; b &amp; &#123;c&#125; &quot;d&quot;"
        );
    }

    #[test]
    fn markdown_adds_backslash_escapes() {
        assert_eq!(escape_markdown("x * y_z [a] `b`"), r"x \* y\_z \[a\] \`b\`");
        assert_eq!(escape_markdown("a & b < c"), "a &amp; b &lt; c");
        assert_eq!(
            escape_markdown(r#"say "hi" don't"#),
            "say &quot;hi&quot; don&#39;t"
        );
    }

    #[test]
    fn plain_mode_is_identity() {
        let s = "raw <text> & *stars*";
        assert_eq!(escape_for(OutputMode::Plain, s), s);
    }

    proptest! {
        #[test]
        fn escaping_clean_text_is_identity(s in "[a-zA-Z0-9 .,:;()!?-]*") {
            prop_assert_eq!(escape_markdown(&s), s.clone());
            prop_assert_eq!(escape_html(&s), s);
        }

        #[test]
        fn escaped_output_has_no_bare_specials(s in ".*") {
            let escaped = escape_html(&s);
            // Every remaining '&' must start an entity we emitted.
            for (i, c) in escaped.char_indices() {
                if c == '<' || c == '>' {
                    prop_assert!(false, "bare '{}' at {}", c, i);
                }
            }
        }
    }
}
