//! Markdown to HTML for message bodies.
//!
//! Configured the way archived chat logs expect: a single newline is a line
//! break, GitHub-style tables/strikethrough/task lists are on, quotes and
//! dashes are typographically substituted, and raw HTML is passed through
//! untouched. Message text is treated as trusted content; nothing here
//! sanitizes it.

use pulldown_cmark::{Event, Options, Parser, html};

fn markdown_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_SMART_PUNCTUATION);
    opts
}

/// Render Markdown `text` to an HTML string.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_emphasized() {
        assert_eq!(render_markdown("**hi**"), "<p><strong>hi</strong></p>\n");
    }

    #[test]
    fn single_newline_becomes_line_break() {
        let html = render_markdown("first\nsecond");
        assert!(html.contains("first<br />"), "{html}");
        assert!(html.contains("second"));
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn punctuation_is_substituted() {
        let html = render_markdown("\"quoted\" -- wait...");
        assert!(html.contains('\u{201c}'), "{html}");
        assert!(html.contains('\u{2013}'));
        assert!(html.contains('\u{2026}'));
    }

    #[test]
    fn raw_html_is_not_stripped() {
        let html = render_markdown("a <kbd>Ctrl</kbd> key");
        assert!(html.contains("<kbd>Ctrl</kbd>"), "{html}");
    }

    #[test]
    fn fenced_code_is_escaped_by_markdown() {
        let html = render_markdown("```rust\nlet v: Vec<u8> = vec![];\n```");
        assert!(html.contains("language-rust"));
        assert!(html.contains("Vec&lt;u8&gt;"), "{html}");
    }
}
