//! Page shell: the two panes wrapped in a standalone HTML document.

use std::time::Instant;

use tracing::debug;

use super::styles::generate_styles;
use crate::view::pane::{Pane, ScrollPosition};

/// Everything the page shell needs from the current view state.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// Document `<title>`.
    pub page_title: &'a str,
    pub list: &'a Pane,
    /// Heading above the message pane.
    pub conversation_title: &'a str,
    pub messages: &'a Pane,
}

/// Keeps a bottom-pinned pane scrolled to its newest content on load.
const SCROLL_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-scroll="bottom"]').forEach(function (el) {
    el.scrollTop = el.scrollHeight;
});
</script>"#;

/// Render the complete HTML document.
pub fn render_page(view: &PageView<'_>) -> String {
    let started = Instant::now();
    let scroll_attr = match view.messages.scroll() {
        ScrollPosition::Bottom => r#" data-scroll="bottom""#,
        ScrollPosition::Top => "",
    };

    let page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
<style>
{styles}
</style>
</head>
<body>
<div class="container">
<aside class="sidebar">
<h2>Conversations</h2>
<div id="conversation-list">
{list}
</div>
</aside>
<main class="main-content">
<h2 id="current-conversation-title">{conversation_title}</h2>
<div id="message-list"{scroll_attr}>
{messages}
</div>
</main>
</div>
{script}
</body>
</html>
"#,
        page_title = html_escape(view.page_title),
        styles = generate_styles(),
        list = view.list.html(),
        conversation_title = escape_angle_brackets(view.conversation_title),
        scroll_attr = scroll_attr,
        messages = view.messages.html(),
        script = SCROLL_SCRIPT,
    );

    debug!(
        component = "template",
        operation = "render_page",
        duration_ms = started.elapsed().as_millis(),
        bytes = page.len(),
        "Page rendered"
    );
    page
}

/// Wrap pre-rendered `body` markup in a standalone document with the shared
/// stylesheet. Used for exported pages, which have no live panes.
pub fn render_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{styles}
</style>
</head>
<body>
<main class="export">
{body}
</main>
</body>
</html>
"#,
        title = html_escape(title),
        styles = generate_styles(),
    )
}

/// Escape text for use inside an attribute value or free text.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Replace only `<` and `>` with entities.
///
/// Applied to every value that comes from a structured field (attachments,
/// code, tool payloads) before it is spliced into markup. Ampersands are left
/// alone so already-encoded entities in tool output survive.
pub fn escape_angle_brackets(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}
