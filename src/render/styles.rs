//! Inline CSS for the page shell.

use tracing::trace;

/// Palette shared by the list and message panes.
pub mod colors {
    /// Deep background - primary canvas color
    pub const BG_DEEP: &str = "#1a1b26";
    /// Elevated surface - sidebar, message cards
    pub const BG_SURFACE: &str = "#24283b";
    /// Hover and active rows
    pub const BG_HIGHLIGHT: &str = "#292e42";
    pub const BORDER: &str = "#3b4261";
    pub const BORDER_FOCUS: &str = "#7d91c8";
    pub const TEXT_PRIMARY: &str = "#c0caf5";
    pub const TEXT_MUTED: &str = "#696e9e";
    pub const ROLE_USER: &str = "#9ece6a";
    pub const ROLE_AGENT: &str = "#7aa2f7";
    pub const ROLE_TOOL: &str = "#ff9e64";
}

const COMPONENT_STYLES: &str = r#"
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
  line-height: 1.6;
  background: var(--bg-deep);
  color: var(--text-primary);
}
.container { display: flex; height: 100vh; }
.sidebar {
  width: 320px;
  overflow-y: auto;
  background: var(--bg-surface);
  border-right: 1px solid var(--border);
  padding: 0 12px;
}
#conversation-list ul { list-style: none; margin: 0; padding: 0; }
#conversation-list li {
  padding: 8px 10px;
  border-radius: 6px;
  cursor: pointer;
  display: flex;
  flex-direction: column;
}
#conversation-list li:hover { background: var(--bg-highlight); }
#conversation-list li.active {
  background: var(--bg-highlight);
  outline: 1px solid var(--border-focus);
}
#conversation-list .count { color: var(--text-muted); font-size: 0.85em; }
.main-content { flex: 1; display: flex; flex-direction: column; padding: 0 20px; }
#message-list { flex: 1; overflow-y: auto; padding-bottom: 20px; }
.placeholder { color: var(--text-muted); font-style: italic; }
.message {
  background: var(--bg-surface);
  border-left: 3px solid var(--border);
  border-radius: 6px;
  margin: 12px 0;
  padding: 10px 14px;
}
.message.user { border-left-color: var(--role-user); }
.message.assistant { border-left-color: var(--role-agent); }
.message.tool { border-left-color: var(--role-tool); }
.sender { font-weight: 600; margin-bottom: 6px; }
pre {
  background: var(--bg-deep);
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 12px;
  overflow: auto;
}
pre, code { font-family: "JetBrains Mono", ui-monospace, monospace; font-size: 0.9em; }
.attachment-path { color: var(--text-muted); font-size: 0.85em; }
.attachments h4, .tool-outputs h4 { margin: 8px 0 4px; }
.tool-output-name { font-weight: 600; }
table { border-collapse: collapse; }
th, td { border: 1px solid var(--border); padding: 4px 10px; }
.export { max-width: 960px; margin: 0 auto; padding: 0 20px 40px; }
.export a { color: var(--role-agent); text-decoration: none; }
.export a:hover { text-decoration: underline; }
.export-index { padding-left: 1.2em; }
.export-index .count { color: var(--text-muted); font-size: 0.85em; }
.conversation { border-top: 1px solid var(--border); margin-top: 24px; }
"#;

/// Generate the stylesheet embedded in the page shell.
pub fn generate_styles() -> String {
    let root = format!(
        ":root {{\n  --bg-deep: {};\n  --bg-surface: {};\n  --bg-highlight: {};\n  --border: {};\n  --border-focus: {};\n  --text-primary: {};\n  --text-muted: {};\n  --role-user: {};\n  --role-agent: {};\n  --role-tool: {};\n}}",
        colors::BG_DEEP,
        colors::BG_SURFACE,
        colors::BG_HIGHLIGHT,
        colors::BORDER,
        colors::BORDER_FOCUS,
        colors::TEXT_PRIMARY,
        colors::TEXT_MUTED,
        colors::ROLE_USER,
        colors::ROLE_AGENT,
        colors::ROLE_TOOL,
    );
    let css = format!("{root}\n{COMPONENT_STYLES}");
    trace!(component = "styles", operation = "generate", bytes = css.len(), "Generated CSS");
    css
}
