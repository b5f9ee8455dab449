//! Message and conversation-list rendering.
//!
//! Converts API records into HTML fragments. A message fragment is assembled
//! in a fixed order, with every optional section omitted when its source is
//! empty:
//!
//! 1. sender header (always)
//! 2. Markdown body
//! 3. attachments
//! 4. code blocks
//! 5. tool outputs
//!
//! Two escaping regimes meet here. The Markdown body is emitted exactly as
//! the Markdown renderer produces it (message text is trusted). Everything
//! sourced from a structured field goes through [`escape_angle_brackets`]
//! because it is spliced in as raw markup.

use std::time::Instant;

use tracing::{debug, trace};

use super::markdown::render_markdown;
use super::template::{escape_angle_brackets, html_escape};
use crate::model::{Attachment, CodeBlock, ConversationSummary, Message, ToolData, ToolOutput};

const DEFAULT_TOOL_NAME: &str = "Tool";
const DEFAULT_TOOL_STATUS: &str = "N/A";

/// Render one message to an HTML fragment. Pure and deterministic.
pub fn render_message(message: &Message) -> String {
    let started = Instant::now();
    trace!(
        component = "renderer",
        operation = "render_message",
        message_id = message.id.as_str(),
        sender = message.sender.as_str(),
        attachments = message.attachments.len(),
        code_blocks = message.code_blocks.len(),
        tool_outputs = message.tool_outputs.len(),
        "Rendering message"
    );

    let mut html = String::with_capacity(512);
    html.push_str(&format!(
        "<div class=\"message {}\">\n",
        html_escape(message.sender.as_str())
    ));
    html.push_str(&format!(
        "<div class=\"sender\">{} (ID: {})</div>\n",
        escape_angle_brackets(&message.sender.label()),
        escape_angle_brackets(&message.id)
    ));

    if let Some(text) = message.body() {
        html.push_str("<div class=\"content\">");
        html.push_str(&render_markdown(text));
        html.push_str("</div>\n");
    }
    if !message.attachments.is_empty() {
        html.push_str(&render_attachments(&message.attachments));
    }
    if !message.code_blocks.is_empty() {
        html.push_str(&render_code_blocks(&message.code_blocks));
    }
    if !message.tool_outputs.is_empty() {
        html.push_str(&render_tool_outputs(&message.tool_outputs));
    }
    html.push_str("</div>\n");

    trace!(
        component = "renderer",
        operation = "render_message_complete",
        message_id = message.id.as_str(),
        duration_us = started.elapsed().as_micros(),
        bytes = html.len(),
        "Message rendered"
    );
    html
}

/// Render messages top-to-bottom in the order given.
pub fn render_messages(messages: &[Message]) -> String {
    let started = Instant::now();
    let mut html = String::with_capacity(messages.len() * 1024);
    for message in messages {
        html.push_str(&render_message(message));
    }
    debug!(
        component = "renderer",
        operation = "render_messages",
        message_count = messages.len(),
        duration_ms = started.elapsed().as_millis(),
        bytes = html.len(),
        "Messages rendered"
    );
    html
}

fn render_attachments(attachments: &[Attachment]) -> String {
    let mut html = String::from("<div class=\"attachments\"><h4>Attachments:</h4><ul>\n");
    for att in attachments {
        let name = escape_angle_brackets(&att.name);
        let kind = escape_angle_brackets(&att.kind);
        match &att.path {
            Some(path) => html.push_str(&format!(
                "<li>{name} <span class=\"attachment-path\">({kind}: {})</span></li>\n",
                escape_angle_brackets(path)
            )),
            None => html.push_str(&format!("<li>{name} ({kind})</li>\n")),
        }
    }
    html.push_str("</ul></div>\n");
    html
}

fn render_code_blocks(blocks: &[CodeBlock]) -> String {
    let mut html = String::new();
    for block in blocks {
        trace!(
            component = "renderer",
            operation = "render_code_block",
            language = block.language.as_deref().unwrap_or(""),
            lines = block.content.lines().count(),
            "Rendering code block"
        );
        let lang_class = match block.language.as_deref() {
            Some(lang) if !lang.is_empty() => {
                format!(" class=\"language-{}\"", html_escape(lang))
            }
            _ => String::new(),
        };
        html.push_str(&format!(
            "<pre><code{lang_class}>{}</code></pre>\n",
            escape_angle_brackets(&block.content)
        ));
        if let Some(uri) = &block.uri_path {
            html.push_str(&format!(
                "<div class=\"attachment-path\">Source: {}</div>\n",
                escape_angle_brackets(uri)
            ));
        }
    }
    html
}

fn render_tool_outputs(outputs: &[ToolOutput]) -> String {
    let mut html = String::from("<div class=\"tool-outputs\"><h4>Tool Outputs:</h4><ul>\n");
    for output in outputs {
        html.push_str("<li>\n");
        html.push_str(&format!(
            "<span class=\"tool-output-name\">{}</span>\n",
            escape_angle_brackets(&tool_label(output))
        ));
        if let Some(data) = &output.data {
            html.push_str(&format!(
                "<pre><code>{}</code></pre>\n",
                escape_angle_brackets(&format_tool_data(data))
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul></div>\n");
    html
}

/// "name (Status: status)", with defaults for missing or empty fields.
fn tool_label(output: &ToolOutput) -> String {
    let name = output
        .tool_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_TOOL_NAME);
    let status = output
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_TOOL_STATUS);
    format!("{name} (Status: {status})")
}

/// Display text for a tool payload: structured values are pretty-printed
/// with two-space indentation, scalars are shown as-is.
fn format_tool_data(data: &ToolData) -> String {
    match data {
        ToolData::Scalar(text) => text.clone(),
        ToolData::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Render the selectable conversation rows, marking `active_id` if present.
pub fn render_conversation_list(
    summaries: &[ConversationSummary],
    active_id: Option<&str>,
) -> String {
    let mut html = String::with_capacity(summaries.len() * 160 + 16);
    html.push_str("<ul>\n");
    for summary in summaries {
        let active = if active_id == Some(summary.id.as_str()) {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<li data-conversation-id=\"{}\"{active}><span class=\"title\">{}</span> <span class=\"count\">{} messages</span></li>\n",
            html_escape(&summary.id),
            escape_angle_brackets(&summary.title),
            summary.message_count
        ));
    }
    html.push_str("</ul>\n");
    html
}
