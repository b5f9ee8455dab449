//! Static HTML export of every conversation.
//!
//! The list is fetched once, then each conversation is selected in turn
//! through the list view, so exported pages carry exactly the markup the
//! message pane would show (including error placeholders for conversations
//! that failed to load).
//!
//! Two layouts:
//! - multi-page: `index.html` linking to one `<id>.html` per conversation
//! - single page: `index_one_page.html` with an index and every conversation

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::Viewer;
use crate::model::ConversationSummary;
use crate::render::{escape_angle_brackets, html_escape, render_document};
use crate::view::{DetailState, ListState};
use crate::view::state::LIST_EMPTY;

pub const INDEX_FILE: &str = "index.html";
pub const SINGLE_PAGE_FILE: &str = "index_one_page.html";

const FALLBACK_STEM: &str = "conversation";

/// Reserved filenames on Windows.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Error loading conversations: {0}")]
    List(String),

    #[error("Failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub dir: PathBuf,
    pub single_page: bool,
    /// Heading of the index and `<title>` of the index document.
    pub page_title: String,
}

/// What an export run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
    pub conversations: usize,
    /// Ids whose load ended in an error placeholder.
    pub failed: Vec<String>,
}

/// One conversation as the message pane showed it after its load settled.
#[derive(Debug, Clone)]
pub struct ExportedConversation {
    pub summary: ConversationSummary,
    /// File stem, unique within one export.
    pub stem: String,
    pub heading: String,
    pub body: String,
    pub failed: bool,
}

/// Fetch the list, load each conversation and write the export.
pub async fn export(
    viewer: &Viewer,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    let conversations = collect(viewer).await?;

    tokio::fs::create_dir_all(&options.dir)
        .await
        .map_err(|source| ExportError::CreateDir {
            path: options.dir.clone(),
            source,
        })?;

    let documents = if options.single_page {
        vec![(
            SINGLE_PAGE_FILE.to_string(),
            render_document(
                &options.page_title,
                &single_page_body(&options.page_title, &conversations),
            ),
        )]
    } else {
        let mut docs = Vec::with_capacity(conversations.len() + 1);
        docs.push((
            INDEX_FILE.to_string(),
            render_document(
                &options.page_title,
                &index_body(&options.page_title, &conversations),
            ),
        ));
        for conversation in &conversations {
            docs.push((
                format!("{}.html", conversation.stem),
                render_document(&conversation.heading, &conversation_body(conversation)),
            ));
        }
        docs
    };

    let mut report = ExportReport {
        files: Vec::with_capacity(documents.len()),
        conversations: conversations.len(),
        failed: conversations
            .iter()
            .filter(|c| c.failed)
            .map(|c| c.summary.id.clone())
            .collect(),
    };
    for (name, html) in documents {
        let path = options.dir.join(name);
        write_file(&path, &html).await?;
        report.files.push(path);
    }

    info!(
        component = "export",
        operation = "export",
        dir = %options.dir.display(),
        conversations = report.conversations,
        failed = report.failed.len(),
        files = report.files.len(),
        "Export complete"
    );
    Ok(report)
}

/// Load every listed conversation in list order and snapshot its pane.
pub async fn collect(viewer: &Viewer) -> Result<Vec<ExportedConversation>, ExportError> {
    if let ListState::Failed { message } = viewer.list.fetch_and_render().await {
        return Err(ExportError::List(message));
    }
    let summaries = viewer.state.lock().summaries().to_vec();

    let mut used = HashSet::from([
        stem_of(INDEX_FILE).to_string(),
        stem_of(SINGLE_PAGE_FILE).to_string(),
    ]);
    let mut conversations = Vec::with_capacity(summaries.len());
    for summary in summaries {
        viewer.list.select(&summary.id).await;

        let (heading, body, failed) = {
            let state = viewer.state.lock();
            let failed = matches!(
                state.detail(),
                DetailState::NotFound | DetailState::Failed { .. }
            );
            (
                state.conversation_title().to_string(),
                state.detail_pane().html().to_string(),
                failed,
            )
        };
        if failed {
            warn!(
                component = "export",
                conversation_id = summary.id.as_str(),
                "Conversation exported with an error placeholder"
            );
        }

        conversations.push(ExportedConversation {
            stem: unique_stem(&summary.id, &mut used),
            summary,
            heading,
            body,
            failed,
        });
    }
    Ok(conversations)
}

fn stem_of(file: &str) -> &str {
    file.trim_end_matches(".html")
}

/// Filesystem-safe stem for a conversation id.
///
/// ASCII alphanumerics and `-` are kept; runs of anything else (`_`
/// included) collapse to one `_`.
pub fn file_stem(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    let mut last_was_underscore = false;
    for c in id.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            stem.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            stem.push('_');
            last_was_underscore = true;
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else if RESERVED_NAMES.contains(&stem.to_ascii_uppercase().as_str()) {
        format!("{FALLBACK_STEM}_{stem}")
    } else {
        stem.to_string()
    }
}

/// `file_stem`, with a numeric suffix when it collides with one already used.
fn unique_stem(id: &str, used: &mut HashSet<String>) -> String {
    let base = file_stem(id);
    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

fn index_entries(conversations: &[ExportedConversation], href: impl Fn(&str) -> String) -> String {
    if conversations.is_empty() {
        return format!("<p class=\"placeholder\">{LIST_EMPTY}</p>\n");
    }
    let mut html = String::from("<ul class=\"export-index\">\n");
    for c in conversations {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <span class=\"count\">{} messages</span></li>\n",
            html_escape(&href(&c.stem)),
            escape_angle_brackets(&c.summary.title),
            c.summary.message_count
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn index_body(title: &str, conversations: &[ExportedConversation]) -> String {
    format!(
        "<h1>{}</h1>\n{}",
        escape_angle_brackets(title),
        index_entries(conversations, |stem| format!("{stem}.html"))
    )
}

fn conversation_body(conversation: &ExportedConversation) -> String {
    format!(
        "<nav><a href=\"{INDEX_FILE}\">&larr; All conversations</a></nav>\n<h2>{}</h2>\n<div class=\"message-list\">\n{}</div>\n",
        escape_angle_brackets(&conversation.heading),
        conversation.body
    )
}

fn single_page_body(title: &str, conversations: &[ExportedConversation]) -> String {
    let mut html = format!(
        "<h1>{}</h1>\n{}",
        escape_angle_brackets(title),
        index_entries(conversations, |stem| format!("#conversation-{stem}"))
    );
    html.push_str("<h2>All Conversations</h2>\n<div class=\"all-conversations\">\n");
    for c in conversations {
        html.push_str(&format!(
            "<section class=\"conversation\" id=\"conversation-{}\">\n<h2>{}</h2>\n{}</section>\n",
            html_escape(&c.stem),
            escape_angle_brackets(&c.heading),
            c.body
        ));
    }
    html.push_str("</div>\n");
    html
}

async fn write_file(path: &Path, html: &str) -> Result<(), ExportError> {
    tokio::fs::write(path, html)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
