pub mod api;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod render;
pub mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use api::{ConversationApi, HttpApi};
use config::ViewerConfig;
use render::{PageView, render_page};
use view::{ConversationDetailView, ConversationListView, SharedViewState, ViewState};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "chat-viewer",
    version,
    about = "Render archived assistant conversations from a conversation API as HTML"
)]
pub struct Cli {
    /// API origin serving /api/conversations (overrides config and env)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the conversation list pane
    List,
    /// Print the message pane for one conversation
    Show {
        /// Conversation id
        id: String,

        /// Heading to display instead of "Conversation <id>"
        #[arg(long)]
        title: Option<String>,
    },
    /// Render the full page with both panes
    Page {
        /// Conversation to select after the list loads
        #[arg(long)]
        select: Option<String>,

        /// Write the page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Document title
        #[arg(long, default_value = "Chat Viewer")]
        page_title: String,
    },
    /// Write every conversation as static HTML
    Export {
        /// Directory to write into (created if missing)
        #[arg(long)]
        dir: PathBuf,

        /// One combined page instead of an index plus a page per conversation
        #[arg(long)]
        single_page: bool,

        /// Heading of the index page
        #[arg(long, default_value = "Chat History")]
        page_title: String,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// The wired-up views for one page session.
pub struct Viewer {
    pub state: SharedViewState,
    pub list: ConversationListView,
}

impl Viewer {
    /// Build both views around one fresh state object.
    pub fn new(api: Arc<dyn ConversationApi>) -> Self {
        let state = ViewState::new().shared();
        let detail = ConversationDetailView::new(api.clone(), state.clone());
        let list = ConversationListView::new(api, state.clone(), detail);
        Self { state, list }
    }

    pub fn detail(&self) -> &ConversationDetailView {
        self.list.detail()
    }

    /// Page load: fetch the list, then optionally select a conversation.
    ///
    /// An id missing from the list is still loaded directly, without a
    /// highlighted row.
    pub async fn bootstrap(&self, select: Option<&str>) {
        self.list.fetch_and_render().await;
        if let Some(id) = select
            && self.list.select(id).await.is_none()
        {
            self.detail().load(id, None).await;
        }
    }

    pub fn render_page(&self, page_title: &str) -> String {
        let state = self.state.lock();
        render_page(&PageView {
            page_title,
            list: state.list_pane(),
            conversation_title: state.conversation_title(),
            messages: state.detail_pane(),
        })
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref()).context("initializing logging")?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        built = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown"),
        "chat-viewer starting"
    );

    match cli.command {
        Commands::List => {
            let viewer = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            viewer.list.fetch_and_render().await;
            let html = viewer.state.lock().list_pane().html().to_string();
            write_output(None, &html).await
        }
        Commands::Show { id, title } => {
            let viewer = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            viewer.detail().load(&id, title.as_deref()).await;
            let html = viewer.state.lock().detail_pane().html().to_string();
            write_output(None, &html).await
        }
        Commands::Page {
            select,
            output,
            page_title,
        } => {
            let viewer = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            viewer.bootstrap(select.as_deref()).await;
            let html = viewer.render_page(&page_title);
            write_output(output.as_deref(), &html).await
        }
        Commands::Export {
            dir,
            single_page,
            page_title,
        } => {
            let viewer = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            let options = export::ExportOptions {
                dir,
                single_page,
                page_title,
            };
            let report = export::export(&viewer, &options).await?;
            let summary = format!(
                "Exported {} conversations ({} failed) to {}\n",
                report.conversations,
                report.failed.len(),
                options.dir.display()
            );
            write_output(None, &summary).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "chat-viewer", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Resolve configuration and wire the views to the HTTP API.
fn connect(config_path: Option<&Path>, base_url: Option<&str>) -> Result<Viewer> {
    let config = ViewerConfig::load(config_path, base_url).context("loading configuration")?;
    let api: Arc<dyn ConversationApi> = Arc::new(HttpApi::new(&config)?);
    Ok(Viewer::new(api))
}

async fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating output directory {}", parent.display()))?;
            }
            tokio::fs::write(path, html)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = html.len(), "Page written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(html.as_bytes())
                .await
                .context("writing to stdout")?;
            stdout.flush().await.context("flushing stdout")?;
        }
    }
    Ok(())
}
