//! Single-owner view state shared by the list and detail views.
//!
//! Every mutation goes through a named transition so the state machine can be
//! driven and inspected without any HTTP or page in the loop:
//!
//! ```text
//! Empty / Rendered / NotFound / Failed --begin_load--> Loading
//! Loading --finish_load(ok, 0 msgs)-->  Rendered { message_count: 0 }
//! Loading --finish_load(ok, n msgs)-->  Rendered { message_count: n }
//! Loading --finish_load(404)-------->   NotFound
//! Loading --finish_load(other err)-->   Failed
//! ```
//!
//! Each `begin_load` stamps a new generation; `finish_load` only applies a
//! result whose generation is still the latest, so the last issued request
//! wins regardless of response order.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::pane::Pane;
use crate::api::{ApiError, ApiResult};
use crate::model::{ConversationDetail, ConversationSummary};
use crate::render::{render_conversation_list, render_message};

pub const LIST_LOADING: &str = "Loading conversations...";
pub const LIST_EMPTY: &str = "No conversations found.";
pub const DETAIL_HINT: &str = "Select a conversation to view its messages.";
pub const DETAIL_LOADING: &str = "Loading messages...";
pub const DETAIL_EMPTY: &str = "No messages in this conversation.";
pub const DEFAULT_HEADING: &str = "Select a conversation";

/// Handle given to both views at construction.
pub type SharedViewState = Arc<Mutex<ViewState>>;

/// State of the conversation list pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded {
        count: usize,
    },
    Failed {
        message: String,
    },
}

/// State of the message pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Empty,
    Loading {
        generation: u64,
    },
    /// `message_count == 0` is the "no messages" placeholder.
    Rendered {
        message_count: usize,
    },
    NotFound,
    Failed {
        message: String,
    },
}

impl DetailState {
    /// True when the pane holds real rendered messages.
    pub fn shows_messages(&self) -> bool {
        matches!(self, DetailState::Rendered { message_count } if *message_count > 0)
    }
}

/// Proof that a detail load was issued; required to apply its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub conversation_id: String,
    pub generation: u64,
}

#[derive(Debug)]
pub struct ViewState {
    summaries: Vec<ConversationSummary>,
    list: ListState,
    active_row: Option<String>,
    list_pane: Pane,

    active_conversation_id: Option<String>,
    conversation_title: String,
    detail: DetailState,
    detail_pane: Pane,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        let mut detail_pane = Pane::new();
        detail_pane.show_placeholder(DETAIL_HINT);
        Self {
            summaries: Vec::new(),
            list: ListState::Idle,
            active_row: None,
            list_pane: Pane::new(),
            active_conversation_id: None,
            conversation_title: DEFAULT_HEADING.to_string(),
            detail: DetailState::Empty,
            detail_pane,
            generation: 0,
        }
    }

    /// Wrap in the shared handle passed to the views.
    pub fn shared(self) -> SharedViewState {
        Arc::new(Mutex::new(self))
    }

    // ------------------------------------------------------------------
    // List transitions
    // ------------------------------------------------------------------

    pub fn list_loading(&mut self) {
        self.list = ListState::Loading;
        self.list_pane.show_placeholder(LIST_LOADING);
    }

    /// Replace the summaries wholesale and rebuild the rows.
    pub fn list_loaded(&mut self, summaries: Vec<ConversationSummary>) {
        self.list = ListState::Loaded {
            count: summaries.len(),
        };
        self.summaries = summaries;
        if self
            .active_row
            .as_deref()
            .is_some_and(|id| !self.summaries.iter().any(|s| s.id == id))
        {
            self.active_row = None;
        }
        self.rebuild_list_pane();
    }

    pub fn list_failed(&mut self, err: &ApiError) {
        let message = err.to_string();
        self.list_pane
            .show_placeholder(&format!("Error loading conversations: {message}"));
        self.list = ListState::Failed { message };
    }

    /// Highlight exactly one row. Returns false if `id` is not listed.
    pub fn set_active_row(&mut self, id: &str) -> bool {
        if !self.summaries.iter().any(|s| s.id == id) {
            return false;
        }
        self.active_row = Some(id.to_string());
        self.rebuild_list_pane();
        true
    }

    fn rebuild_list_pane(&mut self) {
        if self.summaries.is_empty() {
            self.list_pane.show_placeholder(LIST_EMPTY);
        } else {
            self.list_pane.replace(render_conversation_list(
                &self.summaries,
                self.active_row.as_deref(),
            ));
        }
    }

    // ------------------------------------------------------------------
    // Detail transitions
    // ------------------------------------------------------------------

    /// Start loading `id`, or return `None` when that conversation is already
    /// on screen with real messages.
    pub fn begin_load(&mut self, id: &str, title: Option<&str>) -> Option<LoadTicket> {
        if self.active_conversation_id.as_deref() == Some(id) && self.detail.shows_messages() {
            trace!(
                component = "view_state",
                conversation_id = id,
                "Conversation already rendered; skipping load"
            );
            return None;
        }

        self.generation += 1;
        self.active_conversation_id = Some(id.to_string());
        self.conversation_title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!("Conversation {id}"),
        };
        self.detail = DetailState::Loading {
            generation: self.generation,
        };
        self.detail_pane.show_placeholder(DETAIL_LOADING);

        Some(LoadTicket {
            conversation_id: id.to_string(),
            generation: self.generation,
        })
    }

    /// Whether `ticket` is still the most recently issued load.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a load result. Returns false (and changes nothing) if a newer
    /// load has been issued since `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: ApiResult<ConversationDetail>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                component = "view_state",
                conversation_id = ticket.conversation_id.as_str(),
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale load result"
            );
            return false;
        }

        match result {
            Ok(detail) if detail.messages.is_empty() => {
                self.detail = DetailState::Rendered { message_count: 0 };
                self.detail_pane.show_placeholder(DETAIL_EMPTY);
            }
            Ok(detail) => {
                self.detail_pane.clear();
                for message in &detail.messages {
                    self.detail_pane.append(&render_message(message));
                }
                self.detail_pane.scroll_to_bottom();
                self.detail = DetailState::Rendered {
                    message_count: detail.messages.len(),
                };
            }
            Err(ApiError::NotFound) => {
                self.detail = DetailState::NotFound;
                self.detail_pane
                    .show_placeholder(&ApiError::NotFound.to_string());
            }
            Err(err) => {
                let message = err.to_string();
                self.detail_pane
                    .show_placeholder(&format!("Error loading messages: {message}"));
                self.detail = DetailState::Failed { message };
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn summaries(&self) -> &[ConversationSummary] {
        &self.summaries
    }

    pub fn summary(&self, id: &str) -> Option<&ConversationSummary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn active_row(&self) -> Option<&str> {
        self.active_row.as_deref()
    }

    pub fn list_pane(&self) -> &Pane {
        &self.list_pane
    }

    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    pub fn conversation_title(&self) -> &str {
        &self.conversation_title
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn detail_pane(&self) -> &Pane {
        &self.detail_pane
    }

    /// Generation of the most recently issued detail load.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
