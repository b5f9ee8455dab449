//! Message pane for the selected conversation.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::state::SharedViewState;
use crate::api::ConversationApi;

/// What a call to [`ConversationDetailView::load`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Conversation was already on screen; no request was made.
    Unchanged,
    /// The response (success or error) now owns the pane.
    Applied,
    /// A newer load was issued while this one was in flight.
    Superseded,
}

#[derive(Clone)]
pub struct ConversationDetailView {
    api: Arc<dyn ConversationApi>,
    state: SharedViewState,
}

impl ConversationDetailView {
    pub fn new(api: Arc<dyn ConversationApi>, state: SharedViewState) -> Self {
        Self { api, state }
    }

    /// Show conversation `id`, fetching its messages unless they are
    /// already rendered. Errors end up as placeholders in the pane.
    pub async fn load(&self, id: &str, title: Option<&str>) -> LoadStatus {
        let ticket = self.state.lock().begin_load(id, title);
        let Some(ticket) = ticket else {
            debug!(
                component = "detail_view",
                conversation_id = id,
                "Already rendered; not refetching"
            );
            return LoadStatus::Unchanged;
        };

        info!(
            component = "detail_view",
            operation = "load",
            conversation_id = id,
            generation = ticket.generation,
            "Loading conversation"
        );
        let started = Instant::now();
        let result = self.api.get_conversation(id).await;

        match &result {
            Ok(detail) => debug!(
                component = "detail_view",
                conversation_id = id,
                message_count = detail.messages.len(),
                duration_ms = started.elapsed().as_millis(),
                "Conversation fetched"
            ),
            Err(err) => warn!(
                component = "detail_view",
                conversation_id = id,
                error = %err,
                "Error fetching messages"
            ),
        }

        if self.state.lock().finish_load(&ticket, result) {
            LoadStatus::Applied
        } else {
            LoadStatus::Superseded
        }
    }
}
