//! Conversation list pane and selection dispatch.

use std::sync::Arc;

use tracing::{info, warn};

use super::detail::{ConversationDetailView, LoadStatus};
use super::state::{ListState, SharedViewState};
use crate::api::ConversationApi;

pub struct ConversationListView {
    api: Arc<dyn ConversationApi>,
    state: SharedViewState,
    detail: ConversationDetailView,
}

impl ConversationListView {
    pub fn new(
        api: Arc<dyn ConversationApi>,
        state: SharedViewState,
        detail: ConversationDetailView,
    ) -> Self {
        Self { api, state, detail }
    }

    /// Fetch the summaries and rebuild the list pane. Failures become an
    /// inline error placeholder; nothing is retried.
    pub async fn fetch_and_render(&self) -> ListState {
        self.state.lock().list_loading();

        let result = self.api.list_conversations().await;
        let mut state = self.state.lock();
        match result {
            Ok(summaries) => {
                info!(
                    component = "list_view",
                    operation = "fetch_and_render",
                    count = summaries.len(),
                    "Conversations loaded"
                );
                state.list_loaded(summaries);
            }
            Err(err) => {
                warn!(component = "list_view", error = %err, "Error fetching conversations");
                state.list_failed(&err);
            }
        }
        state.list().clone()
    }

    /// Select the row for `id`: highlight it and load its conversation.
    ///
    /// The highlight does not depend on whether the load succeeds. Returns
    /// `None` when no row has that id.
    pub async fn select(&self, id: &str) -> Option<LoadStatus> {
        let title = {
            let mut state = self.state.lock();
            let Some(title) = state.summary(id).map(|s| s.title.clone()) else {
                warn!(component = "list_view", conversation_id = id, "No such conversation row");
                return None;
            };
            state.set_active_row(id);
            title
        };
        Some(self.detail.load(id, Some(&title)).await)
    }

    pub fn detail(&self) -> &ConversationDetailView {
        &self.detail
    }
}
