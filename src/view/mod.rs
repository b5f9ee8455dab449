//! The two cooperating views and the state they share.
//!
//! `ConversationListView` owns selection and dispatches to
//! `ConversationDetailView`; both read and write the same [`ViewState`]
//! through a [`SharedViewState`] handle. The lock is never held across a
//! fetch.

pub mod detail;
pub mod list;
pub mod pane;
pub mod state;

pub use detail::{ConversationDetailView, LoadStatus};
pub use list::ConversationListView;
pub use pane::{Pane, ScrollPosition};
pub use state::{DetailState, ListState, LoadTicket, SharedViewState, ViewState};
