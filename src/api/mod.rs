//! Read-only access to the conversation API.
//!
//! The views only talk to [`ConversationApi`]; [`HttpApi`] is the production
//! implementation over `reqwest`. Tests substitute an in-memory source.

mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ConversationDetail, ConversationSummary};

pub use client::HttpApi;

/// Failure of a single API call.
///
/// Display strings are what the views splice into their error placeholders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx status (other than a detail-endpoint 404).
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// 404 from the detail endpoint.
    #[error("Conversation not found or has no messages.")]
    NotFound,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The body did not decode as the expected JSON shape.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The two endpoints the views consume.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// `GET /api/conversations`
    async fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>>;

    /// `GET /api/conversations/{id}`
    async fn get_conversation(&self, id: &str) -> ApiResult<ConversationDetail>;
}
