//! `reqwest`-backed implementation of [`ConversationApi`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiError, ApiResult, ConversationApi};
use crate::config::ViewerConfig;
use crate::model::{ConversationDetail, ConversationSummary};

/// HTTP client for the conversation endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client from the resolved configuration.
    ///
    /// No timeout is applied unless one is configured; a hung request then
    /// leaves the pane loading indefinitely.
    pub fn new(config: &ViewerConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("building http client: {e}"))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self) -> String {
        format!("{}/api/conversations", self.base_url)
    }

    fn detail_url(&self, id: &str) -> String {
        format!(
            "{}/api/conversations/{}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    /// GET `url` and decode the body, returning the raw status on non-2xx.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchFailure> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchFailure::Api(ApiError::Network(e.to_string())))?;

        let status = response.status();
        debug!(
            component = "api",
            url,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis(),
            "Response received"
        );
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::Api(ApiError::Network(e.to_string())))?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(component = "api", url, error = %e, "Response body did not decode");
            FetchFailure::Api(ApiError::Parse(e.to_string()))
        })
    }
}

/// Internal result of a fetch before the endpoint decides how to map status.
enum FetchFailure {
    Status(StatusCode),
    Api(ApiError),
}

#[async_trait]
impl ConversationApi for HttpApi {
    async fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>> {
        self.get_json(&self.list_url())
            .await
            .map_err(|failure| match failure {
                FetchFailure::Status(status) => ApiError::Status(status.as_u16()),
                FetchFailure::Api(err) => err,
            })
    }

    async fn get_conversation(&self, id: &str) -> ApiResult<ConversationDetail> {
        self.get_json(&self.detail_url(id))
            .await
            .map_err(|failure| match failure {
                FetchFailure::Status(StatusCode::NOT_FOUND) => ApiError::NotFound,
                FetchFailure::Status(status) => ApiError::Status(status.as_u16()),
                FetchFailure::Api(err) => err,
            })
    }
}
