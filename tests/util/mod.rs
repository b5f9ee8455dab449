use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chat_viewer::api::{ApiError, ApiResult, ConversationApi};
use chat_viewer::model::{ConversationDetail, ConversationSummary};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

/// In-memory stand-in for the conversation API.
///
/// Records every request, and can hold a detail response back until its
/// gate is opened so tests can reorder overlapping loads.
#[allow(dead_code)]
pub struct FakeApi {
    summaries: Mutex<ApiResult<Vec<ConversationSummary>>>,
    details: Mutex<HashMap<String, ApiResult<ConversationDetail>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    list_calls: AtomicUsize,
    detail_calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new() -> Self {
        Self {
            summaries: Mutex::new(Ok(Vec::new())),
            details: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    /// Summaries from a JSON array in wire format.
    pub fn with_summaries(self, json: Value) -> Self {
        *self.summaries.lock() = Ok(serde_json::from_value(json).expect("summary fixture"));
        self
    }

    pub fn with_list_error(self, err: ApiError) -> Self {
        *self.summaries.lock() = Err(err);
        self
    }

    /// Detail body from a JSON object in wire format.
    pub fn with_detail(self, id: &str, json: Value) -> Self {
        let detail: ConversationDetail = serde_json::from_value(json).expect("detail fixture");
        self.details.lock().insert(id.to_string(), Ok(detail));
        self
    }

    pub fn with_detail_error(self, id: &str, err: ApiError) -> Self {
        self.details.lock().insert(id.to_string(), Err(err));
        self
    }

    pub fn set_detail(&self, id: &str, json: Value) {
        let detail: ConversationDetail = serde_json::from_value(json).expect("detail fixture");
        self.details.lock().insert(id.to_string(), Ok(detail));
    }

    /// Hold responses for `id` until the returned gate is notified.
    pub fn gate(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().insert(id.to_string(), gate.clone());
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().clone()
    }
}

#[async_trait]
impl ConversationApi for FakeApi {
    async fn list_conversations(&self) -> ApiResult<Vec<ConversationSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.summaries.lock().clone()
    }

    async fn get_conversation(&self, id: &str) -> ApiResult<ConversationDetail> {
        self.detail_calls.lock().push(id.to_string());
        let gate = self.gates.lock().get(id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.details
            .lock()
            .get(id)
            .cloned()
            .unwrap_or(Err(ApiError::NotFound))
    }
}

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

struct TestWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
