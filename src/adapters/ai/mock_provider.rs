//! Mock analysis provider for testing.
//!
//! Lets gateway and dashboard tests run without reaching a hosted model.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAnalysisProvider::new(ProviderKind::OpenAI)
//!     .with_text(r#"{"readability": 72}"#)
//!     .with_error(ProviderError::unavailable("Server error 503: overloaded"));
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::ProviderKind;
use crate::ports::{
    AnalysisProvider, ProviderError, ProviderInfo, ProviderRequest, RawProviderResponse,
};

/// Mock provider with a queue of canned replies.
///
/// Clones share the queue and the call history.
#[derive(Debug, Clone)]
pub struct MockAnalysisProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<ProviderRequest>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(RawProviderResponse),
    Error(ProviderError),
}

/// Well-formed analysis JSON returned once the queue is exhausted.
pub fn sample_analysis() -> Value {
    json!({
        "sentiment": { "label": "POSITIVE", "score": 0.82 },
        "readability": 71.5,
        "tone": { "formality": 0.55, "confidence": 0.7, "positivity": 0.82 },
        "inclusivity": { "score": 1.0, "issues": [] },
        "improvedText": "We are delighted to share our news."
    })
}

impl MockAnalysisProvider {
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new(kind, "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues generated text (as a chat model would return).
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(MockResponse::Success(RawProviderResponse::Text(text.into())))
    }

    /// Queues a native JSON reply (as a classifier would return).
    pub fn with_json(self, value: Value) -> Self {
        self.push(MockResponse::Success(RawProviderResponse::Json(value)))
    }

    /// Queues an error.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<ProviderRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                MockResponse::Success(RawProviderResponse::Text(sample_analysis().to_string()))
            })
    }
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(raw) => Ok(raw),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
