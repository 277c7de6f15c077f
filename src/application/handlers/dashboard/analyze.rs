//! DashboardSession - the dashboard's analyze controller.
//!
//! Owns the session's [`DashboardState`] and drives it through the reducer:
//! local validation, one gateway call per submit, and substitution of the
//! fallback scorer whenever the gateway reply is unusable.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::adapters::gateway::HttpAnalysisGateway;
use crate::config::DashboardConfig;
use crate::domain::analysis::{fallback_score, AnalysisRequest, AnalysisResult, ProviderKind};
use crate::domain::dashboard::{
    AnalysisView, DashboardEvent, DashboardState, ResultSource, Transition,
};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::ports::{AnalysisGateway, GatewayCallError};

/// Message shown when the user submits blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze.";

/// One user's dashboard session.
pub struct DashboardSession {
    gateway: Arc<dyn AnalysisGateway>,
    state: Mutex<DashboardState>,
}

impl DashboardSession {
    pub fn new(gateway: Arc<dyn AnalysisGateway>, provider: ProviderKind) -> Self {
        Self {
            gateway,
            state: Mutex::new(DashboardState::new(provider)),
        }
    }

    /// Session talking to `config.gateway_url` with `config.default_provider` preselected.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, GatewayCallError> {
        let gateway = HttpAnalysisGateway::from_config(config)?;
        info!(
            gateway_url = %config.gateway_url,
            provider = %config.default_provider,
            "Dashboard session created"
        );
        Ok(Self::new(Arc::new(gateway), config.default_provider))
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.lock().clone()
    }

    /// Changes the provider used by subsequent submits.
    pub fn select_provider(&self, provider: ProviderKind) {
        // ProviderSelected is accepted in every state.
        let _ = self.lock().apply(DashboardEvent::ProviderSelected { provider });
        info!(%provider, "Provider selected");
    }

    /// Analyzes `raw_text`, falling back to the local scorer on any gateway failure.
    ///
    /// Blank input is rejected without a network call; while another request
    /// is outstanding the rejection leaves the screen alone. If a newer submit
    /// starts before this one finishes, the result is still returned but the
    /// dashboard keeps showing the newer request.
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            let transition = self.lock().apply(DashboardEvent::Rejected {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            })?;
            match transition {
                Transition::IgnoredWhileBusy { in_flight } => {
                    debug!(%in_flight, "Blank input ignored while analyzing")
                }
                _ => debug!("Rejected blank input"),
            }
            return Err(ValidationError::empty_field("text"));
        }

        let started_at = Timestamp::now();
        let (ticket, provider) = {
            let mut state = self.lock();
            let ticket = state.next_ticket();
            let provider = state.provider();
            let transition = state.apply(DashboardEvent::Submitted {
                ticket,
                at: started_at,
            })?;
            if let Transition::Superseded { previous } = transition {
                debug!(%previous, %ticket, "Superseded in-flight analysis");
            }
            (ticket, provider)
        };

        let request = AnalysisRequest::new(text, provider)?;
        let (result, source) = match self.gateway.analyze(&request).await {
            Ok(data) => match AnalysisResult::from_gateway_data(&data) {
                Ok(result) => (result, ResultSource::Remote),
                Err(err) => {
                    warn!(%ticket, %provider, error = %err, "Unusable gateway reply, using fallback scorer");
                    (fallback_score(text), ResultSource::Fallback)
                }
            },
            Err(err) => {
                warn!(%ticket, %provider, error = %err, "Gateway call failed, using fallback scorer");
                (fallback_score(text), ResultSource::Fallback)
            }
        };

        let completed_at = Timestamp::now();
        let elapsed_ms = completed_at.duration_since(&started_at).num_milliseconds();
        let transition = self.lock().apply(DashboardEvent::Completed {
            ticket,
            analysis: AnalysisView {
                result: result.clone(),
                source,
                provider,
                completed_at,
            },
        })?;
        match transition {
            Transition::IgnoredStale { ticket } => {
                debug!(%ticket, elapsed_ms, "Dropped stale completion")
            }
            _ => debug!(%ticket, ?source, elapsed_ms, "Analysis displayed"),
        }

        Ok(result)
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::sample_analysis;
    use crate::domain::analysis::IMPROVED_PREFIX;
    use crate::domain::dashboard::DashboardStatus;
    use crate::ports::GatewayCallError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Gateway double replaying scripted replies, each after an optional delay.
    #[derive(Default)]
    struct ScriptedGateway {
        replies: Mutex<VecDeque<(Duration, Result<Value, GatewayCallError>)>>,
        requests: Mutex<Vec<AnalysisRequest>>,
    }

    impl ScriptedGateway {
        fn reply(self, reply: Result<Value, GatewayCallError>) -> Self {
            self.reply_after(Duration::ZERO, reply)
        }

        fn reply_after(self, delay: Duration, reply: Result<Value, GatewayCallError>) -> Self {
            self.replies.lock().unwrap().push_back((delay, reply));
            self
        }

        fn requests(&self) -> Vec<AnalysisRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisGateway for ScriptedGateway {
        async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, GatewayCallError> {
            self.requests.lock().unwrap().push(request.clone());
            let (delay, reply) = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected gateway call");
            tokio::time::sleep(delay).await;
            reply
        }
    }

    fn session(gateway: Arc<ScriptedGateway>) -> DashboardSession {
        DashboardSession::new(gateway, ProviderKind::OpenAI)
    }

    const SCENARIO: &str = "We are thrilled to announce our guys' update. Thanks team!";

    #[tokio::test]
    async fn blank_input_shows_message_without_call() {
        let gateway = Arc::new(ScriptedGateway::default());
        let session = session(gateway.clone());

        let err = session.analyze("   ").await.unwrap_err();

        assert_eq!(err, ValidationError::empty_field("text"));
        assert!(gateway.requests().is_empty());
        let state = session.state();
        assert_eq!(state.status(), DashboardStatus::Displayed);
        assert_eq!(state.displayed_error(), Some(EMPTY_INPUT_MESSAGE));
    }

    #[tokio::test]
    async fn remote_reply_is_displayed() {
        let data = Value::String(format!("```json\n{}\n```", sample_analysis()));
        let gateway = Arc::new(ScriptedGateway::default().reply(Ok(data)));
        let session = session(gateway.clone());

        let result = session.analyze("  Hello world  ").await.unwrap();

        assert_eq!(result.readability, 71.5);
        assert_eq!(gateway.requests()[0].text.as_str(), "Hello world");
        assert_eq!(gateway.requests()[0].provider, ProviderKind::OpenAI);
        let shown = session.state().displayed_analysis().cloned().unwrap();
        assert_eq!(shown.source, ResultSource::Remote);
        assert_eq!(shown.result, result);
    }

    #[tokio::test]
    async fn gateway_error_falls_back() {
        let gateway = Arc::new(ScriptedGateway::default().reply(Err(GatewayCallError::Upstream {
            status: 500,
            message: "provider unavailable".to_string(),
        })));
        let session = session(gateway);

        let result = session.analyze(SCENARIO).await.unwrap();

        assert_eq!(result, fallback_score(SCENARIO));
        let state = session.state();
        assert_eq!(state.status(), DashboardStatus::Displayed);
        assert_eq!(state.displayed_analysis().unwrap().source, ResultSource::Fallback);
    }

    #[tokio::test]
    async fn non_json_reply_falls_back() {
        let gateway = Arc::new(ScriptedGateway::default().reply(Ok(json!("I cannot help with that."))));
        let session = session(gateway);

        let result = session.analyze("Hey guys").await.unwrap();

        assert!(result.improved_text.starts_with(IMPROVED_PREFIX));
        assert_eq!(result.improved_text, "Improved (mock): Hey team");
    }

    #[tokio::test]
    async fn classifier_output_falls_back() {
        let native = json!([[{ "label": "POSITIVE", "score": 0.99 }]]);
        let gateway = Arc::new(ScriptedGateway::default().reply(Ok(native)));
        let session = session(gateway);

        let result = session.analyze("Great news").await.unwrap();

        assert_eq!(result, fallback_score("Great news"));
    }

    #[tokio::test]
    async fn selected_provider_is_sent() {
        let gateway = Arc::new(ScriptedGateway::default().reply(Ok(sample_analysis())));
        let session = session(gateway.clone());

        session.select_provider(ProviderKind::Llama);
        session.analyze("Hello").await.unwrap();

        assert_eq!(gateway.requests()[0].provider, ProviderKind::Llama);
        assert_eq!(
            session.state().displayed_analysis().unwrap().provider,
            ProviderKind::Llama
        );
    }

    #[tokio::test]
    async fn from_config_preselects_default_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_partial_json(json!({ "provider": "llama" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": sample_analysis() })))
            .expect(1)
            .mount(&server)
            .await;
        let config = DashboardConfig {
            gateway_url: server.uri(),
            default_provider: ProviderKind::Llama,
            timeout_secs: Some(5),
        };

        let session = DashboardSession::from_config(&config).unwrap();
        assert_eq!(session.state().provider(), ProviderKind::Llama);

        session.analyze("Hello").await.unwrap();

        let shown = session.state().displayed_analysis().cloned().unwrap();
        assert_eq!(shown.source, ResultSource::Remote);
        assert_eq!(shown.provider, ProviderKind::Llama);
    }

    #[tokio::test]
    async fn blank_input_while_analyzing_keeps_pending_result() {
        let gateway = Arc::new(
            ScriptedGateway::default().reply_after(Duration::from_millis(200), Ok(sample_analysis())),
        );
        let session = Arc::new(session(gateway.clone()));

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.analyze("Great launch").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(session.analyze("   ").await.is_err());
        assert_eq!(session.state().status(), DashboardStatus::Analyzing);

        pending.await.unwrap().unwrap();

        let state = session.state();
        assert_eq!(state.displayed_analysis().unwrap().source, ResultSource::Remote);
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn latest_submit_wins() {
        let slow = Value::String(sample_analysis().to_string());
        let gateway = Arc::new(
            ScriptedGateway::default()
                .reply_after(Duration::from_millis(200), Ok(slow))
                .reply(Err(GatewayCallError::Network("connection refused".to_string()))),
        );
        let session = Arc::new(session(gateway));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.analyze("first request").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = session.analyze("second request").await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert_eq!(first.readability, 71.5);
        assert_eq!(second, fallback_score("second request"));
        let shown = session.state().displayed_analysis().cloned().unwrap();
        assert_eq!(shown.result, second);
        assert_eq!(shown.source, ResultSource::Fallback);
    }
}
