//! HttpAnalysisGateway - reqwest client for the gateway's `/analyze` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::domain::analysis::AnalysisRequest;
use crate::ports::{AnalysisGateway, GatewayCallError};

pub struct HttpAnalysisGateway {
    client: Client,
    analyze_url: String,
}

/// Either half of the gateway's reply envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,
    error: Option<String>,
}

impl HttpAnalysisGateway {
    pub fn new(gateway_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayCallError> {
        let builder = match timeout {
            Some(timeout) => Client::builder().timeout(timeout),
            None => Client::builder(),
        };
        let client = builder
            .build()
            .map_err(|e| GatewayCallError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            analyze_url: format!("{}/analyze", gateway_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, GatewayCallError> {
        Self::new(&config.gateway_url, config.timeout())
    }
}

#[async_trait]
impl AnalysisGateway for HttpAnalysisGateway {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, GatewayCallError> {
        debug!(url = %self.analyze_url, provider = %request.provider, "Calling analysis gateway");

        let response = self
            .client
            .post(&self.analyze_url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayCallError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayCallError::Network(e.to_string()))?;
        let envelope = serde_json::from_str::<Envelope>(&body);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| body.trim().to_string());
            return Err(if status.as_u16() == 400 {
                GatewayCallError::Rejected(message)
            } else {
                GatewayCallError::Upstream {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        envelope
            .map_err(|e| GatewayCallError::Parse(e.to_string()))?
            .data
            .ok_or_else(|| GatewayCallError::Parse("reply has no data field".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ProviderKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("Hello team", ProviderKind::OpenAI).unwrap()
    }

    async fn gateway_replying(template: ResponseTemplate) -> (MockServer, HttpAnalysisGateway) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(template)
            .mount(&server)
            .await;
        let gateway = HttpAnalysisGateway::new(&server.uri(), None).unwrap();
        (server, gateway)
    }

    #[tokio::test]
    async fn posts_text_and_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_json(json!({ "text": "Hello team", "provider": "openai" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "{}" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = DashboardConfig {
            gateway_url: format!("{}/", server.uri()),
            ..DashboardConfig::default()
        };
        let gateway = HttpAnalysisGateway::from_config(&config).unwrap();
        let data = gateway.analyze(&request()).await.unwrap();

        assert_eq!(data, json!("{}"));
    }

    #[tokio::test]
    async fn server_error_is_upstream() {
        let (_server, gateway) = gateway_replying(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "provider unavailable" })),
        )
        .await;

        let err = gateway.analyze(&request()).await.unwrap_err();

        assert_eq!(
            err,
            GatewayCallError::Upstream {
                status: 500,
                message: "provider unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn bad_request_is_rejected() {
        let (_server, gateway) = gateway_replying(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing text" })),
        )
        .await;

        let err = gateway.analyze(&request()).await.unwrap_err();

        assert_eq!(err, GatewayCallError::Rejected("Missing text".to_string()));
    }

    #[tokio::test]
    async fn html_body_is_parse_error() {
        let (_server, gateway) =
            gateway_replying(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        let err = gateway.analyze(&request()).await.unwrap_err();

        assert!(matches!(err, GatewayCallError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_data_is_parse_error() {
        let (_server, gateway) =
            gateway_replying(ResponseTemplate::new(200).set_body_json(json!({ "ok": true }))).await;

        let err = gateway.analyze(&request()).await.unwrap_err();

        assert!(matches!(err, GatewayCallError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_network_error() {
        let gateway = HttpAnalysisGateway::new("http://127.0.0.1:1", None).unwrap();

        let err = gateway.analyze(&request()).await.unwrap_err();

        assert!(matches!(err, GatewayCallError::Network(_)));
    }
}
