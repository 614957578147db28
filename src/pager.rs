//! Trigger delivery to the external paging service

use std::time::Duration;

use serde::Serialize;

/// Fixed wire values of the trigger protocol
const EVENT_ACTION: &str = "trigger";
const SEVERITY: &str = "critical";
const SOURCE: &str = "slotwatch";

/// Summary text delivered with every page
pub const ALERT_SUMMARY: &str =
    "Vaccination slots available! Check the booking portal or run the watcher output now!";

/// Hard cap on a single trigger delivery
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Trigger event envelope accepted by the paging endpoint
#[derive(Debug, Serialize)]
pub struct TriggerEvent<'a> {
    routing_key: &'a str,
    event_action: &'a str,
    payload: TriggerPayload<'a>,
}

#[derive(Debug, Serialize)]
struct TriggerPayload<'a> {
    summary: &'a str,
    severity: &'a str,
    source: &'a str,
}

impl<'a> TriggerEvent<'a> {
    pub fn new(routing_key: &'a str, summary: &'a str) -> Self {
        Self {
            routing_key,
            event_action: EVENT_ACTION,
            payload: TriggerPayload {
                summary,
                severity: SEVERITY,
                source: SOURCE,
            },
        }
    }
}

/// Client for firing trigger events at the paging endpoint
#[derive(Debug, Clone)]
pub struct PagerClient {
    http_client: reqwest::Client,
    endpoint_url: String,
}

impl PagerClient {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint_url: endpoint_url.into(),
        }
    }

    /// Fire one trigger event.
    ///
    /// Returns the raw response body; the paging service sends no structured
    /// ack worth modelling, the body only matters for diagnostics. A
    /// non-success status is logged but still yields the body, since the
    /// service reports dedup and routing problems there.
    pub async fn trigger(&self, routing_key: &str, summary: &str) -> Result<String, SendError> {
        let url: reqwest::Url = self
            .endpoint_url
            .parse()
            .map_err(|e| SendError::Url(format!("{e}")))?;

        let event = TriggerEvent::new(routing_key, summary);
        let response = self
            .http_client
            .post(url)
            .json(&event)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SendError::Body(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %body, "Paging endpoint returned non-success status");
        }

        Ok(body)
    }
}

/// Trigger delivery errors
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Invalid paging endpoint URL: {0}")]
    Url(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unreadable response body: {0}")]
    Body(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_trigger_event_serialization() {
        let event = TriggerEvent::new("abc", "slots open");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""routing_key":"abc""#));
        assert!(json.contains(r#""event_action":"trigger""#));
        assert!(json.contains(r#""severity":"critical""#));
        assert!(json.contains(r#""summary":"slots open""#));
        assert!(json.contains(r#""source":"slotwatch""#));
    }

    #[tokio::test]
    async fn test_trigger_posts_event_and_returns_ack_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/enqueue"))
            .and(body_json(serde_json::json!({
                "routing_key": "abc",
                "event_action": "trigger",
                "payload": {
                    "summary": "slots open",
                    "severity": "critical",
                    "source": "slotwatch"
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_string(r#"{"status":"success"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let pager = PagerClient::new(format!("{}/v2/enqueue", server.uri()));
        let ack = pager.trigger("abc", "slots open").await.unwrap();
        assert_eq!(ack, r#"{"status":"success"}"#);
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_send_error() {
        let pager = PagerClient::new("http://127.0.0.1:1/v2/enqueue");
        let err = pager.trigger("abc", "slots open").await.unwrap_err();
        assert!(matches!(err, SendError::Transport(_)));
    }
}
