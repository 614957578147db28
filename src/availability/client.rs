//! HTTP client for the availability query endpoint

use std::time::Duration;

use chrono::NaiveDate;

use super::model::AvailabilityReport;

/// Hard cap on a single availability query
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for querying slot availability for one location code at a time
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    http_client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl AvailabilityClient {
    /// Create a client against the given base URL template.
    ///
    /// `base_url` already carries the query path up to the location-code
    /// parameter; the code and date are appended verbatim per request.
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Full query URL for a location code on a given date (DD-MM-YYYY)
    fn query_url(&self, code: &str, date: NaiveDate) -> String {
        format!("{}{}&date={}", self.base_url, code, date.format("%d-%m-%Y"))
    }

    /// Fetch the availability report for one location code.
    ///
    /// Exactly one outbound request. Never retries and never returns a
    /// partial report; every failure mode maps to its own [`FetchError`]
    /// variant.
    pub async fn fetch(
        &self,
        code: &str,
        date: NaiveDate,
    ) -> Result<AvailabilityReport, FetchError> {
        let url: reqwest::Url = self
            .query_url(code, date)
            .parse()
            .map_err(|e| FetchError::Url(format!("{e}")))?;

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Read the body anyway; upstream error payloads are the only
            // diagnostic we get for rate limits and malformed queries.
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                location = %code,
                status = %status,
                body = %body,
                "Availability query returned non-success status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Availability fetch errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid query URL: {0}")]
    Url(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Non-success status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unreadable response body: {0}")]
    Body(String),

    #[error("Unparseable availability payload: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn may_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 10).unwrap()
    }

    #[test]
    fn test_query_url_assembly() {
        let client = AvailabilityClient::new("https://x/api/", "test-agent");
        assert_eq!(
            client.query_url("307", may_10()),
            "https://x/api/307&date=10-05-2021"
        );
    }

    #[tokio::test]
    async fn test_unparseable_base_url_is_a_url_error() {
        let client = AvailabilityClient::new("not a url ", "test-agent");
        let err = client.fetch("307", may_10()).await.unwrap_err();
        assert!(matches!(err, FetchError::Url(_)));
    }

    #[tokio::test]
    async fn test_fetch_parses_report_and_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sessions"))
            .and(query_param("district_id", "307"))
            .and(query_param("date", "10-05-2021"))
            .and(header("User-Agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "centers": [{
                    "name": "District Hospital",
                    "block_name": "Central",
                    "pincode": 560001,
                    "sessions": []
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let base = format!("{}/sessions?district_id=", server.uri());
        let client = AvailabilityClient::new(base, "test-agent");
        let report = client.fetch("307", may_10()).await.unwrap();
        assert_eq!(report.centers.len(), 1);
        assert_eq!(report.centers[0].name, "District Hospital");
    }

    #[tokio::test]
    async fn test_non_success_status_yields_no_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let base = format!("{}/sessions?district_id=", server.uri());
        let client = AvailabilityClient::new(base, "test-agent");
        let err = client.fetch("307", may_10()).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"centers\": 42}"))
            .mount(&server)
            .await;

        let base = format!("{}/sessions?district_id=", server.uri());
        let client = AvailabilityClient::new(base, "test-agent");
        let err = client.fetch("307", may_10()).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        // Reserved port with nothing listening.
        let client = AvailabilityClient::new("http://127.0.0.1:1/sessions?district_id=", "test-agent");
        let err = client.fetch("307", may_10()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
