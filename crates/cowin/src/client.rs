use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::{CalendarQuery, CalendarResponse, CowinError};

/// Public API host
pub const DEFAULT_BASE_URL: &str = "https://cdn-api.co-vin.in/api";

/// The API rejects requests carrying a default HTTP client identifier.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Settings for [`CowinClient`]
#[derive(Debug, Clone)]
pub struct CowinConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for CowinConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the CoWIN calendar endpoints
pub struct CowinClient {
    client: Client,
    base_url: String,
}

impl CowinClient {
    /// Create a new CoWIN API client
    pub fn new(config: CowinConfig) -> Result<Self, CowinError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CowinError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the endpoint a query targets
    pub fn url_for(&self, query: &CalendarQuery) -> String {
        format!("{}{}", self.base_url, query.endpoint.path())
    }

    /// Fetch the calendar for a query. A single attempt; no retries.
    pub async fn fetch(&self, query: &CalendarQuery) -> Result<CalendarResponse, CowinError> {
        let url = self.url_for(query);
        debug!("Fetching {} with {:?}", url, query.params);

        let response = self
            .client
            .get(&url)
            .query(&query.params)
            .send()
            .await
            .map_err(|e| CowinError::Network(format!("HTTP request failed: {}", e)))?;

        debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!("API request failed with status {}: {}", status, body);

            return Err(CowinError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CowinError::Network(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| CowinError::DataFormat(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationMode;
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> CowinClient {
        CowinClient::new(CowinConfig {
            base_url: server.base_url(),
            ..CowinConfig::default()
        })
        .unwrap()
    }

    fn pincode_query() -> CalendarQuery {
        CalendarQuery::from_location(
            LocationMode::Pincode(110001),
            NaiveDate::from_ymd_opt(2021, 5, 9).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_fetch_sends_params_and_browser_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/appointment/sessions/public/calendarByPin")
                .query_param("pincode", "110001")
                .query_param("date", "09-05-2021")
                .header("user-agent", BROWSER_USER_AGENT);
            then.status(200).json_body(serde_json::json!({
                "centers": [{"name": "ABC Hospital", "pincode": 110001, "sessions": []}]
            }));
        });

        let response = client_for(&server).fetch(&pincode_query()).await.unwrap();

        mock.assert();
        assert_eq!(response.centers.len(), 1);
        assert_eq!(response.centers[0].name, "ABC Hospital");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/appointment/sessions/public/calendarByPin");
            then.status(403).body("Forbidden");
        });

        let err = client_for(&server).fetch(&pincode_query()).await.unwrap_err();
        assert!(matches!(err, CowinError::Transport { status: 403 }));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v2/appointment/sessions/public/calendarByPin");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client_for(&server).fetch(&pincode_query()).await.unwrap_err();
        assert!(matches!(err, CowinError::DataFormat(_)));
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let client = CowinClient::new(CowinConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            ..CowinConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.url_for(&pincode_query()),
            "http://localhost:9000/api/v2/appointment/sessions/public/calendarByPin"
        );
    }
}
