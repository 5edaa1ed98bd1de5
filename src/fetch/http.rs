// src/fetch/http.rs
// =============================================================================
// The HTTP seam used by the page fetcher.
//
// PageFetcher only needs "GET this URL, give me status + headers + body".
// Putting that behind a trait lets the tests script responses (429s, 404s,
// timeouts) without a network, while the real program uses reqwest.
//
// Rust concepts:
// - Traits: an interface that several types can implement
// - async-trait: lets us put async methods in a trait used as &dyn HttpClient
// =============================================================================

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

// What we keep from an HTTP response
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    // Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

// reqwest-backed client with the archiver's timeout and User-Agent baked in
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        // Pads are always UTF-8, whatever the Content-Type says
        let bytes = response
            .bytes()
            .await
            .map_err(|e| categorize_error(url, e))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// Splits reqwest errors into the two cases the crawl cares about
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Unreachable {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 429,
            headers: vec![("retry-after".to_string(), "2".to_string())],
            body: String::new(),
        };
        assert_eq!(response.header("Retry-After"), Some("2"));
        assert_eq!(response.header("Content-Type"), None);
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let client = ReqwestClient::new("pad-archiver-test", Duration::from_secs(1)).unwrap();
        // Port 9 (discard) on localhost is closed on any sane test machine
        let err = client.get("http://127.0.0.1:9/p/Nothing").await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Unreachable { .. } | FetchError::Timeout { .. }
        ));
    }
}
