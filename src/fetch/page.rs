// src/fetch/page.rs
// =============================================================================
// Downloads the two exports of a pad.
//
// For a pad at https://host/p/Name we request:
// - https://host/p/Name/export/txt   (plain text)
// - https://host/p/Name/export/html  (HTML, also used to find links)
//
// Policy (decided by the HTML export's status):
// - not a pad URL         -> skipped, no request made
// - timeout / no network  -> error, the engine gives up on this pad
// - 429 Too Many Requests -> wait Retry-After seconds, then fetch again
// - any other non-200     -> skipped
// =============================================================================

use super::http::{HttpClient, HttpResponse};
use crate::error::FetchError;
use crate::key;
use std::time::Duration;
use tracing::{info, warn};

// Attribute the HTML export adds to every link; dropped before saving
const NOISY_ATTRIBUTE: &str = " rel=\"noreferrer noopener\"";

const TOO_MANY_REQUESTS: u16 = 429;

// Both exports of one pad
//
// Lives only until it is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArtifact {
    pub text: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The address has no page marker
    NotAPage,
    /// The server answered with this status (neither 200 nor 429)
    HttpRejected(u16),
}

// A pad that answered, or a reason we didn't download it.
// Network failures are not outcomes: they come back as Err(FetchError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(PageArtifact),
    Skipped(SkipReason),
}

pub struct PageFetcher {
    // reqwest in production, FakeHttp in tests
    client: Box<dyn HttpClient>,
    max_rate_limit_retries: Option<u32>,
    default_retry_after: Duration,
}

impl PageFetcher {
    pub fn new(
        client: Box<dyn HttpClient>,
        max_rate_limit_retries: Option<u32>,
        default_retry_after: Duration,
    ) -> Self {
        Self {
            client,
            max_rate_limit_retries,
            default_retry_after,
        }
    }

    pub async fn fetch(&self, address: &str) -> Result<FetchOutcome, FetchError> {
        // Cheap check first: no request for links that aren't pads
        if !key::is_page(address) {
            info!("IGNORED {} is not a valid pad url", address);
            return Ok(FetchOutcome::Skipped(SkipReason::NotAPage));
        }

        // Each pass of this loop is one complete attempt (both exports).
        // Only a 429 starts another pass.
        let mut retries = 0;
        loop {
            // Text first, then HTML, like a person clicking both export buttons
            let text = self.client.get(&format!("{}/export/txt", address)).await?;
            let html = self.client.get(&format!("{}/export/html", address)).await?;

            // Only the HTML export decides what happens next: it is the one we
            // parse for links. The text export is saved whatever it returned.
            if html.status == TOO_MANY_REQUESTS {
                // Without --max-rate-limit-retries this never gives up
                if let Some(max) = self.max_rate_limit_retries {
                    if retries >= max {
                        return Err(FetchError::RateLimitExhausted {
                            url: address.to_string(),
                            attempts: retries,
                        });
                    }
                }
                retries += 1;

                let delay = self.retry_delay(&html);
                warn!(
                    "got status code 429 (Too Many Requests), waiting for {} seconds, then retrying",
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
                info!("Retrying {} now", address);
                continue;
            }

            if html.status != 200 {
                warn!("got status code {}, ignoring {}", html.status, address);
                return Ok(FetchOutcome::Skipped(SkipReason::HttpRejected(html.status)));
            }

            if text.status != 200 {
                // Kept anyway: the error page still lands in the .txt file
                warn!(
                    "text export of {} answered {}, saving its body as is",
                    address, text.status
                );
            }

            return Ok(FetchOutcome::Page(PageArtifact {
                text: text.body,
                html: strip_noisy_attribute(&html.body),
            }));
        }
    }

    // How long a 429 response asks us to wait
    //
    // Falls back to the configured default when Retry-After is missing or
    // not a number of seconds.
    fn retry_delay(&self, response: &HttpResponse) -> Duration {
        parse_retry_after(response.header("Retry-After")).unwrap_or(self.default_retry_after)
    }
}

// Retry-After in its delay-seconds form; HTTP dates are not supported
fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value?.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn strip_noisy_attribute(html: &str) -> String {
    html.replace(NOISY_ATTRIBUTE, "")
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a loop instead of calling fetch() again on 429?
//    - A recursive async fn needs boxing and grows with every retry
//    - `continue` restarts the attempt with no extra cost
//
// 2. What does the `?` after .await do?
//    - If get() returned Err(FetchError), return it from fetch() right away
//    - So a timeout on either export ends the attempt
//
// 3. Why tokio::time::sleep and not std::thread::sleep?
//    - It doesn't block the runtime thread
//    - Tests can pause the clock and check the wait without really waiting
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHttp, Reply};

    const PAD: &str = "https://example.org/p/Root";

    fn fetcher(http: &FakeHttp) -> PageFetcher {
        PageFetcher::new(Box::new(http.clone()), None, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_not_a_page_makes_no_request() {
        let http = FakeHttp::default();
        let outcome = fetcher(&http).fetch("https://example.org/about").await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped(SkipReason::NotAPage));
        assert!(http.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_strips_noisy_attribute() {
        let http = FakeHttp::default();
        http.page(
            PAD,
            "hello",
            r#"<a href="https://example.org/p/A" rel="noreferrer noopener">A</a>"#,
        );

        let outcome = fetcher(&http).fetch(PAD).await.unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Page(PageArtifact {
                text: "hello".to_string(),
                html: r#"<a href="https://example.org/p/A">A</a>"#.to_string(),
            })
        );
        assert_eq!(
            http.calls(),
            vec![format!("{}/export/txt", PAD), format!("{}/export/html", PAD)]
        );
    }

    #[tokio::test]
    async fn test_non_200_is_skipped() {
        let http = FakeHttp::default();
        http.script(&format!("{}/export/html", PAD), vec![Reply::status(404)]);
        http.script(&format!("{}/export/txt", PAD), vec![Reply::status(404)]);

        let outcome = fetcher(&http).fetch(PAD).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped(SkipReason::HttpRejected(404)));
    }

    #[tokio::test]
    async fn test_failed_text_export_is_kept() {
        let http = FakeHttp::default();
        http.script(
            &format!("{}/export/txt", PAD),
            vec![Reply::Response(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: "Internal Server Error".to_string(),
            })],
        );
        http.script(&format!("{}/export/html", PAD), vec![Reply::ok("<p>html</p>")]);

        let outcome = fetcher(&http).fetch(PAD).await.unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Page(PageArtifact {
                text: "Internal Server Error".to_string(),
                html: "<p>html</p>".to_string(),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_429_on_text_export_is_not_retried() {
        let http = FakeHttp::default();
        http.script(&format!("{}/export/txt", PAD), vec![Reply::rate_limited("30")]);
        http.script(&format!("{}/export/html", PAD), vec![Reply::ok("<p>html</p>")]);

        let start = tokio::time::Instant::now();
        let outcome = fetcher(&http).fetch(PAD).await.unwrap();

        assert!(matches!(outcome, FetchOutcome::Page(_)));
        assert!(start.elapsed() < Duration::from_secs(30));
        assert_eq!(http.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let http = FakeHttp::default();
        http.script(&format!("{}/export/txt", PAD), vec![Reply::Timeout]);

        let err = fetcher(&http).fetch(PAD).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_429_waits_then_refetches() {
        let http = FakeHttp::default();
        http.script(&format!("{}/export/txt", PAD), vec![Reply::ok("text")]);
        http.script(
            &format!("{}/export/html", PAD),
            vec![Reply::rate_limited("2"), Reply::ok("<p>html</p>")],
        );

        let start = tokio::time::Instant::now();
        let outcome = fetcher(&http).fetch(PAD).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(matches!(outcome, FetchOutcome::Page(_)));
        // The whole fetch is reissued: two rounds of two requests
        assert_eq!(http.calls().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_429_without_header_uses_default_delay() {
        let http = FakeHttp::default();
        http.page(PAD, "text", "<p>html</p>");
        http.script(
            &format!("{}/export/html", PAD),
            vec![Reply::status(429), Reply::ok("<p>html</p>")],
        );

        let start = tokio::time::Instant::now();
        fetcher(&http).fetch(PAD).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_cap_is_opt_in() {
        let http = FakeHttp::default();
        http.page(PAD, "text", "html");
        http.script(&format!("{}/export/html", PAD), vec![Reply::rate_limited("1")]);

        let fetcher = PageFetcher::new(Box::new(http.clone()), Some(2), Duration::from_secs(1));
        let err = fetcher.fetch(PAD).await.unwrap_err();
        assert!(matches!(err, FetchError::RateLimitExhausted { attempts: 2, .. }));
        assert_eq!(http.calls().len(), 6);
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(Some(" 2 ")), Some(Duration::from_secs(2)));
        assert_eq!(parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")), None);
        assert_eq!(parse_retry_after(None), None);
    }
}
