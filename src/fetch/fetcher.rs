use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config::{ScrapeSettings, RETRYABLE_STATUSES};
use crate::fetch::traits::PageFetcher;

/// GET with a bounded retry on transient statuses.
pub struct HttpFetcher {
    client: Client,
    max_attempts: u32,
    backoff_factor: f64,
}

impl HttpFetcher {
    pub fn new(client: Client, settings: &ScrapeSettings) -> Self {
        Self {
            client,
            max_attempts: settings.max_attempts.max(1),
            backoff_factor: settings.backoff_factor,
        }
    }

    pub fn is_retryable(status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status.as_u16())
    }

    /// Pause before retry number `retry` (1-based): `factor * 2^(retry - 1)` seconds.
    pub fn backoff_delay(backoff_factor: f64, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16) as i32;
        Duration::from_secs_f64((backoff_factor * 2f64.powi(exponent)).max(0.0))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<String> {
        for attempt in 1..=self.max_attempts {
            let response = match self.client.get(url).send() {
                Ok(response) => response,
                Err(e) => {
                    warn!(%url, attempt, error = %e, "Request failed");
                    return None;
                }
            };

            let status = response.status();
            if status.is_success() {
                return match response.text() {
                    Ok(body) => {
                        debug!(%url, attempt, bytes = body.len(), "Fetched page");
                        Some(body)
                    }
                    Err(e) => {
                        warn!(%url, error = %e, "Failed to read response body");
                        None
                    }
                };
            }

            if !Self::is_retryable(status) {
                warn!(%url, status = status.as_u16(), "Non-retryable status");
                return None;
            }

            if attempt < self.max_attempts {
                let delay = Self::backoff_delay(self.backoff_factor, attempt);
                debug!(%url, status = status.as_u16(), attempt, ?delay, "Retrying after transient status");
                std::thread::sleep(delay);
            } else {
                warn!(%url, status = status.as_u16(), attempts = attempt, "Retries exhausted");
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_server::{local_client, ScriptedServer};

    #[test]
    fn test_retryable_statuses() {
        for code in [429, 500, 502, 503, 504] {
            assert!(HttpFetcher::is_retryable(StatusCode::from_u16(code).unwrap()));
        }
        for code in [400, 401, 403, 404, 501] {
            assert!(!HttpFetcher::is_retryable(StatusCode::from_u16(code).unwrap()));
        }
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        assert_eq!(HttpFetcher::backoff_delay(1.2, 1), Duration::from_secs_f64(1.2));
        assert_eq!(HttpFetcher::backoff_delay(1.2, 2), Duration::from_secs_f64(2.4));
        assert_eq!(HttpFetcher::backoff_delay(1.2, 3), Duration::from_secs_f64(4.8));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let settings = ScrapeSettings {
            max_attempts: 0,
            ..ScrapeSettings::default()
        };
        let fetcher = HttpFetcher::new(Client::new(), &settings);
        assert_eq!(fetcher.max_attempts, 1);
    }

    fn quick_retry_settings() -> ScrapeSettings {
        ScrapeSettings {
            backoff_factor: 0.01,
            ..ScrapeSettings::default()
        }
    }

    #[test]
    fn test_transient_statuses_retried_until_success() {
        let server = ScriptedServer::start(vec![(503, ""), (503, ""), (200, "<html>ok</html>")]);
        let fetcher = HttpFetcher::new(local_client(), &quick_retry_settings());

        let body = fetcher.fetch(&server.url("/news"));

        assert_eq!(body.as_deref(), Some("<html>ok</html>"));
        assert_eq!(server.hits(), 3);
    }

    #[test]
    fn test_gives_up_after_three_attempts() {
        let server = ScriptedServer::start(vec![(500, "")]);
        let fetcher = HttpFetcher::new(local_client(), &quick_retry_settings());

        assert!(fetcher.fetch(&server.url("/news")).is_none());
        assert_eq!(server.hits(), 3);
    }

    #[test]
    fn test_not_found_is_not_retried() {
        let server = ScriptedServer::start(vec![(404, "missing")]);
        let fetcher = HttpFetcher::new(local_client(), &quick_retry_settings());

        assert!(fetcher.fetch(&server.url("/news")).is_none());
        assert_eq!(server.hits(), 1);
    }
}

