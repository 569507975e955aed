use reqwest::blocking::Client;
use reqwest::StatusCode;
use texting_robots::Robot;
use tracing::{debug, warn};
use url::Url;

use crate::config::BOT_NAME;
use crate::errors::{HeadlinesError, HeadlinesResult};
use crate::fetch::traits::RobotsPolicy;

/// Checks robots.txt of the target origin before every listing fetch.
pub struct RobotsGate {
    client: Client,
}

impl RobotsGate {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `{scheme}://{host[:port]}/robots.txt` for the origin of `target`.
    pub fn robots_url(target: &str) -> HeadlinesResult<String> {
        let parsed = Url::parse(target).map_err(|e| HeadlinesError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| HeadlinesError::InvalidUrl(format!("Missing host in {}", target)))?;

        Ok(match parsed.port() {
            Some(port) => format!("{}://{}:{}/robots.txt", parsed.scheme(), host, port),
            None => format!("{}://{}/robots.txt", parsed.scheme(), host),
        })
    }

    /// Evaluate a robots.txt body for `target`.
    pub fn evaluate(robots_txt: &[u8], target: &str) -> HeadlinesResult<bool> {
        let robot = Robot::new(BOT_NAME, robots_txt)
            .map_err(|e| HeadlinesError::RobotsParse(e.to_string()))?;
        Ok(robot.allowed(target))
    }

    /// Decision for a robots.txt response that was not a success.
    /// 401/403 deny everything; other 4xx mean no policy is published.
    fn decide_for_status(status: StatusCode) -> bool {
        match status.as_u16() {
            401 | 403 => false,
            400..=499 => true,
            _ => false,
        }
    }

    fn check(&self, target: &str) -> HeadlinesResult<bool> {
        let robots_url = Self::robots_url(target)?;
        let response = self.client.get(&robots_url).send()?;
        let status = response.status();

        if !status.is_success() {
            let allowed = Self::decide_for_status(status);
            debug!(%robots_url, status = status.as_u16(), allowed, "robots.txt unavailable");
            return Ok(allowed);
        }

        let body = response.bytes()?;
        Self::evaluate(&body, target)
    }
}

impl RobotsPolicy for RobotsGate {
    fn is_allowed(&self, url: &str) -> bool {
        match self.check(url) {
            Ok(allowed) => {
                if !allowed {
                    debug!(%url, "Disallowed by robots.txt");
                }
                allowed
            }
            Err(e) => {
                warn!(%url, error = %e, "Could not read robots.txt, treating as disallowed");
                false
            }
        }
    }
}
