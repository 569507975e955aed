use reqwest::blocking::Client;

use crate::config::{ScrapeSettings, USER_AGENT};
use crate::errors::HeadlinesResult;

/// Build the one HTTP client shared by the fetcher and the robots gate.
///
/// `Client` is reference counted internally, so clones handed to each component
/// share the same connection pool.
pub fn build_client(settings: &ScrapeSettings) -> HeadlinesResult<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.request_timeout)
        .build()?;
    Ok(client)
}
