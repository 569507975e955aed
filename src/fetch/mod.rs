pub mod traits;
pub mod client;
pub mod fetcher;
pub mod robots;
#[cfg(test)]
mod test_server;

pub use traits::{PageFetcher, RobotsPolicy};
pub use client::build_client;
pub use fetcher::HttpFetcher;
pub use robots::RobotsGate;
