#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher {
    /// Body of `url`, or `None` on any failure. Never consults robots.txt.
    fn fetch(&self, url: &str) -> Option<String>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RobotsPolicy {
    /// Whether the bot may fetch `url`. Fails closed.
    fn is_allowed(&self, url: &str) -> bool;
}
