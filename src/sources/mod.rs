pub mod traits;
mod markup;
pub mod bbc;
pub mod hacker_news;
pub mod npr;
pub mod times_of_india;
pub mod hindustan_times;
pub mod registry;

pub use traits::HeadlineParser;
pub use registry::{Source, SourceRegistry};
