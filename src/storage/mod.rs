pub mod traits;
pub mod sqlite;

pub use traits::{HeadlineQuery, HeadlineRepository};
pub use sqlite::{SqliteHeadlineRepository, SqliteStorage};
