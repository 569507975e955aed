mod connection;
mod headline_repository;
pub mod seed;

pub use connection::SqliteStorage;
pub use headline_repository::SqliteHeadlineRepository;
