//! Core domain logic for the todo tracker.
//! This crate is the single source of truth for todo business rules.

pub mod clock;
pub mod db;
pub mod id_gen;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id_gen::{FixedIdGenerator, IdGenerator, UuidGenerator};
pub use logging::{default_log_level, init_logging, logging_status, LogSetupError};
pub use model::todo::{NewTodo, Todo, TodoId, TodoRecord, TodoStatus};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::todo_service::{
    CreateOutcome, CreateRejection, TodoService, INVALID_DATA_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
