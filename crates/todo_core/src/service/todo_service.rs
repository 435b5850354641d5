//! Todo use-case service.
//!
//! # Responsibility
//! - Validate todos before persistence.
//! - Rebuild entities from repository records.
//!
//! # Invariants
//! - Validation failures are returned as values, never as `Err`.
//! - Repository errors propagate unchanged; nothing is retried.
//! - Service layer remains storage-agnostic and does not log.

use crate::model::todo::Todo;
use crate::repo::todo_repo::{RepoResult, TodoRepository};
use serde::Serialize;

/// Message carried by every validation rejection.
pub const INVALID_DATA_MESSAGE: &str = "invalid data";

/// Details of a todo refused by [`TodoService::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRejection {
    pub message: String,
    /// The submitted todo as-is, including its generated id.
    pub data: Todo,
}

/// Result of a create call that reached a decision.
///
/// Serializes either as the created todo or as
/// `{ "error": { "message": ..., "data": ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CreateOutcome {
    Created(Todo),
    Rejected { error: CreateRejection },
}

impl CreateOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn into_result(self) -> Result<Todo, CreateRejection> {
        match self {
            Self::Created(todo) => Ok(todo),
            Self::Rejected { error } => Err(error),
        }
    }
}

/// Business rules over an injected todo repository.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists one todo.
    ///
    /// # Contract
    /// - Empty `text` or missing `when` yields `CreateOutcome::Rejected`
    ///   without touching the repository.
    /// - Otherwise calls `repository.create` exactly once with the todo's
    ///   already-resolved fields and returns a todo built from the stored
    ///   record.
    ///
    /// # Errors
    /// - Any repository failure, unchanged.
    pub fn create(&self, todo: &Todo) -> RepoResult<CreateOutcome> {
        if !todo.is_valid() {
            return Ok(CreateOutcome::Rejected {
                error: CreateRejection {
                    message: INVALID_DATA_MESSAGE.to_string(),
                    data: todo.clone(),
                },
            });
        }

        let stored = self.repo.create(&todo.to_record())?;
        Ok(CreateOutcome::Created(Todo::from(stored)))
    }

    /// Lists every stored todo with its text upper-cased.
    ///
    /// Repository order is preserved; no other field is touched.
    ///
    /// # Errors
    /// - Any repository failure, unchanged.
    pub fn list(&self) -> RepoResult<Vec<Todo>> {
        let records = self.repo.list()?;
        Ok(records
            .into_iter()
            .map(|mut record| {
                record.text = record.text.to_uppercase();
                Todo::from(record)
            })
            .collect())
    }
}
