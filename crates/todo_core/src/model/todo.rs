//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its plain persisted form.
//! - Resolve `id` and `status` once, at construction time.
//!
//! # Invariants
//! - `id` is always present after construction.
//! - `status` is never recomputed after construction.
//! - Construction never validates; see [`Todo::is_valid`].

use crate::clock::{Clock, SystemClock};
use crate::id_gen::{IdGenerator, UuidGenerator};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a todo in string form.
pub type TodoId = String;

/// Derived state of a todo relative to its due moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Due moment was still ahead when the todo was built.
    Pending,
    /// Due moment had passed (or was missing) when the todo was built.
    Late,
}

impl TodoStatus {
    /// Derives status by comparing `when` against `now`.
    ///
    /// Strictly-future due moments are pending; everything else is late,
    /// including a missing due moment.
    pub fn derive(when: Option<i64>, now_epoch_ms: i64) -> Self {
        match when {
            Some(due) if due > now_epoch_ms => Self::Pending,
            _ => Self::Late,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Late => "late",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "late" => Some(Self::Late),
            _ => None,
        }
    }
}

impl Display for TodoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction input for [`Todo`].
///
/// `status` and `id` are resolved during construction when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub text: String,
    /// Unix epoch milliseconds; `None` stands for an empty due moment.
    pub when: Option<i64>,
    pub status: Option<TodoStatus>,
    pub id: Option<TodoId>,
}

impl NewTodo {
    pub fn new(text: impl Into<String>, when: Option<i64>) -> Self {
        Self {
            text: text.into(),
            when,
            status: None,
            id: None,
        }
    }
}

/// Plain data exchanged with repositories.
///
/// Carries exactly the four todo fields; storage metadata never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub text: String,
    pub when: Option<i64>,
    pub status: TodoStatus,
    pub id: TodoId,
}

/// One task item with a due moment and a derived status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    text: String,
    when: Option<i64>,
    status: TodoStatus,
    id: TodoId,
}

impl Todo {
    /// Builds a todo using the system clock and random UUIDs.
    pub fn new(input: NewTodo) -> Self {
        Self::new_with(input, &SystemClock, &UuidGenerator)
    }

    /// Builds a todo using caller-provided time and identifier sources.
    ///
    /// The clock is read only when `input.status` is absent; the generator is
    /// called only when `input.id` is absent.
    pub fn new_with(input: NewTodo, clock: &dyn Clock, ids: &dyn IdGenerator) -> Self {
        let status = input
            .status
            .unwrap_or_else(|| TodoStatus::derive(input.when, clock.now_epoch_ms()));
        let id = input.id.unwrap_or_else(|| ids.generate());

        Self {
            text: input.text,
            when: input.when,
            status,
            id,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Due moment in Unix epoch milliseconds.
    pub fn when(&self) -> Option<i64> {
        self.when
    }

    pub fn status(&self) -> TodoStatus {
        self.status
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns whether this todo may be persisted.
    ///
    /// Only `text` and `when` participate: `text` must be non-empty and
    /// `when` must be present.
    pub fn is_valid(&self) -> bool {
        !self.text.is_empty() && self.when.is_some()
    }

    /// Copies the resolved fields into a repository record.
    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            text: self.text.clone(),
            when: self.when,
            status: self.status,
            id: self.id.clone(),
        }
    }
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Self {
            text: record.text,
            when: record.when,
            status: record.status,
            id: record.id,
        }
    }
}

impl From<Todo> for TodoRecord {
    fn from(todo: Todo) -> Self {
        Self {
            text: todo.text,
            when: todo.when,
            status: todo.status,
            id: todo.id,
        }
    }
}
