//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the narrow `list`/`create` contract the service depends on.
//! - Keep SQL details and storage metadata inside the persistence boundary.
//!
//! # Invariants
//! - Records returned to callers carry only `text`, `when`, `status`, `id`.
//! - `list` preserves insertion order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::todo::{TodoRecord, TodoStatus};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    text,
    due_at,
    status
FROM todos";

const REQUIRED_COLUMNS: [&str; 6] = ["seq", "id", "text", "due_at", "status", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and reads.
#[derive(Debug)]
pub enum RepoError {
    /// Storage transport or bootstrap failure.
    Db(DbError),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted into a record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "todo repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "todo repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "todo repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage collaborator used by [`crate::TodoService`].
pub trait TodoRepository {
    /// Returns every stored record in insertion order.
    fn list(&self) -> RepoResult<Vec<TodoRecord>>;
    /// Persists one record and returns its stored representation.
    fn create(&self, record: &TodoRecord) -> RepoResult<TodoRecord>;
}

impl<T: TodoRepository + ?Sized> TodoRepository for &T {
    fn list(&self) -> RepoResult<Vec<TodoRecord>> {
        (**self).list()
    }

    fn create(&self, record: &TodoRecord) -> RepoResult<TodoRecord> {
        (**self).create(record)
    }
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema shape
    ///   was altered outside migrations.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_todo_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn list(&self) -> RepoResult<Vec<TodoRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_todo_row(row)?);
        }

        debug!(
            "event=todo_list module=repo status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    fn create(&self, record: &TodoRecord) -> RepoResult<TodoRecord> {
        let inserted = self.conn.execute(
            "INSERT INTO todos (
                id,
                text,
                due_at,
                status
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                record.id.as_str(),
                record.text.as_str(),
                record.when,
                record.status.as_str(),
            ],
        );
        if let Err(err) = inserted {
            error!(
                "event=todo_create module=repo status=error error_code=insert_failed error={err}"
            );
            return Err(err.into());
        }

        let stored = self.conn.query_row(
            &format!("{TODO_SELECT_SQL} WHERE id = ?1;"),
            [record.id.as_str()],
            |row| Ok(parse_todo_row(row)),
        )??;

        debug!(
            "event=todo_create module=repo status=ok todo_status={}",
            stored.status
        );
        Ok(stored)
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<TodoRecord> {
    let status_text: String = row.get("status")?;
    let status = TodoStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in todos.status"))
    })?;

    let id: String = row.get("id")?;
    if id.is_empty() {
        return Err(RepoError::InvalidData(
            "empty id value in todos.id".to_string(),
        ));
    }

    Ok(TodoRecord {
        text: row.get("text")?,
        when: row.get("due_at")?,
        status,
        id,
    })
}

fn ensure_todo_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let columns = todo_columns(conn)?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("todos"));
    }

    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|required| !columns.iter().any(|present| present == required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: "todos",
            column,
        });
    }

    Ok(())
}

// `table_info` yields no rows for a table that does not exist.
fn todo_columns(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(todos);")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}
