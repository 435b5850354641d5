//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract consumed by the todo service.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidData`, schema checks) in
//!   addition to DB transport errors.

pub mod todo_repo;
