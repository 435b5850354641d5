//! Domain model for the todo tracker.
//!
//! # Responsibility
//! - Define the task entity and the plain record shape used by storage.
//!
//! # Invariants
//! - Every todo carries an identifier and a status once constructed.
//! - Todos are never mutated after construction.

pub mod todo;
