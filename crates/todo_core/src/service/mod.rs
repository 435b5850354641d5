//! Core use-case services.
//!
//! # Responsibility
//! - Hold the business rules applied between callers and storage.
//! - Keep callers decoupled from storage details.

pub mod todo_service;
