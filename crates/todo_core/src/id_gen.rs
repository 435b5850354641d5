//! Injectable identifier source for new todos.

use uuid::Uuid;

/// Produces identifiers for todos constructed without one.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random UUID v4 generator, hyphenated lowercase form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Generator that always returns the same identifier.
///
/// Used where deterministic output matters more than uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdGenerator(pub String);

impl FixedIdGenerator {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate(&self) -> String {
        self.0.clone()
    }
}
