//! Field error annotations.
//!
//! The renderer reads annotations from here instead of owning error state.
//! Presenting twice for the same field replaces the annotation; a field never
//! carries more than one.

use std::collections::BTreeMap;

/// Idempotent store of per-field error annotations.
#[derive(Debug, Default)]
pub struct FieldErrorPresenter {
    annotations: BTreeMap<String, String>,
}

impl FieldErrorPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `message` to `field`, replacing any existing annotation.
    pub fn present(&mut self, field: &str, message: impl Into<String>) {
        self.annotations.insert(field.to_string(), message.into());
    }

    /// Removes the annotation for `field`. No-op when absent.
    pub fn clear(&mut self, field: &str) {
        self.annotations.remove(field);
    }

    /// The visible annotation for `field`, if any.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.annotations.get(field).map(String::as_str)
    }

    /// Whether `field` is currently marked errored (for styling).
    pub fn is_errored(&self, field: &str) -> bool {
        self.annotations.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Annotations in stable field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.annotations
            .iter()
            .map(|(f, m)| (f.as_str(), m.as_str()))
    }
}
