//! Form validation layer.
//!
//! - **[`rules`]**: pure per-rule validators and the password strength meter.
//! - **[`presenter`]**: idempotent per-field error annotations for rendering.
//!
//! [`FormValidator`] wires the two: fields declare their rules at setup time,
//! then per-field checks run on focus changes and a full pass runs on submit.

pub mod presenter;
pub mod rules;

use presenter::FieldErrorPresenter;
use rules::{validate, FieldRule, ValidationResult};

/// A field and the rules it must satisfy, in evaluation order.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub field: String,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    pub fn new(field: impl Into<String>, rules: Vec<FieldRule>) -> Self {
        Self {
            field: field.into(),
            rules,
        }
    }
}

/// Validates a fixed set of fields, feeding results to a presenter.
#[derive(Clone, Debug, Default)]
pub struct FormValidator {
    fields: Vec<FieldSpec>,
}

impl FormValidator {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Runs the field's rules in declared order and returns the first
    /// failure, or a pass when every rule holds. Unknown fields pass.
    pub fn check_field(&self, field: &str, value: &str) -> ValidationResult {
        let Some(spec) = self.fields.iter().find(|s| s.field == field) else {
            return ValidationResult {
                valid: true,
                message: None,
            };
        };
        for rule in &spec.rules {
            let result = validate(rule, value);
            if !result.valid {
                return result;
            }
        }
        ValidationResult {
            valid: true,
            message: None,
        }
    }

    /// Validates one field and updates its annotation. Returns whether the
    /// field passed.
    pub fn check_into(
        &self,
        field: &str,
        value: &str,
        presenter: &mut FieldErrorPresenter,
    ) -> bool {
        let result = self.check_field(field, value);
        let valid = result.valid;
        match result.message {
            Some(message) if !valid => presenter.present(field, message),
            _ => presenter.clear(field),
        }
        valid
    }

    /// Full submit-time pass: validates every declared field via `lookup`,
    /// presenting or clearing each annotation. Returns overall pass.
    pub fn run<'a>(
        &self,
        mut lookup: impl FnMut(&str) -> &'a str,
        presenter: &mut FieldErrorPresenter,
    ) -> bool {
        let mut all_ok = true;
        for spec in &self.fields {
            let value = lookup(&spec.field);
            if !self.check_into(&spec.field, value, presenter) {
                all_ok = false;
            }
        }
        all_ok
    }
}
