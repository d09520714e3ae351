//! Field validation rules.
//!
//! Pure functions: same rule + value always yields the same result, message
//! text included. Failures are ordinary values consumed by the presenter,
//! never errors.

/// A single validation rule attached to a form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldRule {
    /// Trimmed value must be non-empty.
    Required,
    /// Non-empty value must look like `local@domain.tld`. Empty passes;
    /// required-ness is a separate rule.
    Email,
    /// Trimmed value must be at least this many characters.
    MinLength(usize),
    /// Advisory strength meter. Grades the value but never blocks submission.
    Password,
}

/// Outcome of checking one rule against one value. The form layer pairs this
/// with the field it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Checks `value` against `rule`.
pub fn validate(rule: &FieldRule, value: &str) -> ValidationResult {
    match rule {
        FieldRule::Required => {
            if value.trim().is_empty() {
                ValidationResult::fail("This field is required")
            } else {
                ValidationResult::pass()
            }
        }
        FieldRule::Email => {
            if value.is_empty() || is_valid_email(value) {
                ValidationResult::pass()
            } else {
                ValidationResult::fail("Please enter a valid email address")
            }
        }
        FieldRule::MinLength(n) => {
            if value.trim().chars().count() < *n {
                ValidationResult::fail(format!("Must be at least {n} characters"))
            } else {
                ValidationResult::pass()
            }
        }
        FieldRule::Password => {
            let strength = password_strength(value);
            ValidationResult {
                valid: true,
                message: Some(strength.summary()),
            }
        }
    }
}

/// Accepts `local@domain.tld`: an `@` with non-empty halves, and a dot inside
/// the domain with non-empty text on both sides. No whitespace, no second `@`.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let clean = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    // A dot that is neither the first nor the last character of the domain.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Graded password strength: one point per satisfied predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    /// 0..=5. Zero only for empty input.
    pub score: u8,
    /// "Enter password" for empty input, else Very Weak .. Strong.
    pub label: &'static str,
    /// Unmet predicates in canonical order, empty for a 5/5 password and for
    /// the empty-input state.
    pub missing: Vec<&'static str>,
}

impl PasswordStrength {
    /// One-line presentation: label, plus the unmet predicates when any.
    pub fn summary(&self) -> String {
        if self.missing.is_empty() {
            self.label.to_string()
        } else {
            format!("{} - Need: {}", self.label, self.missing.join(", "))
        }
    }
}

const STRENGTH_LABELS: [&str; 5] = ["Very Weak", "Weak", "Fair", "Good", "Strong"];

/// Scores a password against five predicates, enumerated in a fixed canonical
/// order: length, uppercase, lowercase, digit, special. Empty input is the
/// distinct "no input yet" state, not a failure listing every predicate.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "Enter password",
            missing: Vec::new(),
        };
    }

    let checks: [(bool, &'static str); 5] = [
        (password.chars().count() >= 8, "At least 8 characters"),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "One uppercase letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "One lowercase letter",
        ),
        (password.chars().any(|c| c.is_ascii_digit()), "One number"),
        (
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
            "One special character",
        ),
    ];

    let score = checks.iter().filter(|(ok, _)| *ok).count() as u8;
    let missing = checks
        .iter()
        .filter(|(ok, _)| !*ok)
        .map(|(_, name)| *name)
        .collect();

    PasswordStrength {
        score,
        // score >= 1 here: any non-empty input satisfies at least one class.
        label: STRENGTH_LABELS[usize::from(score.max(1)) - 1],
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_tracks_trimmed_emptiness() {
        for s in ["", "   ", "\t\n"] {
            assert!(!validate(&FieldRule::Required, s).valid, "{s:?}");
        }
        for s in ["x", "  x  ", "0"] {
            assert!(validate(&FieldRule::Required, s).valid, "{s:?}");
        }
    }

    #[test]
    fn email_accepts_plausible_addresses() {
        for e in ["a@b.c", "user@example.com", "first.last@sub.domain.org"] {
            assert!(validate(&FieldRule::Email, e).valid, "{e}");
        }
    }

    #[test]
    fn email_rejects_missing_dot_and_whitespace() {
        for e in ["a@b", "a b@c.d", "@b.c", "a@", "a@@b.c", "a@.c", "a@c."] {
            assert!(!validate(&FieldRule::Email, e).valid, "{e}");
        }
    }

    #[test]
    fn empty_email_passes_rule() {
        // Required-ness is a separate rule; empty is not an email failure.
        assert!(validate(&FieldRule::Email, "").valid);
    }

    #[test]
    fn min_length_counts_trimmed_chars() {
        assert!(!validate(&FieldRule::MinLength(4), "abc").valid);
        assert!(!validate(&FieldRule::MinLength(4), " abc ").valid);
        assert!(validate(&FieldRule::MinLength(4), "abcd").valid);
    }

    #[test]
    fn empty_password_is_the_no_input_state() {
        let s = password_strength("");
        assert_eq!(s.score, 0);
        assert_eq!(s.label, "Enter password");
        assert!(s.missing.is_empty());
    }

    #[test]
    fn strong_password_scores_five_with_no_feedback() {
        let s = password_strength("Aa1!aaaa");
        assert_eq!(s.score, 5);
        assert_eq!(s.label, "Strong");
        assert!(s.missing.is_empty());
        assert_eq!(s.summary(), "Strong");
    }

    #[test]
    fn feedback_lists_unmet_predicates_in_canonical_order() {
        let s = password_strength("aaaa");
        assert_eq!(s.score, 1);
        assert_eq!(
            s.missing,
            vec![
                "At least 8 characters",
                "One uppercase letter",
                "One number",
                "One special character",
            ]
        );
        assert!(s.summary().starts_with("Very Weak - Need: At least 8 characters"));
    }

    #[test]
    fn password_rule_grades_but_never_fails() {
        let weak = validate(&FieldRule::Password, "a");
        assert!(weak.valid);
        assert!(weak.message.unwrap().starts_with("Very Weak"));
        let strong = validate(&FieldRule::Password, "Aa1!aaaa");
        assert!(strong.valid);
        assert_eq!(strong.message.as_deref(), Some("Strong"));
    }
}
