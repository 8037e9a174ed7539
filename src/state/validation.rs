//! Field validation
//!
//! `validate` is a pure function over a field snapshot plus read access to
//! the other fields' raw values. It has no side effects and can be called as
//! often as the UI likes.

use crate::state::{CrossFieldRule, FieldKind, FormField};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a valid number";

/// Read access to the current raw values of a form's fields
pub trait FieldValues {
    fn raw_value(&self, id: &str) -> Option<&str>;
}

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Parse a trimmed raw value as a finite number
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a bound without a trailing `.0` for whole numbers
fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        format!("{bound}")
    }
}

/// Validate `field` against its declared constraints.
///
/// Generic checks run in order (required, numeric, min, max) and the first
/// failure wins. A cross-field rule runs after them and only when they pass.
pub fn validate(field: &FormField, peers: &dyn FieldValues) -> ValidationResult {
    let constraints = &field.constraints;
    let value = field.raw_value().trim();

    if value.is_empty() {
        return if constraints.required {
            ValidationResult::invalid(REQUIRED_MESSAGE)
        } else {
            ValidationResult::valid()
        };
    }

    if field.kind() != FieldKind::Number {
        return ValidationResult::valid();
    }

    let Some(number) = parse_number(value) else {
        return ValidationResult::invalid(INVALID_NUMBER_MESSAGE);
    };

    if let Some(min) = constraints.min {
        if number < min {
            return ValidationResult::invalid(format!(
                "Value must be at least {}",
                format_bound(min)
            ));
        }
    }

    if let Some(max) = constraints.max {
        if number > max {
            return ValidationResult::invalid(format!(
                "Value must be at most {}",
                format_bound(max)
            ));
        }
    }

    match &constraints.cross_field {
        Some(CrossFieldRule::LessThan { other, message }) => {
            let other_number = peers.raw_value(other).and_then(parse_number);
            match other_number {
                Some(limit) if number >= limit => ValidationResult::invalid(message.clone()),
                _ => ValidationResult::valid(),
            }
        }
        None => ValidationResult::valid(),
    }
}
