//! Field validation predicate.
//!
//! # Responsibility
//! - Check one labeled input value against optional constraints.
//!
//! # Invariants
//! - Validation is pure and never fails; it only answers yes or no.
//! - Length constraints apply to text only, bounds apply to numbers only.
//!   A constraint of the wrong kind is ignored, not reported.

/// Raw value under validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Optional constraints; `Default` means "no constraint" for each.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.min_length = Some(value);
        self
    }

    pub fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    /// Inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.min = Some(value);
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.max = Some(value);
        self
    }
}

/// A value paired with its field label and constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validatable<'a> {
    /// Field name, safe to log.
    pub label: &'static str,
    pub value: FieldValue<'a>,
    pub constraints: Constraints,
}

impl<'a> Validatable<'a> {
    pub fn new(label: &'static str, value: FieldValue<'a>, constraints: Constraints) -> Self {
        Self {
            label,
            value,
            constraints,
        }
    }

    pub fn is_valid(&self) -> bool {
        validate(self.value, &self.constraints)
    }
}

/// Returns whether `value` satisfies every applicable constraint.
pub fn validate(value: FieldValue<'_>, constraints: &Constraints) -> bool {
    let mut is_valid = true;

    if constraints.required {
        // Numbers always have a non-empty string form.
        is_valid &= match value {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Number(_) => true,
        };
    }

    if let FieldValue::Text(text) = value {
        let length = text.chars().count();
        if let Some(min_length) = constraints.min_length {
            is_valid &= length >= min_length;
        }
        if let Some(max_length) = constraints.max_length {
            is_valid &= length <= max_length;
        }
    }

    if let FieldValue::Number(number) = value {
        // NaN fails both comparisons.
        if let Some(min) = constraints.min {
            is_valid &= number >= min;
        }
        if let Some(max) = constraints.max {
            is_valid &= number <= max;
        }
    }

    is_valid
}

#[cfg(test)]
mod tests {
    use super::{validate, Constraints, FieldValue, Validatable};

    #[test]
    fn absent_constraints_are_vacuous() {
        assert!(validate(FieldValue::Text(""), &Constraints::new()));
        assert!(validate(FieldValue::Number(f64::NAN), &Constraints::new()));
    }

    #[test]
    fn required_rejects_blank_text() {
        let required = Constraints::new().required();
        assert!(!validate(FieldValue::Text("   "), &required));
        assert!(validate(FieldValue::Text(" x "), &required));
        assert!(validate(FieldValue::Number(0.0), &required));
    }

    #[test]
    fn length_bounds_apply_to_text_only() {
        let bounded = Constraints::new().min_length(5).max_length(6);
        assert!(!validate(FieldValue::Text("abcd"), &bounded));
        assert!(validate(FieldValue::Text("abcde"), &bounded));
        assert!(validate(FieldValue::Text("abcdef"), &bounded));
        assert!(!validate(FieldValue::Text("abcdefg"), &bounded));
        assert!(validate(FieldValue::Number(1.0), &bounded));
    }

    #[test]
    fn numeric_bounds_are_inclusive_and_ignore_text() {
        let range = Constraints::new().required().min(1.0).max(6.0);
        assert!(!validate(FieldValue::Number(0.0), &range));
        assert!(validate(FieldValue::Number(1.0), &range));
        assert!(validate(FieldValue::Number(6.0), &range));
        assert!(!validate(FieldValue::Number(7.0), &range));
        assert!(!validate(FieldValue::Number(f64::NAN), &range));
        assert!(validate(FieldValue::Text("100"), &range));
    }

    #[test]
    fn multibyte_text_counts_characters() {
        let min_five = Constraints::new().min_length(5);
        assert!(validate(FieldValue::Text("проект"), &min_five));
        assert!(!validate(FieldValue::Text("ёжик"), &min_five));
    }

    #[test]
    fn validatable_delegates_to_validate() {
        let field = Validatable::new(
            "title",
            FieldValue::Text(""),
            Constraints::new().required(),
        );
        assert!(!field.is_valid());
    }
}
