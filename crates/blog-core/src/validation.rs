//! Declarative field validation for post payloads.
//!
//! A schema is a slice of [`FieldRule`]s. [`validate`] checks a JSON candidate
//! against it and reports every offending field, in schema order, followed by
//! any keys the schema does not know about.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    ArrayOf(&'static FieldKind),
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::ArrayOf(inner), Value::Array(items)) => {
                items.iter().all(|item| inner.accepts(item))
            }
            _ => false,
        }
    }

    fn describe(&self) -> String {
        match self {
            FieldKind::String => "must be a string".to_string(),
            FieldKind::ArrayOf(FieldKind::String) => "must be an array of strings".to_string(),
            FieldKind::ArrayOf(_) => "must be an array of the expected type".to_string(),
        }
    }
}

/// Constraint on one top-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<FieldError>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid(errors) => Err(DomainError::Validation(errors)),
        }
    }
}

const STRING_ARRAY: FieldKind = FieldKind::ArrayOf(&FieldKind::String);

/// Schema for creating a post: every field is mandatory.
pub const WRITE_POST_SCHEMA: &[FieldRule] = &[
    FieldRule::required("title", FieldKind::String),
    FieldRule::required("body", FieldKind::String),
    FieldRule::required("tags", STRING_ARRAY),
];

/// Schema for patching a post: same fields, all optional.
pub const UPDATE_POST_SCHEMA: &[FieldRule] = &[
    FieldRule::optional("title", FieldKind::String),
    FieldRule::optional("body", FieldKind::String),
    FieldRule::optional("tags", STRING_ARRAY),
];

/// Check `candidate` against `schema`.
pub fn validate(schema: &[FieldRule], candidate: &Value) -> Validation {
    let Some(object) = candidate.as_object() else {
        return Validation::Invalid(vec![FieldError::new("", "must be an object")]);
    };

    let mut errors: Vec<FieldError> = schema
        .iter()
        .filter_map(|rule| match object.get(rule.name) {
            None if rule.required => Some(FieldError::new(rule.name, "is required")),
            None => None,
            Some(value) if !rule.kind.accepts(value) => {
                Some(FieldError::new(rule.name, rule.kind.describe()))
            }
            Some(_) => None,
        })
        .collect();

    errors.extend(
        object
            .keys()
            .filter(|key| schema.iter().all(|rule| rule.name != key.as_str()))
            .map(|key| FieldError::new(key.as_str(), "is not allowed")),
    );

    if errors.is_empty() {
        Validation::Valid
    } else {
        Validation::Invalid(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_accepts_complete_payload() {
        let candidate = json!({ "title": "A", "body": "hi", "tags": [] });
        assert!(validate(WRITE_POST_SCHEMA, &candidate).is_valid());
    }

    #[test]
    fn test_write_reports_missing_and_mistyped_fields() {
        let candidate = json!({ "title": 3, "tags": ["ok", 1] });

        let Validation::Invalid(errors) = validate(WRITE_POST_SCHEMA, &candidate) else {
            panic!("expected invalid");
        };

        assert_eq!(
            errors,
            vec![
                FieldError::new("title", "must be a string"),
                FieldError::new("body", "is required"),
                FieldError::new("tags", "must be an array of strings"),
            ]
        );
    }

    #[test]
    fn test_update_allows_empty_object() {
        assert_eq!(validate(UPDATE_POST_SCHEMA, &json!({})), Validation::Valid);
    }

    #[test]
    fn test_update_still_checks_types() {
        let result = validate(UPDATE_POST_SCHEMA, &json!({ "tags": "rust" }));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let Validation::Invalid(errors) = validate(UPDATE_POST_SCHEMA, &json!({ "author": "x" }))
        else {
            panic!("expected invalid");
        };
        assert_eq!(errors, vec![FieldError::new("author", "is not allowed")]);
    }

    #[test]
    fn test_non_object_is_rejected() {
        let result = validate(WRITE_POST_SCHEMA, &json!(["title"]));
        assert!(matches!(
            result.into_result(),
            Err(DomainError::Validation(errors)) if errors[0].field.is_empty()
        ));
    }
}
