//! Shared helpers for validating submitted form fields.
//!
//! Form validators collect every problem into [`FieldErrors`] instead of
//! stopping at the first one, so the form can show all messages at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Field name -> human-readable message, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no errors were recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// Trim a required field, recording an error when it is missing or out of
/// the `min..=max` character range.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: Option<usize>,
) -> String {
    let trimmed = value.unwrap_or_default().trim().to_string();
    let len = trimmed.chars().count();
    if len == 0 {
        errors.add(field, format!("The {} field is required", label(field)));
    } else if len < min {
        errors.add(
            field,
            format!("The {} field must have at least {min} characters", label(field)),
        );
    } else if let Some(max) = max {
        if len > max {
            errors.add(
                field,
                format!(
                    "The {} field must not be greater than {max} characters",
                    label(field)
                ),
            );
        }
    }
    trimmed
}

/// Trim an optional field; blank input becomes `None`.
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: Option<usize>,
) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    if let Some(max) = max {
        if trimmed.chars().count() > max {
            errors.add(
                field,
                format!(
                    "The {} field must not be greater than {max} characters",
                    label(field)
                ),
            );
        }
    }
    Some(trimmed.to_string())
}

/// Trim and validate an email address.
pub fn email(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> String {
    let trimmed = value.unwrap_or_default().trim().to_string();
    if trimmed.is_empty() {
        errors.add(field, format!("The {} field is required", label(field)));
    } else if !trimmed.as_str().validate_email() {
        errors.add(
            field,
            format!("The {} field must be a valid email address", label(field)),
        );
    }
    trimmed
}

/// Interpret an HTML checkbox / boolean form value.
///
/// Browsers send `on` for a checked box and omit the field otherwise.
pub fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    )
}

/// Human label for a form field name (`authorName` -> `author name`).
fn label(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c == '_' {
            out.push(' ');
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
