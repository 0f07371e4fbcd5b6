//! Validation rules that don't fit a `validator` attribute, and rendering of
//! `ValidationErrors` into the plain-text bodies returned to clients.

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::{Coordinates, CreateProduct, UpdateProduct};

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

// `range` lets NaN and unbounded-side infinities through, so finiteness is checked per struct.

pub(crate) fn finite_coordinates(coordinates: &Coordinates) -> Result<(), ValidationError> {
    finite("x", coordinates.x)
}

pub(crate) fn finite_create_cost(input: &CreateProduct) -> Result<(), ValidationError> {
    finite("manufactureCost", input.manufacture_cost)
}

pub(crate) fn finite_update_cost(input: &UpdateProduct) -> Result<(), ValidationError> {
    finite("manufactureCost", input.manufacture_cost)
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        return Ok(());
    }
    Err(ValidationError::new("not_finite")
        .with_message(Cow::Owned(format!("{field} must be a finite number"))))
}

/// Render validation errors as `path: message` entries joined by `"; "`.
///
/// Nested structs produce dotted camelCase paths (`owner.passportId`);
/// struct-level errors are reported under the struct's own path. Entries are
/// sorted so the same input always yields the same text.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect("", errors, &mut messages);
    messages.sort();
    messages.join("; ")
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field: &str = field.as_ref();
        let path = match field {
            "__all__" => prefix.to_string(),
            _ if prefix.is_empty() => camel_case(field),
            _ => format!("{}.{}", prefix, camel_case(field)),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| render(&path, e)));
            }
            ValidationErrorsKind::Struct(nested) => collect(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

fn render(path: &str, error: &ValidationError) -> String {
    let message = error.message.as_deref().unwrap_or(error.code.as_ref());
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{}: {}", path, message)
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
