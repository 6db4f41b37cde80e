//! Conversion of `validator` results into application errors.

use std::collections::BTreeMap;

use tracing::error;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;

/// Validate a DTO, turning failures into a 422 error whose details map
/// each camelCase field path to its messages.
pub fn validate_dto<T: Validate>(dto: &T, name: &str) -> AppResult<()> {
    match dto.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            error!("Invalid model state for the {name} object");
            Err(AppError::unprocessable(format!(
                "Invalid model state for the {name} object"
            ))
            .with_details(errors_to_json(&errors)))
        }
    }
}

/// Reject empty and whitespace-only strings. `required` only catches a
/// missing field.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Flatten nested validation errors into `{"field.path": ["message", ...]}`.
pub fn errors_to_json(errors: &ValidationErrors) -> serde_json::Value {
    let mut flat = BTreeMap::new();
    flatten(errors, "", &mut flat);
    serde_json::to_value(flat).unwrap_or_default()
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = join(prefix, &camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = out.entry(path).or_default();
                for e in field_errors {
                    messages.push(
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    );
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Convert a snake_case field name into camelCase.
pub fn camel_case(field: &str) -> String {
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
