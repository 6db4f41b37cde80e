//! Typed path parameter helpers.

use uuid::Uuid;

use companyhub_core::error::AppError;

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid UUID: {s}")))
}

/// Parses a comma-separated id list, optionally wrapped in parentheses.
///
/// `(id1,id2)` and `id1,id2` are equivalent. An empty list is returned
/// as-is so the caller can report it.
pub fn parse_id_list(s: &str) -> Result<Vec<Uuid>, AppError> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_uuid)
        .collect()
}

/// Formats ids the way `parse_id_list` reads them back.
pub fn format_id_list(ids: &str) -> String {
    format!("({ids})")
}
