//! JSON Patch (RFC 6902) documents and their application to DTOs.
//!
//! Operations run through `json_patch`. Their `path` and `from` pointers are
//! first matched against the document ignoring ASCII case, so `/Name` and
//! `/name` address the same DTO property.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;

pub use json_patch::PatchOperation;

/// Failure while applying a patch.
#[derive(Debug, Error)]
pub enum PatchError {
    /// An operation failed against the document.
    #[error(transparent)]
    Operation(#[from] json_patch::PatchError),
    /// An operation could not be rebuilt after resolving its pointers.
    #[error("Invalid patch operation: {0}")]
    Rebuild(#[from] serde_json::Error),
}

/// An ordered list of patch operations, applied atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatchDocument(pub json_patch::Patch);

impl JsonPatchDocument {
    /// Apply every operation to a copy of `document`.
    pub fn apply(&self, document: &Value) -> Result<Value, PatchError> {
        let operations = self
            .0
            .0
            .iter()
            .map(|op| resolve_operation(op, document))
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = document.clone();
        json_patch::patch(&mut doc, &operations)?;
        Ok(doc)
    }

    /// Apply the patch to a DTO, producing a new DTO.
    ///
    /// Operation failures and results that no longer fit `T` are reported
    /// as unprocessable entities.
    pub fn apply_to<T: Serialize + DeserializeOwned>(&self, dto: &T) -> AppResult<T> {
        let document = serde_json::to_value(dto)?;
        let patched = self.apply(&document).map_err(|e| {
            AppError::unprocessable(e.to_string())
                .with_details(serde_json::json!({ "patch": [e.to_string()] }))
        })?;
        serde_json::from_value(patched).map_err(|e| {
            AppError::unprocessable("The patched document is not valid")
                .with_details(serde_json::json!({ "patch": [e.to_string()] }))
        })
    }
}

/// Rewrite an operation's pointers to the key spelling stored in `document`.
fn resolve_operation(op: &PatchOperation, document: &Value) -> Result<PatchOperation, PatchError> {
    let mut raw = serde_json::to_value(op)?;
    if let Value::Object(fields) = &mut raw {
        for name in ["path", "from"] {
            if let Some(Value::String(pointer)) = fields.get_mut(name) {
                *pointer = resolve_pointer(document, pointer);
            }
        }
    }
    Ok(serde_json::from_value(raw)?)
}

/// Walk `path` through `document`, replacing each object key token with the
/// existing key it matches case-insensitively. Tokens past the last match
/// are kept as written.
fn resolve_pointer(document: &Value, path: &str) -> String {
    let Some(rest) = path.strip_prefix('/') else {
        return path.to_string();
    };

    let mut current = Some(document);
    let mut resolved = String::with_capacity(path.len());
    for raw in rest.split('/') {
        let token = raw.replace("~1", "/").replace("~0", "~");
        let (key, next) = match current {
            Some(Value::Object(map)) => {
                let key = if map.contains_key(&token) {
                    Some(token.clone())
                } else {
                    map.keys().find(|k| k.eq_ignore_ascii_case(&token)).cloned()
                };
                let next = key.as_ref().and_then(|k| map.get(k));
                (key, next)
            }
            Some(Value::Array(items)) => (None, token.parse::<usize>().ok().and_then(|i| items.get(i))),
            _ => (None, None),
        };

        resolved.push('/');
        resolved.push_str(&key.unwrap_or(token).replace('~', "~0").replace('/', "~1"));
        current = next;
    }
    resolved
}
