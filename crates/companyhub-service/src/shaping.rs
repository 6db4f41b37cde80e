//! Dynamic field selection over serializable DTOs.

use std::marker::PhantomData;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;

/// A DTO with a stable identifier.
pub trait Identifiable {
    /// The entity id.
    fn id(&self) -> Uuid;
}

/// A DTO reduced to the requested properties.
///
/// The source id is kept separately so links can still be built when
/// `id` itself was shaped out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedEntity {
    /// Id of the entity this was shaped from.
    #[serde(skip)]
    pub id: Uuid,
    /// Selected properties, in declaration order.
    #[serde(flatten)]
    pub entity: Map<String, Value>,
}

impl ShapedEntity {
    /// Add or replace a property.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entity.insert(key.into(), value);
    }

    /// The shaped properties as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.entity)
    }
}

/// Selects a subset of a DTO's serialized properties.
#[derive(Debug)]
pub struct DataShaper<T> {
    _marker: PhantomData<fn(&T)>,
}

impl<T> Default for DataShaper<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for DataShaper<T> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<T: Serialize + Identifiable> DataShaper<T> {
    /// Create a shaper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape every entity with the same field list.
    pub fn shape_data(&self, entities: &[T], fields: Option<&str>) -> AppResult<Vec<ShapedEntity>> {
        let requested = requested_fields(fields);
        entities
            .iter()
            .map(|e| shape(e, &requested))
            .collect()
    }

    /// Shape a single entity.
    pub fn shape_entity(&self, entity: &T, fields: Option<&str>) -> AppResult<ShapedEntity> {
        shape(entity, &requested_fields(fields))
    }
}

fn requested_fields(fields: Option<&str>) -> Vec<String> {
    fields
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn shape<T: Serialize + Identifiable>(entity: &T, requested: &[String]) -> AppResult<ShapedEntity> {
    let Value::Object(properties) = serde_json::to_value(entity)? else {
        return Err(AppError::internal("Only objects can be shaped"));
    };

    let selected: Map<String, Value> = properties
        .iter()
        .filter(|(key, _)| requested.contains(&key.to_lowercase()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    // Nothing matched: return every property.
    let entity_map = if selected.is_empty() {
        properties
    } else {
        selected
    };

    Ok(ShapedEntity {
        id: entity.id(),
        entity: entity_map,
    })
}
