//! Feature data model shared by the editing engine and the interaction layer.
//!
//! Features are immutable once built. An edit never patches a feature in
//! place: the engine produces a new collection holding new `Arc<Feature>`s,
//! so `Arc` identity is a cheap "same feature" test for the layer.

use crate::error::Result;
use crate::geometry::{Geometry, Position};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::sync::Arc;

// ─── Features ────────────────────────────────────────────────────────────

/// A geometry plus its property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(d)?.unwrap_or_default())
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            properties: Map::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Numeric property lookup. Non-numeric and zero values read as absent,
    /// so `0` falls through to the caller's default.
    pub fn number_property(&self, key: &str) -> Option<f64> {
        self.properties
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| *v != 0.0)
    }
}

/// An ordered list of features, owned by the feature-editing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Arc<Feature>>,
}

impl FeatureCollection {
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        Self {
            features: features.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse a GeoJSON `FeatureCollection`.
    pub fn from_json(text: &str) -> Result<Self> {
        let collection: Self = serde_json::from_str(text)?;
        log::debug!("parsed feature collection ({} features)", collection.len());
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Feature>> {
        self.features.get(index)
    }

    /// Positional lookup by identity, not by value: two equal features at
    /// different indexes are distinct.
    pub fn position_of(&self, feature: &Feature) -> Option<usize> {
        self.features
            .iter()
            .position(|f| std::ptr::eq(Arc::as_ptr(f), feature))
    }
}

// ─── Edit handles ────────────────────────────────────────────────────────

/// What a handle stands for. This is the only signal for a handle's visual
/// treatment and cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditHandleType {
    /// A committed vertex; dragging moves it.
    Existing,
    /// A synthetic point (e.g. a segment midpoint); dragging inserts a vertex.
    Intermediate,
}

impl EditHandleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Existing => "existing",
            Self::Intermediate => "intermediate",
        }
    }
}

/// A draggable marker over a feature vertex or insertion point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditHandle {
    pub position: Position,
    /// Path to the coordinate inside the feature geometry
    /// (e.g. `[ring, vertex]` for a polygon).
    pub position_indexes: SmallVec<[usize; 4]>,
    pub feature_index: usize,
    #[serde(rename = "type")]
    pub handle_type: EditHandleType,
}

impl EditHandle {
    pub fn existing(feature_index: usize, position_indexes: &[usize], position: Position) -> Self {
        Self {
            position,
            position_indexes: SmallVec::from_slice(position_indexes),
            feature_index,
            handle_type: EditHandleType::Existing,
        }
    }

    pub fn intermediate(feature_index: usize, position_indexes: &[usize], position: Position) -> Self {
        Self {
            handle_type: EditHandleType::Intermediate,
            ..Self::existing(feature_index, position_indexes, position)
        }
    }
}

// ─── Edit actions ────────────────────────────────────────────────────────

/// A completed edit reported by the engine. The interaction layer never
/// inspects or modifies it; it is forwarded to the application as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAction {
    pub updated_data: Arc<FeatureCollection>,
    /// Engine-defined kind, e.g. `addFeature`, `movePosition`.
    pub edit_type: String,
    pub feature_indexes: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_context: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn feature_collection_parses_geojson() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [1, 2] }, "properties": null },
                { "type": "Feature", "id": 7, "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                  "properties": { "lineWidth": 3 } }
            ]
        }"#;
        let fc = FeatureCollection::from_json(text).unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[0].geometry, Geometry::Point(Position::new(1.0, 2.0)));
        assert!(fc.features[0].properties.is_empty());
        assert_eq!(fc.features[1].number_property("lineWidth"), Some(3.0));
        assert_eq!(fc.features[1].id, Some(Value::from(7)));
    }

    #[test]
    fn position_of_uses_identity() {
        let point = Feature::new(Geometry::Point(Position::new(0.0, 0.0)));
        let fc = FeatureCollection::new([point.clone(), point.clone()]);

        assert_eq!(fc.position_of(&fc.features[1]), Some(1));
        // Equal by value but not a member of the collection.
        assert_eq!(fc.position_of(&point), None);
    }

    #[test]
    fn zero_property_reads_as_absent() {
        let f = Feature::new(Geometry::Point(Position::new(0.0, 0.0))).with_property("radius", 0);
        assert_eq!(f.number_property("radius"), None);
    }

    #[test]
    fn edit_handle_serializes_type_field() {
        let handle = EditHandle::intermediate(2, &[0, 3], Position::new(1.0, 1.0));
        let json = serde_json::to_value(&handle).unwrap();
        assert_eq!(json["type"], "intermediate");
        assert_eq!(json["featureIndex"], 2);
        assert_eq!(json["positionIndexes"], serde_json::json!([0, 3]));
    }
}
